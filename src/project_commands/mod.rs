//! Project commands — setup/start command detection for imported projects.
//!
//! Submodules:
//! - `detector`: `CommandDetector` trait and the manifest-based detector
//! - `message`: Formats detected commands into a chat message
//! - `types`: `ProjectCommands` and `ProjectType`
//! - `errors`: Detector error types

pub mod detector;
pub mod errors;
pub mod message;
pub mod types;

pub use detector::{CommandDetector, ManifestDetector};
pub use errors::DetectorError;
pub use message::create_commands_message;
pub use types::{ProjectCommands, ProjectType};
