//! Staging — pending file changes awaiting user approval.
//!
//! Submodules:
//! - `store`: The session-scoped `StagingStore` (stage / accept / reject)
//! - `types`: Change records and store policies
//! - `errors`: Staging error types

pub mod errors;
pub mod store;
pub mod types;

pub use errors::StagingError;
pub use store::StagingStore;
pub use types::{
    AcceptPolicy, ChangeStatus, ChangeType, DuplicatePathPolicy, NewStagedChange, StagedChange,
};
