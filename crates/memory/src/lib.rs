//! In-memory implementations of the docintake backend traits.
//!
//! Used by tests and by the server's `memory` backend for local runs. Each
//! backend can be switched into a failing state to exercise error paths.

mod failure;
mod queue;
mod signer;
mod store;

pub use queue::{MemoryQueue, PublishedMessage};
pub use signer::MemoryUploadSigner;
pub use store::MemoryDocumentStore;
