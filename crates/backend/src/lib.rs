pub mod error;
pub mod queue;
pub mod signer;
pub mod store;

pub use error::BackendError;
pub use queue::{MessagePublisher, OutboundMessage};
pub use signer::{PresignRequest, UploadSigner};
pub use store::DocumentStore;
