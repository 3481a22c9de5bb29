//! The two docintake request handlers.
//!
//! Each handler takes the raw JSON request body and always produces a
//! [`HandlerResponse`]; errors never escape. Both are stateless apart from
//! the backend clients injected at construction.

pub mod error;
pub mod intake;
pub mod response;
pub mod upload;

pub use error::HandlerError;
pub use intake::DocumentIntake;
pub use response::HandlerResponse;
pub use upload::UploadUrlIssuer;
