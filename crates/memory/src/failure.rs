use parking_lot::Mutex;

use docintake_backend::BackendError;

/// Shared on/off failure injection for the in-memory backends.
#[derive(Debug, Default)]
pub(crate) struct FailureSwitch {
    message: Mutex<Option<String>>,
}

impl FailureSwitch {
    pub(crate) fn set(&self, message: impl Into<String>) {
        *self.message.lock() = Some(message.into());
    }

    pub(crate) fn clear(&self) {
        *self.message.lock() = None;
    }

    /// Returns the injected error, if any.
    pub(crate) fn check(&self) -> Result<(), BackendError> {
        match self.message.lock().as_ref() {
            Some(msg) => Err(BackendError::Service(msg.clone())),
            None => Ok(()),
        }
    }
}
