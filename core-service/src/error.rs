use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// The module could not be located, or was found but is incompatible.
    /// Not recoverable for the lifetime of the process.
    #[error("Initialization of {module} failed: {reason}")]
    InitializationFailed { module: String, reason: String },

    /// A resolved operation was invoked and the module reported a failure.
    #[error("Invocation of {operation} failed: {source}")]
    Invocation {
        operation: &'static str,
        #[source]
        source: BridgeError,
    },

    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CoreError::InitializationFailed { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
