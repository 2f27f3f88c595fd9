/// Error kinds surfaced by the discovery troubleshooting subsystem.
///
/// `BadParameter` and `NotFound` are raised by the engine/CLI layers for
/// invalid input; `Backend` wraps whatever the control-plane client
/// returned (transport errors are not retried here).
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("{0}")]
    BadParameter(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

impl DiscoveryError {
    pub fn bad_parameter(msg: impl Into<String>) -> Self {
        Self::BadParameter(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
