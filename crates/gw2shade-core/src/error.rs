use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Access denied opening shared region '{0}'")]
    AccessDenied(String),

    #[error("Failed to open shared region '{name}': {message}")]
    RegionOpenFailed { name: String, message: String },

    #[error("Snapshot truncated: expected {expected} bytes, got {actual}")]
    TruncatedSnapshot { expected: usize, actual: usize },

    #[error("Shared-memory regions are only supported on Windows")]
    Unsupported,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is the permission failure the elevation
    /// policy responds to.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Error::AccessDenied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_detection() {
        let err = Error::AccessDenied("MumbleLink".to_string());
        assert!(err.is_access_denied());

        let err2 = Error::TruncatedSnapshot {
            expected: 5460,
            actual: 100,
        };
        assert!(!err2.is_access_denied());
    }
}
