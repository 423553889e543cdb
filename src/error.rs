//! Process-fatal error types.
//!
//! Only listener-bind and configuration errors abort the process; everything
//! else (malformed frames, failed upgrades, closed sessions) is handled and
//! logged where it occurs.

use crate::config::loader::ConfigError;

/// Error type for gateway startup and serving.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Failed to bind the listener address. Fatal, never retried.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed for a reason other than intentional shutdown.
    #[error("server error: {0}")]
    Serve(std::io::Error),

    /// Configuration could not be loaded or validated.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::ValidationError;

    #[test]
    fn config_errors_carry_context() {
        let err = GatewayError::from(ConfigError::Validation(vec![
            ValidationError::ZeroGracePeriod,
        ]));
        let rendered = err.to_string();
        assert!(rendered.starts_with("configuration error:"), "{rendered}");
        assert!(rendered.contains("grace period"), "{rendered}");
    }
}
