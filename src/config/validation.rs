//! Configuration validation.
//!
//! Semantic checks on top of what serde already enforces. All errors are
//! collected and reported together, not just the first.

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("bind address {0:?} is not a valid host:port address")]
    InvalidBindAddress(String),

    #[error("shutdown grace period must be non-zero")]
    ZeroGracePeriod,

    #[error("origin allow-list is empty but allow_all_origins is off")]
    EmptyOriginAllowList,
}

/// Validate a configuration, returning every failure found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !valid_bind_address(&config.listener.bind_address) {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.shutdown.grace_period_secs == 0 {
        errors.push(ValidationError::ZeroGracePeriod);
    }

    if !config.upgrade.allow_all_origins && config.upgrade.allowed_origins.is_empty() {
        errors.push(ValidationError::EmptyOriginAllowList);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Accepts anything the listener could bind: a literal socket address, or a
/// hostname with a numeric port (e.g., "localhost:8080").
fn valid_bind_address(addr: &str) -> bool {
    if addr.parse::<std::net::SocketAddr>().is_ok() {
        return true;
    }
    match addr.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn bad_bind_address_is_reported() {
        for bad in ["no-port", "host:notaport", ":8080", "host:99999"] {
            let mut config = GatewayConfig::default();
            config.listener.bind_address = bad.into();
            let errors = validate_config(&config).unwrap_err();
            assert!(
                matches!(errors.as_slice(), [ValidationError::InvalidBindAddress(_)]),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn hostname_bind_addresses_are_accepted() {
        for good in ["localhost:8080", "0.0.0.0:8080", "[::1]:9000"] {
            let mut config = GatewayConfig::default();
            config.listener.bind_address = good.into();
            assert!(
                validate_config(&config).is_ok(),
                "expected {good:?} to validate"
            );
        }
    }

    #[test]
    fn strict_origin_policy_requires_an_allow_list() {
        let mut config = GatewayConfig::default();
        config.upgrade.allow_all_origins = false;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::EmptyOriginAllowList]
        ));
    }
}
