//! Engine configuration - env-driven options for the bootstrap layer
//!
//! These options are consumed by the surrounding bootstrap wiring, not by
//! the resolution core: the core always caches and `strict_mode` is not
//! consulted by the resolution path (its reject-vs-ignore behavior for
//! invalid descriptors is intentionally left unspecified).

/// Boolean options controlling how the surrounding application wires the
/// engine up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Cache resolved relationship metadata process-wide.
    pub cache_relationships: bool,

    /// Reject invalid descriptors instead of ignoring them.
    pub strict_mode: bool,

    /// Automatically resolve model declarations at bootstrap.
    pub auto_discover: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_relationships: true,
            strict_mode: true,
            auto_discover: true,
        }
    }
}

impl EngineConfig {
    /// Read configuration from the environment, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Self {
        Self {
            cache_relationships: env_flag("KINSHIP_CACHE_RELATIONSHIPS", true),
            strict_mode: env_flag("KINSHIP_STRICT_MODE", true),
            auto_discover: env_flag("KINSHIP_AUTO_DISCOVER", true),
        }
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => matches!(
            value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let config = EngineConfig::default();
        assert!(config.cache_relationships);
        assert!(config.strict_mode);
        assert!(config.auto_discover);
    }

    #[test]
    fn test_env_flag_parsing() {
        // Distinct variable names keep parallel tests from interfering
        std::env::set_var("KINSHIP_TEST_FLAG_ON", "true");
        assert!(env_flag("KINSHIP_TEST_FLAG_ON", false));

        std::env::set_var("KINSHIP_TEST_FLAG_OFF", "false");
        assert!(!env_flag("KINSHIP_TEST_FLAG_OFF", true));

        std::env::set_var("KINSHIP_TEST_FLAG_NUMERIC", "1");
        assert!(env_flag("KINSHIP_TEST_FLAG_NUMERIC", false));

        assert!(env_flag("KINSHIP_TEST_FLAG_UNSET", true));
        assert!(!env_flag("KINSHIP_TEST_FLAG_UNSET", false));
    }
}
