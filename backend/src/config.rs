//! Client configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Base URL used when `STOREFRONT_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
/// User-agent used when `STOREFRONT_USER_AGENT` is unset.
pub const DEFAULT_USER_AGENT: &str = "storefront/0.1";

/// Settings controlling how the storefront API is reached.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct ClientSettings {
    /// Base URL every API path is appended to.
    pub base_url: Option<String>,
    /// User-agent header sent with each request.
    pub user_agent: Option<String>,
}

impl ClientSettings {
    /// Return the configured base URL, falling back to the default.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Return the configured user-agent, falling back to the default.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("storefront")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("STOREFRONT_BASE_URL", None::<String>),
            ("STOREFRONT_USER_AGENT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
        assert_eq!(settings.user_agent(), DEFAULT_USER_AGENT);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "STOREFRONT_BASE_URL",
                Some("https://shop.example/api".to_owned()),
            ),
            ("STOREFRONT_USER_AGENT", Some("storefront-ci/2".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.base_url(), "https://shop.example/api");
        assert_eq!(settings.user_agent(), "storefront-ci/2");
    }
}
