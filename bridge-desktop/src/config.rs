//! App configuration from environment variables

use bridge_traits::app::AppConfiguration;

pub(crate) const APP_ID_VAR: &str = "BRIDGE_APP_ID";
pub(crate) const SCHEME_SUFFIX_VAR: &str = "BRIDGE_URL_SCHEME_SUFFIX";
pub(crate) const DISPLAY_NAME_VAR: &str = "BRIDGE_DISPLAY_NAME";

/// Configuration snapshot taken from the process environment.
///
/// Values are read once at construction so concurrent readers always observe
/// the same identity. Empty variables count as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvAppConfiguration {
    app_identifier: Option<String>,
    url_scheme_suffix: Option<String>,
    display_name: Option<String>,
}

impl EnvAppConfiguration {
    /// Read `BRIDGE_APP_ID`, `BRIDGE_URL_SCHEME_SUFFIX` and
    /// `BRIDGE_DISPLAY_NAME`.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }
            match key.as_ref() {
                APP_ID_VAR => config.app_identifier = Some(value.trim().to_string()),
                SCHEME_SUFFIX_VAR => config.url_scheme_suffix = Some(value.trim().to_string()),
                DISPLAY_NAME_VAR => config.display_name = Some(value),
                _ => {}
            }
        }

        config
    }
}

impl AppConfiguration for EnvAppConfiguration {
    fn app_identifier(&self) -> Option<String> {
        self.app_identifier.clone()
    }

    fn url_scheme_suffix(&self) -> Option<String> {
        self.url_scheme_suffix.clone()
    }

    fn display_name(&self) -> Option<String> {
        self.display_name.clone()
    }
}
