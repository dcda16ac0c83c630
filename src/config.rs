use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

pub const DEFAULT_SCHEMA: &str = "default";
pub const DEFAULT_DIALECT: &str = "generic";

/// Process-wide defaults for callers that do not carry their own settings.
///
/// The analysis functions never consult this implicitly; schema and dialect
/// are always passed in explicitly.
#[derive(Debug, confique::Config)]
pub struct Config {
    /// Schema reported for table references without a schema qualifier.
    #[config(env = "SQLSCOPE_DEFAULT_SCHEMA", default = "default")]
    pub default_schema: String,
    /// Dialect name used when the caller has none, see [`Dialect::from_name`].
    #[config(env = "SQLSCOPE_DEFAULT_DIALECT", default = "generic")]
    pub default_dialect: String,
}

impl Config {
    /// Load the configuration from the current environment.
    pub fn from_env() -> Result<Self> {
        Ok(Config::builder().env().load()?)
    }

    fn fallback() -> Self {
        Self {
            default_schema: DEFAULT_SCHEMA.to_string(),
            default_dialect: DEFAULT_DIALECT.to_string(),
        }
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::from_env().unwrap_or_else(|e| {
            warn!("Falling back to built-in configuration: {e}");
            Config::fallback()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_declared_defaults() {
        let fallback = Config::fallback();
        assert_eq!(fallback.default_schema, DEFAULT_SCHEMA);
        assert_eq!(fallback.default_dialect, DEFAULT_DIALECT);
    }

    #[test]
    fn global_config_is_loaded_once() {
        let first = config() as *const Config;
        let second = config() as *const Config;
        assert_eq!(first, second);
        assert!(!config().default_schema.is_empty());
    }
}
