use {
    config::{Config, ConfigError, Environment, File},
    serde::de::DeserializeOwned,
    std::path::Path,
};

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "LENS";

/// Separates the prefix and the levels of nesting in an environment variable
/// name, e.g. `LENS__LIMITS__REPAY_BUFFER_MINUTES`.
pub const ENV_SEPARATOR: &str = "__";

/// Load a configuration from an optional TOML file, then apply overrides
/// from `LENS__*` environment variables on top.
///
/// A missing file is not an error: only the environment is read, and every
/// setting absent from both falls back to `D`'s serde defaults.
pub fn parse_config<D>(path: Option<&Path>) -> Result<D, ConfigError>
where
    D: DeserializeOwned,
{
    parse_config_with_prefix(path, ENV_PREFIX)
}

/// Same as [`parse_config`], reading environment variables under a custom
/// prefix.
pub fn parse_config_with_prefix<D>(path: Option<&Path>, prefix: &str) -> Result<D, ConfigError>
where
    D: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(false));
    }

    let env_override = Environment::with_prefix(prefix).separator(ENV_SEPARATOR);

    builder.add_source(env_override).build()?.try_deserialize()
}

// ----------------------------------- tests -----------------------------------
