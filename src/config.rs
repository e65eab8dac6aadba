use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Format, RenderOptions};

/// Environment variable naming the TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "GLOSSARY_CONFIG_PATH";

/// Configuration file used when [`CONFIG_PATH_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/glossary.toml";

/// Tool configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryConfig {
    /// Rendering settings.
    pub render: RenderSettings,
    /// Resolution settings.
    pub resolve: ResolveSettings,
}

/// Rendering settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Default output format name.
    pub format: String,
    /// Whether related references are rendered.
    pub include_related: bool,
    /// Whether asides are rendered.
    pub include_asides: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            format: Format::default().name().to_string(),
            include_related: true,
            include_asides: true,
        }
    }
}

impl RenderSettings {
    /// Render options described by these settings.
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            include_related: self.include_related,
            include_asides: self.include_asides,
        }
    }
}

/// Resolution settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveSettings {
    /// Render even when references dangle. They are still reported.
    pub allow_dangling: bool,
}

impl GlossaryConfig {
    /// Loads configuration from defaults, `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `GLOSSARY_` prefix, `__` separating
    ///    sections (e.g., `GLOSSARY_RENDER__FORMAT=emphasized`)
    /// 2. TOML configuration file (if exists)
    /// 3. Built-in defaults
    ///
    /// The `.env` file is loaded into the environment first, so its entries
    /// behave like environment variables. A missing `.env` file is not an error.
    ///
    /// The TOML file path can be set via `GLOSSARY_CONFIG_PATH`. If not set,
    /// defaults to `./config/glossary.toml`. A missing file is silently skipped.
    ///
    /// # Errors
    /// Returns an error if a source is malformed or holds values of the wrong type.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        use figment::providers::{Env, Format as _, Serialized, Toml};
        use figment::Figment;

        let _ = dotenvy::dotenv();

        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("GLOSSARY_").split("__"))
            .extract()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error message if the default format is not supported.
    pub fn validate(&self) -> Result<(), String> {
        Format::from_str(&self.render.format)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
