//! Typed configuration for the voting client.
//!
//! Settings load with precedence: a `psephos.toml` in the working directory,
//! then `PSEPHOS_*` environment variables on top. A `.env` file is read
//! first so local development can keep credentials out of the shell.

use config::{Config, Environment, File};
use psephos_error::{ConfigError, ConfigErrorKind};
use serde::Deserialize;

/// Connection settings for the contract gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// Base URL of the contract read/write gateway
    pub gateway_url: String,
    /// Address of the deployed voting contract
    pub contract_address: String,
}

/// Connection settings for the voter registry database.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
}

/// Complete client configuration.
///
/// # Example
///
/// ```no_run
/// use psephos::PsephosConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PsephosConfig::load()?;
/// println!("gateway: {}", config.chain.gateway_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PsephosConfig {
    /// Contract gateway settings
    pub chain: ChainConfig,
    /// Registry database settings
    pub database: DatabaseConfig,
}

impl PsephosConfig {
    /// Load configuration from `psephos.toml` and `PSEPHOS_*` environment
    /// variables, the latter taking precedence.
    ///
    /// `PSEPHOS_CHAIN__GATEWAY_URL=...` overrides `chain.gateway_url`; the
    /// double underscore separates nesting levels.
    pub fn load() -> Result<Self, ConfigError> {
        // Optional; missing .env is not an error.
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(File::with_name("psephos").required(false))
            .add_source(Environment::with_prefix("PSEPHOS").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Source(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Source(e.to_string())))
    }

    /// Load configuration from a specific TOML file, without environment
    /// overrides.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Source(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Source(e.to_string())))
    }

    /// Validate that no required value is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("chain.gateway_url", &self.chain.gateway_url),
            ("chain.contract_address", &self.chain.contract_address),
            ("database.url", &self.database.url),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::new(ConfigErrorKind::Missing(key.to_string())));
            }
        }
        Ok(())
    }
}
