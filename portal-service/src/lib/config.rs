use std::env;
use std::path::Path;

use auth::PathExemptionPolicy;
use auth::SecretError;
use auth::SigningSecret;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::Map;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub exemptions: ExemptionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Absent URL selects the in-memory credential store.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
    pub cookie_name: String,
    pub secure_cookie: bool,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("cookie_name", &self.cookie_name)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExemptionConfig {
    pub prefixes: Vec<String>,
    pub exact: Vec<String>,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load_from(Path::new("config"), &run_mode, None)
    }

    /// Load from `config_dir` for `run_mode`.
    ///
    /// `environment` replaces the process environment when given.
    pub fn load_from(
        config_dir: &Path,
        run_mode: &str,
        environment: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let default_file = config_dir.join("default");
        let mode_file = config_dir.join(run_mode);

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("jwt.ttl_seconds", 3600)?
            .set_default("jwt.cookie_name", "jwt")?
            .set_default("jwt.secure_cookie", true)?
            .set_default(
                "exemptions.prefixes",
                PathExemptionPolicy::DEFAULT_PREFIXES.to_vec(),
            )?
            .set_default("exemptions.exact", PathExemptionPolicy::DEFAULT_EXACT.to_vec())?
            .add_source(File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(File::with_name(&mode_file.to_string_lossy()).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .source(environment),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Build the immutable signing secret. Called once at startup.
    pub fn signing_secret(&self) -> Result<SigningSecret, SecretError> {
        SigningSecret::new(self.jwt.secret.as_bytes().to_vec())
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.jwt.ttl_seconds)
    }

    pub fn exemption_policy(&self) -> PathExemptionPolicy {
        PathExemptionPolicy::new(
            self.exemptions.prefixes.iter().cloned(),
            self.exemptions.exact.iter().cloned(),
        )
    }
}
