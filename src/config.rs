use serde::Deserialize;

use crate::error::AppError;

/// Runtime configuration.
///
/// Layered from built-in defaults, an optional `kidzone.toml` in the working
/// directory, and `KIDZONE__*` environment variables
/// (e.g. `KIDZONE__DATABASE__URI`, `KIDZONE__ADMIN__PASSWORD`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub uri: String,
    /// Database holding the `stories`, `videos` and `poems` collections.
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Bucket for uploaded cover images.
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for MinIO / LocalStack.
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Admin dashboard password. The dashboard is locked when unset.
    #[serde(default)]
    pub password: Option<String>,
}

impl DatabaseConfig {
    /// The connection string with any user info masked, for logging.
    pub fn redacted_uri(&self) -> String {
        let Some(scheme_end) = self.uri.find("://").map(|i| i + 3) else {
            return self.uri.clone();
        };
        let rest = &self.uri[scheme_end..];
        let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());

        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{}***{}", &self.uri[..scheme_end], &rest[at..]),
            None => self.uri.clone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `kidzone.toml` (optional) and the environment.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(config::File::with_name("kidzone").required(false))
    }

    fn load_from<S>(file: S) -> Result<Self, AppError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .set_default("database.uri", "mongodb://localhost:27017")
            .and_then(|b| b.set_default("database.name", "kidzone"))
            .and_then(|b| b.set_default("storage.bucket", "kidzone-media"))
            .and_then(|b| b.set_default("storage.region", "us-east-1"))
            .map_err(|e| AppError::Config(e.to_string()))?
            .add_source(file)
            .add_source(config::Environment::with_prefix("KIDZONE").separator("__"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AppError::Config(e.to_string()))
    }
}
