use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "config/grocer.toml";

/// Smallest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Cookie signing secret. A random one is generated when unset.
    pub secret: Option<String>,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub secure: bool,
    /// Lifetime of a "remember me" session.
    #[serde(default = "default_remember_days")]
    pub remember_days: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            cookie_name: default_cookie_name(),
            secure: false,
            remember_days: default_remember_days(),
        }
    }
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_mailbox_size")]
    pub mailbox_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { mailbox_size: default_mailbox_size() }
    }
}

/// Administrator account created at startup if no account holds its email.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_first_name")]
    pub first_name: String,
    #[serde(default = "default_admin_last_name")]
    pub last_name: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_cookie_name() -> String {
    "__session".to_string()
}

fn default_remember_days() -> i64 {
    7
}

fn default_memory_kib() -> u32 {
    argon2::Params::DEFAULT_M_COST
}

fn default_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}

fn default_parallelism() -> u32 {
    argon2::Params::DEFAULT_P_COST
}

fn default_mailbox_size() -> usize {
    32
}

fn default_admin_first_name() -> String {
    "Store".to_string()
}

fn default_admin_last_name() -> String {
    "Admin".to_string()
}

impl AppConfig {
    /// Load configuration from `config/grocer.toml` (optional), overridden by
    /// `GROCER__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix("GROCER").separator("__"))
            .build()?;
        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(secret) = &self.session.secret {
            if secret.len() < MIN_SECRET_LEN {
                return Err(ConfigError::Message(format!(
                    "session.secret must be at least {MIN_SECRET_LEN} bytes, got {}",
                    secret.len()
                )));
            }
        }
        if self.store.mailbox_size == 0 {
            return Err(ConfigError::Message("store.mailbox_size must be positive".to_string()));
        }
        Ok(())
    }
}
