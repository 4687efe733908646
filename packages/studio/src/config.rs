use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a single admin form submission, uploads included.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub session_ttl_hours: i64,
    pub secure_cookies: bool,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Defaults to `username` when unset.
    pub recipient: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub owner_name: String,
    pub static_dir: PathBuf,
    pub app_root: PathBuf,
}

impl SiteConfig {
    pub fn uploads_dir(&self) -> PathBuf {
        self.static_dir.join("uploads")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.max_upload_bytes", 8 * 1024 * 1024)?
            .set_default("database.url", "sqlite://studio.db?mode=rwc")?
            .set_default("auth.session_ttl_hours", 12)?
            .set_default("auth.secure_cookies", false)?
            .set_default("mail.host", "smtp.gmail.com")?
            .set_default("mail.port", 587)?
            .set_default("mail.tls", true)?
            .set_default("mail.timeout_secs", 10)?
            .set_default("site.owner_name", "Atom De Legend")?
            .set_default("site.static_dir", "static")?
            .set_default("site.app_root", ".")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., STUDIO__MAIL__PORT)
            .add_source(Environment::with_prefix("STUDIO").separator("__"))
            // Plain variables used by existing deployments win over everything else.
            .set_override_option("auth.secret_key", env_var("SECRET_KEY"))?
            .set_override_option("database.url", env_var("DATABASE_URL"))?
            .set_override_option("mail.username", env_var("MAIL_USERNAME"))?
            .set_override_option("mail.password", env_var("MAIL_PASSWORD"))?
            .set_override_option("auth.admin_username", env_var("ADMIN_USERNAME"))?
            .set_override_option("auth.admin_password", env_var("ADMIN_PASSWORD"))?
            .build()?;

        s.try_deserialize()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
