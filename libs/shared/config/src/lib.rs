use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_host: String,
    pub database_port: u16,
    pub database_user: String,
    pub database_password: String,
    pub database_name: String,
    pub listen_port: u16,
    pub upload_dir: String,
    pub sms_api_url: String,
    pub sms_usercode: String,
    pub sms_password: String,
    pub sms_header: String,
    pub admin_jwt_secret: String,
    pub admin_bootstrap_username: String,
    pub admin_bootstrap_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_host: env_or("DB_HOST", "localhost"),
            database_port: env_or("DB_PORT", "5432").parse().unwrap_or_else(|_| {
                warn!("DB_PORT is not a valid port, using 5432");
                5432
            }),
            database_user: env_or("DB_USER", "postgres"),
            database_password: env::var("DB_PASSWORD").unwrap_or_else(|_| {
                warn!("DB_PASSWORD not set, using empty value");
                String::new()
            }),
            database_name: env_or("DB_NAME", "dentclinic"),
            listen_port: env_or("PORT", "3000").parse().unwrap_or_else(|_| {
                warn!("PORT is not a valid port, using 3000");
                3000
            }),
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            sms_api_url: env_or("SMS_API_URL", "https://api.netgsm.com.tr/sms/send/get"),
            sms_usercode: env::var("SMS_USERCODE").unwrap_or_else(|_| {
                warn!("SMS_USERCODE not set, SMS dispatch will fail");
                String::new()
            }),
            sms_password: env::var("SMS_PASSWORD").unwrap_or_else(|_| {
                warn!("SMS_PASSWORD not set, SMS dispatch will fail");
                String::new()
            }),
            sms_header: env_or("SMS_HEADER", "DENTCLINIC"),
            admin_jwt_secret: env::var("ADMIN_JWT_SECRET").unwrap_or_else(|_| {
                warn!("ADMIN_JWT_SECRET not set, using insecure default");
                "change-me".to_string()
            }),
            admin_bootstrap_username: env_or("ADMIN_USERNAME", "admin"),
            admin_bootstrap_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
                warn!("ADMIN_PASSWORD not set, seeding with default credential");
                "change-me".to_string()
            }),
        };

        if !config.is_sms_configured() {
            warn!("SMS gateway not fully configured - booking notifications will be reported as failed");
        }

        config
    }

    /// Connection string for the Postgres pool.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.database_user,
            self.database_password,
            self.database_host,
            self.database_port,
            self.database_name
        )
    }

    pub fn is_sms_configured(&self) -> bool {
        !self.sms_usercode.is_empty() && !self.sms_password.is_empty() && !self.sms_header.is_empty()
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        warn!("{} not set, using default {:?}", key, default);
        default.to_string()
    })
}
