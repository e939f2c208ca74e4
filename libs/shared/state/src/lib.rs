use sqlx::PgPool;

use shared_config::AppConfig;
use shared_media::MediaStore;
use shared_sms::SmsClient;

/// Shared handle injected into every cell router: configuration, the
/// database pool, the media store and the SMS gateway client. Constructed
/// once at startup; the pool is closed by `main` at shutdown.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub pool: PgPool,
    pub media: MediaStore,
    pub sms: SmsClient,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let media = MediaStore::new(&config.upload_dir);
        let sms = SmsClient::new(&config);
        Self {
            config,
            pool,
            media,
            sms,
        }
    }
}
