use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::mail::Mailer;
use crate::profile::ProfileStore;
use crate::uploads::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub profiles: ProfileStore,
    pub uploads: Arc<UploadStore>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Wire the services for one process. Creates the upload directory.
    pub async fn new(
        db: DatabaseConnection,
        config: AppConfig,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, std::io::Error> {
        let uploads = UploadStore::new(config.site.uploads_dir()).await?;
        let profiles = ProfileStore::new(db.clone(), config.site.owner_name.clone());
        Ok(Self {
            db,
            config,
            profiles,
            uploads: Arc::new(uploads),
            mailer,
        })
    }
}
