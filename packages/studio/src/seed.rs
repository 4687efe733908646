use sea_orm::*;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::entity::user;
use crate::utils::hash;

/// Outcome of [`seed_admin`].
#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyPresent,
    Skipped,
}

/// Create the admin account from configuration unless it already exists.
///
/// An existing account is left untouched, including its password.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> Result<SeedOutcome, DbErr> {
    let (Some(username), Some(password)) = (&auth.admin_username, &auth.admin_password) else {
        warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin seed");
        return Ok(SeedOutcome::Skipped);
    };

    let username = username.trim();
    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        info!(username, "Admin user already exists, skipping creation");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let password_hash = hash::hash_password(password)
        .map_err(|e| DbErr::Custom(format!("Password hash error: {e}")))?;

    let model = user::ActiveModel {
        username: Set(username.to_string()),
        password: Set(password_hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = user::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(user::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => {
            info!(username, "Admin user created");
            Ok(SeedOutcome::Created)
        }
        Err(DbErr::RecordNotInserted) => Ok(SeedOutcome::AlreadyPresent),
        Err(e) => Err(e),
    }
}
