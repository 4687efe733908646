use axum::extract::{DefaultBodyLimit, State};
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use sea_orm::*;
use tracing::{info, instrument, warn};

use crate::entity::{contact_message, project, social};
use crate::error::AppError;
use crate::extractors::auth::AdminUser;
use crate::extractors::form::{AdminForm, UploadedFile};
use crate::extractors::path::AppPath;
use crate::flash::{self, Flash};
use crate::handlers::site::{list_projects, list_socials};
use crate::models::admin::{AdminAction, NewProject, NewSocial, ProfileSubmission};
use crate::state::AppState;
use crate::uploads::UploadError;
use crate::views::{AdminPage, PageContext, render};

#[instrument(skip(admin, state, jar), fields(user_id = admin.user_id))]
pub async fn dashboard(
    admin: AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);

    let projects = list_projects(&state.db).await?;
    let socials = list_socials(&state.db).await?;
    let messages = contact_message::Entity::find()
        .order_by_asc(contact_message::Column::Id)
        .all(&state.db)
        .await?;
    let profile = state.profiles.load().await?;

    let html = render(&AdminPage {
        page: PageContext::new(flash, profile),
        username: admin.username,
        projects,
        socials,
        messages,
    })?;
    Ok((jar, html))
}

/// Apply one dashboard form. The outcome is reported as a flash on `/admin`.
#[instrument(skip(admin, state, jar, form), fields(user_id = admin.user_id))]
pub async fn submit(
    admin: AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
    form: AdminForm,
) -> Result<impl IntoResponse, AppError> {
    let outcome = match AdminAction::from_form(form) {
        Ok(AdminAction::UpdateProfile(submission)) => update_profile(&state, submission).await?,
        Ok(AdminAction::CreateProject(new_project)) => create_project(&state, new_project).await?,
        Ok(AdminAction::CreateSocial(new_social)) => create_social(&state, new_social).await?,
        Err(e) => {
            warn!(error = %e, "Admin submission rejected");
            e.flash()
        }
    };

    let secure = state.config.auth.secure_cookies;
    Ok((flash::set(jar, outcome, secure), Redirect::to("/admin")))
}

/// Ids that match no row, including unparsable ones, are a no-op.
#[instrument(skip(_admin, state, jar, path))]
pub async fn delete_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
    path: Result<AppPath<i32>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let Ok(AppPath(id)) = path else {
        return Ok((jar, Redirect::to("/admin")));
    };
    let result = project::Entity::delete_by_id(id).exec(&state.db).await?;

    let jar = if result.rows_affected > 0 {
        info!(id, "Project deleted");
        flash::set(jar, Flash::ProjectRemoved, state.config.auth.secure_cookies)
    } else {
        jar
    };
    Ok((jar, Redirect::to("/admin")))
}

/// Ids that match no row, including unparsable ones, are a no-op.
#[instrument(skip(_admin, state, jar, path))]
pub async fn delete_social(
    _admin: AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
    path: Result<AppPath<i32>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let Ok(AppPath(id)) = path else {
        return Ok((jar, Redirect::to("/admin")));
    };
    let result = social::Entity::delete_by_id(id).exec(&state.db).await?;

    let jar = if result.rows_affected > 0 {
        info!(id, "Social link deleted");
        flash::set(jar, Flash::SocialRemoved, state.config.auth.secure_cookies)
    } else {
        jar
    };
    Ok((jar, Redirect::to("/admin")))
}

async fn update_profile(state: &AppState, submission: ProfileSubmission) -> Result<Flash, AppError> {
    let ProfileSubmission {
        mut update,
        profile_file,
        logo_file,
    } = submission;

    let mut rejected = false;
    if let Some(file) = profile_file {
        match store_upload(state, &file).await? {
            Some(path) => update.profile_img = Some(path),
            None => rejected = true,
        }
    }
    if let Some(file) = logo_file {
        match store_upload(state, &file).await? {
            Some(path) => update.logo_url = Some(path),
            None => rejected = true,
        }
    }

    state.profiles.update(update).await?;
    info!(rejected_upload = rejected, "Profile updated");

    Ok(if rejected {
        Flash::UploadRejected
    } else {
        Flash::ProfileSaved
    })
}

/// Store an uploaded image. `None` means the file was refused and nothing was written.
async fn store_upload(state: &AppState, file: &UploadedFile) -> Result<Option<String>, AppError> {
    match state.uploads.store_image(&file.file_name, &file.bytes).await {
        Ok(path) => Ok(Some(path)),
        Err(e @ (UploadError::DisallowedExtension(_) | UploadError::InvalidFilename(_))) => {
            warn!(error = %e, "Upload rejected");
            Ok(None)
        }
        Err(UploadError::Io(e)) => Err(e.into()),
    }
}

async fn create_project(state: &AppState, new_project: NewProject) -> Result<Flash, AppError> {
    let model = project::ActiveModel {
        title: Set(new_project.title),
        tag: Set(new_project.tag),
        description: Set(new_project.description),
        span: Set(new_project.span),
        live_link: Set(new_project.live_link),
        repo_link: Set(new_project.repo_link),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(id = model.id, title = %model.title, "Project created");
    Ok(Flash::ProjectCreated)
}

async fn create_social(state: &AppState, new_social: NewSocial) -> Result<Flash, AppError> {
    let model = social::ActiveModel {
        platform: Set(new_social.platform),
        url: Set(new_social.url),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(id = model.id, platform = %model.platform, "Social link created");
    Ok(Flash::SocialCreated)
}

/// Body limit for dashboard submissions, leaving room for multipart framing.
pub fn upload_body_limit(max_upload_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_upload_bytes + 16 * 1024)
}
