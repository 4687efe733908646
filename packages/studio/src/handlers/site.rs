use axum::body::Body;
use axum::extract::{Form, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use sea_orm::*;
use tracing::{info, instrument, warn};

use crate::entity::{contact_message, project, social};
use crate::error::AppError;
use crate::extractors::path::AppPath;
use crate::flash::{self, Flash};
use crate::mail::Notification;
use crate::models::contact::ContactForm;
use crate::state::AppState;
use crate::views::{AboutPage, HomePage, PageContext, ProjectPage, render};

#[instrument(skip(state, jar))]
pub async fn home(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);

    let projects = list_projects(&state.db).await?;
    let socials = list_socials(&state.db).await?;
    let profile = state.profiles.load().await?;

    let html = render(&HomePage {
        page: PageContext::new(flash, profile),
        projects,
        socials,
    })?;
    Ok((jar, html))
}

#[instrument(skip(state, jar))]
pub async fn about_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);

    let socials = list_socials(&state.db).await?;
    let profile = state.profiles.load().await?;

    let html = render(&AboutPage {
        page: PageContext::new(flash, profile),
        socials,
    })?;
    Ok((jar, html))
}

#[instrument(skip(state, jar))]
pub async fn project_detail(
    State(state): State<AppState>,
    jar: CookieJar,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let project = project::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    let (jar, flash) = flash::take(jar);
    let profile = state.profiles.load().await?;

    let html = render(&ProjectPage {
        page: PageContext::new(flash, profile),
        project,
    })?;
    Ok((jar, html))
}

/// Store a contact message, then try to notify the owner.
///
/// The row is committed before any mail is attempted; a delivery failure only
/// changes the flash shown to the visitor.
#[instrument(skip(state, jar, form), fields(subject = %form.subject))]
pub async fn contact(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> Result<impl IntoResponse, AppError> {
    let message = contact_message::ActiveModel {
        name: Set(form.name),
        email: Set(form.email),
        subject: Set(form.subject),
        body: Set(form.message),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    let outcome = match state
        .mailer
        .send(Notification::for_contact(&message))
        .await
    {
        Ok(()) => {
            info!(message_id = message.id, "Contact notification sent");
            Flash::MessageSent
        }
        Err(e) => {
            warn!(message_id = message.id, error = %e, "Contact message saved but notification failed");
            Flash::MessageSavedNotEmailed
        }
    };

    let secure = state.config.auth.secure_cookies;
    Ok((flash::set(jar, outcome, secure), Redirect::to("/")))
}

/// Serve the service worker script from the application root.
#[instrument(skip(state))]
pub async fn service_worker(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = state.config.site.app_root.join("sw.js");

    let content = match tokio::fs::read(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("Service worker not found".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(e.to_string()))
}

pub(crate) async fn list_projects<C: ConnectionTrait>(db: &C) -> Result<Vec<project::Model>, DbErr> {
    project::Entity::find()
        .order_by_asc(project::Column::Id)
        .all(db)
        .await
}

pub(crate) async fn list_socials<C: ConnectionTrait>(db: &C) -> Result<Vec<social::Model>, DbErr> {
    social::Entity::find()
        .order_by_asc(social::Column::Id)
        .all(db)
        .await
}
