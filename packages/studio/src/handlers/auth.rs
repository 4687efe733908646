use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use sea_orm::*;
use tracing::{info, instrument, warn};

use crate::entity::user;
use crate::error::AppError;
use crate::extractors::auth::{AdminUser, clear_session_cookie, session_cookie};
use crate::flash::{self, Flash};
use crate::models::auth::LoginForm;
use crate::state::AppState;
use crate::utils::{hash, jwt};
use crate::views::{LoginPage, PageContext, render};

#[instrument(skip(state, jar))]
pub async fn login_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);
    let profile = state.profiles.load().await?;
    let html = render(&LoginPage {
        page: PageContext::new(flash, profile),
    })?;
    Ok((jar, html))
}

/// Handle an admin login.
///
/// Unknown usernames and wrong passwords produce the same page.
#[instrument(skip(state, jar, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(user) = authenticate(&state.db, &form).await? else {
        warn!("Login denied");
        let profile = state.profiles.load().await?;
        let html = render(&LoginPage {
            page: PageContext::new(Some(Flash::AccessDenied), profile),
        })?;
        return Ok((jar, html).into_response());
    };

    let token = jwt::sign(
        user.id,
        &user.username,
        state.config.auth.session_ttl_hours,
        &state.config.auth.secret_key,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    info!(user_id = user.id, "Admin logged in");
    let jar = jar.add(session_cookie(token, &state.config.auth));
    Ok((jar, Redirect::to("/admin")).into_response())
}

#[instrument(skip(admin, jar), fields(user_id = admin.user_id))]
pub async fn logout(admin: AdminUser, jar: CookieJar) -> impl IntoResponse {
    info!(username = %admin.username, "Admin logged out");
    (jar.remove(clear_session_cookie()), Redirect::to("/"))
}

async fn authenticate<C: ConnectionTrait>(
    db: &C,
    form: &LoginForm,
) -> Result<Option<user::Model>, AppError> {
    if form.is_blank() {
        return Ok(None);
    }

    let Some(user) = user::Entity::find()
        .filter(user::Column::Username.eq(form.username.as_str()))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let is_valid = hash::verify_password(&form.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    Ok(is_valid.then_some(user))
}
