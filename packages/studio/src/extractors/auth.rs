use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::EntityTrait;

use crate::config::AuthConfig;
use crate::entity::user;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

pub const SESSION_COOKIE: &str = "studio_session";

/// The logged-in administrator, resolved from the session cookie.
///
/// Add this as a handler parameter to require a login; requests without a
/// valid session are redirected to `/login`.
#[derive(Debug)]
pub struct AdminUser {
    pub user_id: i32,
    pub username: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .ok_or(AppError::Unauthenticated)?;

        let claims = jwt::verify(&token, &state.config.auth.secret_key)
            .map_err(|_| AppError::Unauthenticated)?;

        // The account may have been removed since the token was issued.
        let user = user::Entity::find_by_id(claims.uid)
            .one(&state.db)
            .await?
            .filter(|u| u.username == claims.sub)
            .ok_or(AppError::Unauthenticated)?;

        Ok(AdminUser {
            user_id: user.id,
            username: user.username,
        })
    }
}

pub fn session_cookie(token: String, auth: &AuthConfig) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(auth.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(auth.session_ttl_hours))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .build()
}
