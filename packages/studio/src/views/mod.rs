//! Server-rendered pages. Templates live in `templates/`.

use askama::Template;
use axum::response::Html;
use chrono::{Datelike, Utc};

use crate::entity::{contact_message, project, social};
use crate::error::AppError;
use crate::flash::Flash;
use crate::profile::Profile;

/// Data every page layout needs.
pub struct PageContext {
    pub flash: Option<Flash>,
    pub profile: Profile,
    pub year: i32,
}

impl PageContext {
    pub fn new(flash: Option<Flash>, profile: Profile) -> Self {
        Self {
            flash,
            profile,
            year: Utc::now().year(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    pub page: PageContext,
    pub projects: Vec<project::Model>,
    pub socials: Vec<social::Model>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub page: PageContext,
    pub socials: Vec<social::Model>,
}

#[derive(Template)]
#[template(path = "project.html")]
pub struct ProjectPage {
    pub page: PageContext,
    pub project: project::Model,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminPage {
    pub page: PageContext,
    pub username: String,
    pub projects: Vec<project::Model>,
    pub socials: Vec<social::Model>,
    pub messages: Vec<contact_message::Model>,
}

/// Standalone error page; rendered without database access.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub code: &'static str,
    pub message: String,
}

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}
