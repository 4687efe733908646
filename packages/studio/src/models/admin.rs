use thiserror::Error;

use crate::entity::project::DEFAULT_SPAN;
use crate::extractors::form::{AdminForm, UploadedFile};
use crate::flash::Flash;
use crate::profile::{Counters, ProfileUpdate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("'{field}' must be a non-negative whole number, got '{value}'")]
    InvalidCounter { field: &'static str, value: String },

    #[error("unrecognised admin action")]
    UnknownAction,
}

impl FormError {
    pub fn flash(&self) -> Flash {
        match self {
            Self::InvalidCounter { .. } => Flash::InvalidCounters,
            Self::MissingField(_) | Self::UnknownAction => Flash::IncompleteForm,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub tag: String,
    pub description: String,
    pub span: String,
    pub live_link: Option<String>,
    pub repo_link: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct NewSocial {
    pub platform: String,
    pub url: String,
}

/// Profile form: text changes plus optional image files still to be stored.
#[derive(Debug)]
pub struct ProfileSubmission {
    pub update: ProfileUpdate,
    pub profile_file: Option<UploadedFile>,
    pub logo_file: Option<UploadedFile>,
}

/// One submission of the admin dashboard.
#[derive(Debug)]
pub enum AdminAction {
    UpdateProfile(ProfileSubmission),
    CreateProject(NewProject),
    CreateSocial(NewSocial),
}

impl AdminAction {
    /// Pick the action by its marker field, in dashboard order, and validate it.
    pub fn from_form(mut form: AdminForm) -> Result<Self, FormError> {
        if form.has("update_about") {
            let update = ProfileUpdate {
                full_name: optional_text(&form, "full_name"),
                stack_list: form.field("stack_list").map(non_blank),
                bio_content: form.field("bio_content").map(non_blank),
                profile_img: None,
                logo_url: None,
                counters: Counters {
                    completed: parse_counter("completed", form.field("completed"))?,
                    progress: parse_counter("progress", form.field("progress"))?,
                    hosted: parse_counter("hosted", form.field("hosted"))?,
                },
            };
            return Ok(Self::UpdateProfile(ProfileSubmission {
                update,
                profile_file: form.take_file("profile_file"),
                logo_file: form.take_file("logo_file"),
            }));
        }

        if form.has("title") {
            let title = required_text(&form, "title")?;
            let tag = form
                .field("tag")
                .ok_or(FormError::MissingField("tag"))?
                .trim()
                .to_string();
            let description = form
                .field("desc")
                .ok_or(FormError::MissingField("desc"))?
                .to_string();
            let span = optional_text(&form, "span").unwrap_or_else(|| DEFAULT_SPAN.to_string());
            return Ok(Self::CreateProject(NewProject {
                title,
                tag,
                description,
                span,
                live_link: optional_text(&form, "live_link"),
                repo_link: optional_text(&form, "repo_link"),
            }));
        }

        if form.has("platform") {
            return Ok(Self::CreateSocial(NewSocial {
                platform: required_text(&form, "platform")?,
                url: required_text(&form, "url")?,
            }));
        }

        Err(FormError::UnknownAction)
    }
}

/// Blank or absent counters count as zero; anything else must parse.
pub fn parse_counter(field: &'static str, raw: Option<&str>) -> Result<i32, FormError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<i32>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| FormError::InvalidCounter {
            field,
            value: raw.to_string(),
        })
}

fn required_text(form: &AdminForm, name: &'static str) -> Result<String, FormError> {
    optional_text(form, name).ok_or(FormError::MissingField(name))
}

fn optional_text(form: &AdminForm, name: &str) -> Option<String> {
    form.field(name).and_then(non_blank)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
