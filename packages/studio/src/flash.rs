//! One-shot status messages shown on the page rendered after a redirect.
//!
//! The cookie only ever carries a [`Flash`] code, so a tampered cookie can at
//! worst select a different canned message.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const FLASH_COOKIE: &str = "studio_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    AccessDenied,
    MessageSent,
    MessageSavedNotEmailed,
    ProfileSaved,
    UploadRejected,
    InvalidCounters,
    IncompleteForm,
    ProjectCreated,
    ProjectRemoved,
    SocialCreated,
    SocialRemoved,
}

impl Flash {
    pub const ALL: [Flash; 11] = [
        Flash::AccessDenied,
        Flash::MessageSent,
        Flash::MessageSavedNotEmailed,
        Flash::ProfileSaved,
        Flash::UploadRejected,
        Flash::InvalidCounters,
        Flash::IncompleteForm,
        Flash::ProjectCreated,
        Flash::ProjectRemoved,
        Flash::SocialCreated,
        Flash::SocialRemoved,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::AccessDenied => "access_denied",
            Self::MessageSent => "message_sent",
            Self::MessageSavedNotEmailed => "message_saved_not_emailed",
            Self::ProfileSaved => "profile_saved",
            Self::UploadRejected => "upload_rejected",
            Self::InvalidCounters => "invalid_counters",
            Self::IncompleteForm => "incomplete_form",
            Self::ProjectCreated => "project_created",
            Self::ProjectRemoved => "project_removed",
            Self::SocialCreated => "social_created",
            Self::SocialRemoved => "social_removed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::AccessDenied => "ACCESS_DENIED: Invalid Credentials",
            Self::MessageSent => "COMMUNICATION_ESTABLISHED: Message sent successfully.",
            Self::MessageSavedNotEmailed => {
                "SYSTEM_ERROR: Message saved but email failed to transmit."
            }
            Self::ProfileSaved => "SYSTEM_SYNC: Calibration data secured.",
            Self::UploadRejected => {
                "UPLOAD_REJECTED: Only png, jpg, jpeg, gif and webp images are accepted. Previous image kept."
            }
            Self::InvalidCounters => {
                "VALIDATION_ERROR: Project counters must be whole numbers. Nothing was saved."
            }
            Self::IncompleteForm => "VALIDATION_ERROR: Required fields are missing.",
            Self::ProjectCreated => "PROJECT_DEPLOYED: Archive entry created.",
            Self::ProjectRemoved => "PROJECT_REMOVED: Archive entry deleted.",
            Self::SocialCreated => "LINK_ESTABLISHED: Social channel secured.",
            Self::SocialRemoved => "LINK_TERMINATED: Social connection severed.",
        }
    }

    /// CSS modifier for the flash banner.
    pub fn kind(self) -> &'static str {
        match self {
            Self::AccessDenied
            | Self::MessageSavedNotEmailed
            | Self::UploadRejected
            | Self::InvalidCounters
            | Self::IncompleteForm => "error",
            _ => "success",
        }
    }
}

/// Queue `flash` for the next rendered page. `secure` follows `auth.secure_cookies`.
pub fn set(jar: CookieJar, flash: Flash, secure: bool) -> CookieJar {
    jar.add(
        Cookie::build(Cookie::new(FLASH_COOKIE, flash.code()))
            .path("/")
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax)
            .build(),
    )
}

/// Read and clear the pending flash, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(code) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(Cookie::new(FLASH_COOKIE, "")).path("/").build());
    (jar, Flash::from_code(&code))
}
