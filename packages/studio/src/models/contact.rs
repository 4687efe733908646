use serde::Deserialize;

/// Public contact form. Missing fields are stored as empty text.
#[derive(Deserialize, Default)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}
