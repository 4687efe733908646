use serde::Deserialize;

/// Login form body.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Blank input is answered like any other failed login.
    pub fn is_blank(&self) -> bool {
        self.username.trim().is_empty() || self.password.is_empty()
    }
}
