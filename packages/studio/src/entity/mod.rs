pub mod about;
pub mod contact_message;
pub mod project;
pub mod social;
pub mod user;
