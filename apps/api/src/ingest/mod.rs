//! Résumé uploads: file bytes to text, and text to a name/contact profile.

pub mod handlers;
pub mod profile;
pub mod text;
