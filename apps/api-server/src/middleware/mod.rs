//! Middleware modules.

pub mod content_type;
pub mod error;

pub use content_type::ContentTypeValidator;
