//! # Blog Core
//!
//! The domain layer of the blog service.
//! This crate contains the post model, the repository port and the post
//! service, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
