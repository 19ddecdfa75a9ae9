//! wonderlens - Photo journal of everyday wonder
//!
//! Captured moments (an image, the prompt it answered and a reflection) are
//! kept in an entry store persisted to key-value storage, with hashtag
//! tagging, a daily rotating prompt, and calendar and weekly insights.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::WonderError;
