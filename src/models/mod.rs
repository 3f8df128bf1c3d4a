// src/models/mod.rs

//! Domain models for the editorial content core.
//!
//! This module contains all data structures used throughout the
//! application, organized by their primary purpose.

mod article;
mod body;
mod media;

// Re-export all public types
pub use article::{Article, ArticleStatus};
pub use body::{
    ArticleBody, ContentItem, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, Paragraph, Span,
};
pub use media::{Media, MediaEntry, MediaIndex};
