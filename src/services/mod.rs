// src/services/mod.rs

//! Application services orchestrating the core over I/O collaborators.

pub mod curate;
pub mod import;

pub use curate::FrontPageCurator;
pub use import::{AccessTokenProvider, DocumentImporter, ImportOutcome, StaticTokenProvider};
