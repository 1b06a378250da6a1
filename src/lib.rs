pub mod archive;
pub mod config;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod metadata;
pub mod notice;
pub mod package;
pub mod ui;

pub use error::{PackageError, Result};
