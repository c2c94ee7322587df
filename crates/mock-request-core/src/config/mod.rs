//! Loading and writing fixture indexes and matcher settings.

pub mod error;
pub mod index;
pub mod parser;
pub mod settings;
