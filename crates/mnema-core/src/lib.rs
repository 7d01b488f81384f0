//! # mnema-core
//!
//! Core types, traits, and abstractions for the mnema vocabulary service.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other mnema crates depend on.

pub mod defaults;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod mem;
pub mod models;
pub mod sort;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use ingest::ingest_words;
pub use mem::MemWordRepository;
pub use models::*;
pub use sort::{Pagination, SortDirection, SortKey, SortSpec, SortType};
pub use traits::*;
