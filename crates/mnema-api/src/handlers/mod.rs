//! Handler modules for mnema-api.

pub mod auth;
pub mod counters;
pub mod system;
pub mod words;
