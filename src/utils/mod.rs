//! Utility modules for the site generator.

pub mod hash;
pub mod log;
pub mod minify;
