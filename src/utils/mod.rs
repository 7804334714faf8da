//! Shared utilities: hashing, slugs, minification.

pub mod hash;
pub mod minify;
pub mod slug;
