//! Route handlers.

pub mod download;
pub mod search;
