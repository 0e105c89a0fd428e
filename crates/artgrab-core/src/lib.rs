pub mod config;
pub mod logging;

pub mod artwork;
pub mod catalog;
pub mod history;
pub mod proxy;
pub mod session;
