pub mod config;
pub mod logging;

pub mod downloader;
pub mod filter;
pub mod info;
pub mod placeholder;
pub mod run;
pub mod status_log;
