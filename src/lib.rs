pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod optimize;
pub mod report;
pub mod system;
