pub mod api;
pub mod config;
pub mod dispatcher;
pub mod prompt;
