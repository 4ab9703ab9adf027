pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod progress;
pub mod review;
pub mod source;
pub mod suggest;
pub mod summary;
pub mod wizard;
pub mod workspace;
