pub mod classify;
pub mod config;
pub mod jobs;
pub mod models;
pub mod normalize;
pub mod store;
pub mod utils;
pub mod warn_import;
