pub mod api;
pub mod busy;
pub mod cli;
pub mod config;
pub mod dialog;
pub mod error;
pub mod models;
pub mod pages;
pub mod render;
pub mod session;
pub mod types;

pub use error::{ClientError, ClientResult};
