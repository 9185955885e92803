pub mod account;
pub mod achievements;
pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod group;
pub mod recovery;
pub mod support;
