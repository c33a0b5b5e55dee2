//! Request middleware.

pub mod login_config;
