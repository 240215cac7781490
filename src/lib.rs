//! docroot - single-connection static file server
//!
//! Core library for request validation and response construction.

pub mod config;
pub mod http;
pub mod log;
pub mod server;
