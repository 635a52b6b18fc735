//! chatfunnel — signup funnel core for a hosted chatbot platform.

pub mod chat;
pub mod config;
pub mod error;
pub mod funnel;
pub mod plans;
pub mod store;
