//! Command-line client: calls the API, renders results, and keeps a local
//! history next to the stored session.

pub mod api;
pub mod commands;
pub mod history;
pub mod local_storage;
