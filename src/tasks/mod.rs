//! Task CRUD endpoints, gated behind bearer-token authentication.

pub mod handlers;
