//! Authentication module for the taskboard server
//!
//! This module handles the session/token lifecycle: issuing and verifying
//! the two token classes, persisting refresh tokens, and the HTTP surface
//! that carries them.

mod extractor;
mod service;
mod tokens;

pub mod handlers;

pub use extractor::AuthUser;
pub use service::{AuthService, SessionTokens};
pub use tokens::{AccessClaims, Claims, RefreshClaims, TokenCodec};
