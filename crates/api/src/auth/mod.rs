//! Session-token, password, and cookie helpers for authentication.

pub mod cookie;
pub mod jwt;
pub mod password;
