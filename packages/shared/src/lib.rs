//! Utilities shared by the Hanare server and client.

pub mod logger;
pub mod time;
