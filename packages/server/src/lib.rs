//! Hanare chat relay server
//!
//! A single, access-code protected chat room for a small fixed number of users.
//! Messages live only in memory: text for ten minutes, images for one.

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
