//! The `missionboard` library crate.
//!
//! Missionboard is a personal task tracking backend: users register, log in,
//! and manage an ownership-scoped list of prioritized tasks ("mission logs").
//! This crate holds the domain models, the authentication stack (password
//! hashing, token issuance/verification, the auth middleware), the store
//! collaborator traits with their Postgres and in-memory implementations,
//! the HTTP route handlers, and the error taxonomy. The binary (`main.rs`)
//! wires these together into an actix-web server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
