//! # Tareas Shared Library
//!
//! Models, persistence and credential logic used by the API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and the credential store
//! - `auth`: Password hashing and registration/login flows
//! - `db`: Connection pool and schema initialization

pub mod auth;
pub mod db;
pub mod models;
