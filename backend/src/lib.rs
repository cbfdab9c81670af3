//! Tourbook - tour booking backend
//!
//! Routes, days, prices and reviews over SQLite, exposed through GraphQL at
//! /graphql and a small REST surface under /api.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod graphql;
pub mod orm;
pub mod services;
pub mod validation;

pub use app::{AppState, build_app};
