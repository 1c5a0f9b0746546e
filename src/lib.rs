//! Schema, entities and store for the video catalog.
//!
//! The `migration` crate owns the table definitions; this crate maps them to
//! SeaORM entities and exposes services that enforce the field rules of the
//! catalog (lengths, slugs, system-set counters, delete protection).

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod persistence;
mod repository;
pub mod service;
