//! HTTP backend for the medication reminder mobile app.
//!
//! A thin layer over a document store: per-user CRUD for medications,
//! dose frequencies, appointments, settings, emergency contacts and
//! notifications, plus an SMS emergency broadcast and a user directory
//! sourced from the identity provider.

pub mod api;
pub mod config;
pub mod directory;
pub mod models;
pub mod reconcile;
pub mod sms;
pub mod store;
