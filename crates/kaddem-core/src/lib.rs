//! Core types, store traits and the contract service for Kaddem.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends (e.g. `kaddem-store-sqlite`) implement the traits in
//! [`store`]; [`service::ContratService`] is written against those traits only.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contrat;
pub mod error;
pub mod etudiant;
pub mod service;
pub mod store;

pub use error::{Error, Result};
