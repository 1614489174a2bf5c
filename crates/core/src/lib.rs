//! Domain logic for the lead capture service.
//!
//! Everything in this crate is free of HTTP and database concerns: field
//! sanitization, anti-forgery tokens, the submission pipeline, form
//! rendering, and the record store adapter trait that persistence crates
//! implement.

pub mod client;
pub mod directive;
pub mod error;
pub mod form;
pub mod lead;
pub mod nonce;
pub mod roles;
pub mod sanitize;
pub mod search;
pub mod store;
pub mod submission;
pub mod types;
