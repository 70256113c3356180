//! Shared OpenAPI schema dialect tooling.
//!
//! This crate is intended to be used by fixture servers that generate their
//! OpenAPI document in the 3.1 nullable-union convention but need to serve it
//! to clients that only understand 3.0.3.
//!
//! It intentionally contains **no** HTTP plumbing and **no** fixture-specific
//! route knowledge.

pub mod downgrade;
