//! # IO Layer
//!
//! Transport adapters around the domain. Currently a JSON REST API.

pub mod rest;
