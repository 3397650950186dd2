//! # rdns-cli
//!
//! Command-line front end of the rdns-lookup pipeline:
//!
//! - parses range arguments (single address, inclusive range, CIDR, `@file`)
//! - fans PTR lookups out over a bounded, order-preserving stream
//! - stages `(ip, hostname)` hits as CSV in a temp file
//! - uploads the finished file to the cluster

pub mod cli;
pub mod report;
pub mod resolver;

pub use cli::run;
