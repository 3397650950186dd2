//! Address-range model for reverse DNS sweeps.
//!
//! This crate provides the foundational type of the lookup pipeline:
//!
//! - **[`AddrRange`]**: a contiguous, inclusive span of IPv4 or IPv6
//!   addresses, constructed from explicit bounds, CIDR notation, or text
//! - **Errors**: typed construction failures with [`RangeError`]
//!
//! Ranges are immutable values. Enumeration is lazy and ascending: a /8 (or
//! an IPv6 block of any size) is never materialized, only a cursor advances.
//!
//! # Example
//!
//! ```rust
//! use rdns_core::AddrRange;
//!
//! let range = AddrRange::parse("192.0.2.0/30")?;
//! for addr in &range {
//!     println!("{addr}");
//! }
//! # Ok::<(), rdns_core::RangeError>(())
//! ```

mod error;
mod range;

pub use error::{RangeError, Result};
pub use range::{AddrIter, AddrRange, Family};
