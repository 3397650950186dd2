use std::net::IpAddr;
use thiserror::Error;

/// Result type alias for range construction
pub type Result<T> = std::result::Result<T, RangeError>;

/// Errors that can occur when constructing an address range
///
/// All variants are deterministic input errors, detected synchronously at
/// construction time. None of them is retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// The text is not a literal IPv4 or IPv6 address
    #[error("invalid IP address: {text:?}")]
    InvalidAddress {
        /// The offending address text
        text: String,
    },

    /// The endpoints of an inclusive range belong to different families
    #[error("range endpoints are different address families: {begin} and {end}")]
    MismatchedFamily {
        /// Lower endpoint as given
        begin: IpAddr,
        /// Upper endpoint as given
        end: IpAddr,
    },

    /// CIDR prefix length is not a number or exceeds the family's bit width
    #[error("invalid CIDR prefix length: {text:?} (maximum {max} for this family)")]
    InvalidPrefixLength {
        /// The offending prefix text
        text: String,
        /// Largest valid prefix for the address family
        max: u32,
    },
}
