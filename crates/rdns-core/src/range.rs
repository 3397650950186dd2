//! Contiguous IP address ranges with lazy ascending iteration.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::{RangeError, Result};

/// Address family of a range
///
/// A range never mixes families: every address it yields has the same byte
/// width, 4 for IPv4 or 16 for IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// IPv4, 4 bytes / 32 bits
    V4,
    /// IPv6, 16 bytes / 128 bits
    V6,
}

impl Family {
    /// Family of the given address
    #[must_use]
    pub const fn of(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }

    /// Byte width of an address in this family
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::V4 => 4,
            Self::V6 => 16,
        }
    }

    /// Bit width of an address in this family
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::V4 => 32,
            Self::V6 => 128,
        }
    }

    /// Unsigned big-endian magnitude of an address
    ///
    /// IPv4 magnitudes occupy the low 32 bits; the value is always
    /// `< 2^(width * 8)`.
    const fn magnitude(addr: IpAddr) -> u128 {
        match addr {
            IpAddr::V4(v4) => v4.to_bits() as u128,
            IpAddr::V6(v6) => v6.to_bits(),
        }
    }

    /// Render a magnitude back into an address of this family
    ///
    /// Magnitudes handed in here are `< 2^bits` by construction, so the
    /// conversion is exact.
    #[allow(clippy::cast_possible_truncation)]
    const fn render(self, value: u128) -> IpAddr {
        match self {
            Self::V4 => IpAddr::V4(Ipv4Addr::from_bits(value as u32)),
            Self::V6 => IpAddr::V6(Ipv6Addr::from_bits(value)),
        }
    }

    /// All-ones mask over the low `host_bits` bits
    const fn host_mask(host_bits: u32) -> u128 {
        if host_bits >= 128 {
            u128::MAX
        } else {
            (1u128 << host_bits) - 1
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// A contiguous, inclusive span of addresses of a single family
///
/// Immutable once constructed. Bounds are stored as inclusive u128
/// magnitudes; every enumeration starts a fresh cursor, so one range value
/// can be traversed any number of times, concurrently if desired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddrRange {
    family: Family,
    begin: u128,
    end: u128,
}

impl AddrRange {
    /// Range spanning `[begin, end]`, both endpoints included
    ///
    /// Fails with [`RangeError::MismatchedFamily`] when the endpoints have
    /// different byte widths. The bounds are *not* required to be ordered:
    /// when `end < begin` the resulting range is well-formed but iterates
    /// nothing, mirroring "count < 0 means no elements". Callers that want
    /// reversed bounds rejected must check before constructing.
    pub fn inclusive(begin: IpAddr, end: IpAddr) -> Result<Self> {
        let family = Family::of(begin);
        if family != Family::of(end) {
            return Err(RangeError::MismatchedFamily { begin, end });
        }

        Ok(Self {
            family,
            begin: Family::magnitude(begin),
            end: Family::magnitude(end),
        })
    }

    /// Range spanning the whole CIDR block containing `addr`
    ///
    /// Clears the low `bits - prefix` bits of the address to find the
    /// network address and spans through the all-ones host address. The
    /// network and broadcast addresses are both included; /31, /32, /127
    /// and /128 get no special treatment.
    ///
    /// Fails with [`RangeError::InvalidPrefixLength`] when `prefix` exceeds
    /// the family's bit width.
    pub fn cidr(addr: IpAddr, prefix: u32) -> Result<Self> {
        let family = Family::of(addr);
        if prefix > family.bits() {
            return Err(RangeError::InvalidPrefixLength {
                text: prefix.to_string(),
                max: family.bits(),
            });
        }

        let mask = Family::host_mask(family.bits() - prefix);
        let value = Family::magnitude(addr);

        Ok(Self {
            family,
            begin: value & !mask,
            end: value | mask,
        })
    }

    /// Parse a textual range
    ///
    /// Three notations are accepted:
    ///
    /// ```text
    /// <addr>             single address, range of size 1
    /// <addr>-<addr>      inclusive range, both ends the same family
    /// <addr>/<prefix>    CIDR block
    /// ```
    ///
    /// A `/` takes priority over `-` (split at the last `/`, addresses
    /// never contain one); a range splits at the first `-`. Address parts
    /// must be IPv4 or IPv6 literals.
    pub fn parse(text: &str) -> Result<Self> {
        if let Some(slash) = text.rfind('/') {
            let addr = parse_addr(&text[..slash])?;
            let prefix_text = &text[slash + 1..];
            let prefix = prefix_text
                .parse()
                .map_err(|_| RangeError::InvalidPrefixLength {
                    text: prefix_text.to_string(),
                    max: Family::of(addr).bits(),
                })?;
            return Self::cidr(addr, prefix);
        }

        if let Some((begin, end)) = text.split_once('-') {
            return Self::inclusive(parse_addr(begin)?, parse_addr(end)?);
        }

        let addr = parse_addr(text)?;
        Self::inclusive(addr, addr)
    }

    /// Address family of every element of this range
    #[must_use]
    pub const fn family(&self) -> Family {
        self.family
    }

    /// Whether iteration yields nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end < self.begin
    }

    /// Number of addresses in the range
    ///
    /// `None` only for the one unrepresentable case, the full 128-bit IPv6
    /// space (`::/0`), whose count is `2^128`.
    #[must_use]
    pub const fn size(&self) -> Option<u128> {
        if self.is_empty() {
            Some(0)
        } else {
            (self.end - self.begin).checked_add(1)
        }
    }

    /// Start a fresh ascending cursor over the range
    ///
    /// Each call returns an independent iterator; the range itself never
    /// mutates.
    #[must_use]
    pub const fn iter(&self) -> AddrIter {
        AddrIter {
            family: self.family,
            cursor: Some(self.begin),
            end: self.end,
        }
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "{}", self.family.render(self.begin))
        } else {
            write!(
                f,
                "{}-{}",
                self.family.render(self.begin),
                self.family.render(self.end)
            )
        }
    }
}

impl FromStr for AddrRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl IntoIterator for &AddrRange {
    type Item = IpAddr;
    type IntoIter = AddrIter;

    fn into_iter(self) -> AddrIter {
        self.iter()
    }
}

/// Lazy ascending iterator over an [`AddrRange`]
///
/// Holds only the family, a cursor, and the inclusive upper bound. The
/// cursor advances by checked increment, so the top of the address space
/// (255.255.255.255, or the all-ones IPv6 address) terminates cleanly
/// instead of wrapping.
#[derive(Debug, Clone)]
pub struct AddrIter {
    family: Family,
    cursor: Option<u128>,
    end: u128,
}

impl Iterator for AddrIter {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        let current = self.cursor?;
        if current > self.end {
            self.cursor = None;
            return None;
        }

        self.cursor = current.checked_add(1);
        Some(self.family.render(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.cursor {
            Some(current) if current <= self.end => (self.end - current).checked_add(1),
            _ => Some(0),
        };

        match remaining.and_then(|n| usize::try_from(n).ok()) {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl std::iter::FusedIterator for AddrIter {}

fn parse_addr(text: &str) -> Result<IpAddr> {
    text.parse().map_err(|_| RangeError::InvalidAddress {
        text: text.to_string(),
    })
}
