//! Destination addresses extracted from routed frames.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Address family of a frame, address, or prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

/// A destination address carried inside a routed frame.
///
/// The family is part of the value: a v4 address never compares equal to
/// a v6 address and never matches a v6 prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Address {
    V4(Ipv4Addr),
    V6(Ipv6Addr),
}

impl Address {
    pub fn family(&self) -> AddressFamily {
        match self {
            Address::V4(_) => AddressFamily::V4,
            Address::V6(_) => AddressFamily::V6,
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address::V4(addr)
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Address::V6(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::V4(addr) => addr.fmt(f),
            Address::V6(addr) => addr.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_matches_variant() {
        let v4 = Address::from(Ipv4Addr::new(10, 0, 0, 1));
        let v6 = Address::from(Ipv6Addr::LOCALHOST);
        assert_eq!(v4.family(), AddressFamily::V4);
        assert_eq!(v6.family(), AddressFamily::V6);
    }

    #[test]
    fn display_uses_standard_notation() {
        let v4 = Address::V4(Ipv4Addr::new(192, 0, 2, 1));
        assert_eq!(format!("{v4}"), "192.0.2.1");

        let v6 = Address::V6("2001:db8::1".parse().unwrap());
        assert_eq!(format!("{v6}"), "2001:db8::1");
    }

    #[test]
    fn families_never_compare_equal() {
        // ::ffff:10.0.0.1 is a v6 address even though it embeds a v4 one.
        let mapped: Ipv6Addr = Ipv4Addr::new(10, 0, 0, 1).to_ipv6_mapped();
        assert_ne!(Address::V6(mapped), Address::V4(Ipv4Addr::new(10, 0, 0, 1)));
    }
}
