//! Opaque identities used across the routing engine.
//!
//! These newtypes prevent accidental mixing of port indices, group tags,
//! and plain integers that happen to share a representation.

use std::fmt;

/// Identity of a port within a registry.
///
/// Indices are allocated by the registry and never reused, so a stale
/// index held after deregistration can never alias a later port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use]
pub struct PortIndex(pub u64);

impl fmt::Display for PortIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tenant/ownership tag attached to a port.
///
/// Two ports sharing a tag belong to the same tenant; traffic between
/// them is gated by the routing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use]
pub struct GroupTag(pub u32);

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_index_ordering() {
        assert!(PortIndex(0) < PortIndex(1));
        assert!(PortIndex(41) < PortIndex(42));
        assert_eq!(PortIndex(7), PortIndex(7));
    }

    #[test]
    fn display_is_plain_number() {
        assert_eq!(format!("{}", PortIndex(12)), "12");
        assert_eq!(format!("{}", GroupTag(3)), "3");
    }

    #[test]
    fn group_tags_compare_by_value() {
        assert_eq!(GroupTag(1), GroupTag(1));
        assert_ne!(GroupTag(1), GroupTag(2));
    }
}
