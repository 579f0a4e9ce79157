//! CIDR network prefixes and their route-table ordering.

use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use ipnet::{IpNet, Ipv4Net, Ipv6Net};

use crate::address::{Address, AddressFamily};
use crate::error::PrefixError;

/// A network prefix over either address family.
///
/// Prefixes are canonical: host bits below the prefix length are zeroed
/// at construction, so two prefixes covering the same network compare
/// equal regardless of how they were written.
///
/// The total order is (family, network address, longest prefix first),
/// which is the native iteration order of the route table: within a
/// family, more specific routes come before less specific ones that
/// share a network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct NetworkPrefix(Net);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Net {
    V4(Ipv4Net),
    V6(Ipv6Net),
}

impl NetworkPrefix {
    /// Build a v4 prefix, zeroing host bits.
    pub fn v4(addr: Ipv4Addr, prefix_len: u8) -> Result<Self, PrefixError> {
        Ipv4Net::new(addr, prefix_len)
            .map(Into::into)
            .map_err(|_| PrefixError::LengthOutOfRange {
                len: prefix_len,
                family: AddressFamily::V4,
            })
    }

    /// Build a v6 prefix, zeroing host bits.
    pub fn v6(addr: Ipv6Addr, prefix_len: u8) -> Result<Self, PrefixError> {
        Ipv6Net::new(addr, prefix_len)
            .map(Into::into)
            .map_err(|_| PrefixError::LengthOutOfRange {
                len: prefix_len,
                family: AddressFamily::V6,
            })
    }

    pub fn family(&self) -> AddressFamily {
        match self.0 {
            Net::V4(_) => AddressFamily::V4,
            Net::V6(_) => AddressFamily::V6,
        }
    }

    /// The canonical network address (host bits zero).
    pub fn network(&self) -> Address {
        match self.0 {
            Net::V4(net) => Address::V4(net.network()),
            Net::V6(net) => Address::V6(net.network()),
        }
    }

    #[must_use]
    pub fn prefix_len(&self) -> u8 {
        match self.0 {
            Net::V4(net) => net.prefix_len(),
            Net::V6(net) => net.prefix_len(),
        }
    }

    /// Whether `addr` lies inside this prefix.
    ///
    /// An address of the other family never matches. A zero-length prefix
    /// matches every address of its family; a full-length prefix matches
    /// exactly its host.
    #[must_use]
    pub fn contains(&self, addr: &Address) -> bool {
        match (&self.0, addr) {
            (Net::V4(net), Address::V4(a)) => net.contains(a),
            (Net::V6(net), Address::V6(a)) => net.contains(a),
            _ => false,
        }
    }

    /// Key realizing the (family, address, longest-first) order.
    fn order_key(&self) -> (AddressFamily, u128, Reverse<u8>) {
        match self.0 {
            Net::V4(net) => (
                AddressFamily::V4,
                u128::from(u32::from(net.network())),
                Reverse(net.prefix_len()),
            ),
            Net::V6(net) => (
                AddressFamily::V6,
                u128::from(net.network()),
                Reverse(net.prefix_len()),
            ),
        }
    }
}

impl From<Ipv4Net> for NetworkPrefix {
    fn from(net: Ipv4Net) -> Self {
        NetworkPrefix(Net::V4(net.trunc()))
    }
}

impl From<Ipv6Net> for NetworkPrefix {
    fn from(net: Ipv6Net) -> Self {
        NetworkPrefix(Net::V6(net.trunc()))
    }
}

impl From<IpNet> for NetworkPrefix {
    fn from(net: IpNet) -> Self {
        match net {
            IpNet::V4(net) => net.into(),
            IpNet::V6(net) => net.into(),
        }
    }
}

impl Ord for NetworkPrefix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for NetworkPrefix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for NetworkPrefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<IpNet>()
            .map(Into::into)
            .map_err(|source| PrefixError::Parse {
                input: s.to_string(),
                source,
            })
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Net::V4(net) => net.fmt(f),
            Net::V6(net) => net.fmt(f),
        }
    }
}
