//! Core types and frame inspection for the meshlan data plane.
//!
//! This crate holds the leaf abstractions the routing engine is built on:
//! destination addresses, CIDR network prefixes with the route-table
//! ordering, the opaque port and group identities, and the pure IPv4/IPv6
//! header decoders that extract a destination address from a raw frame.

pub mod address;
pub mod error;
pub mod frame;
pub mod prefix;
pub mod types;

pub use address::{Address, AddressFamily};
pub use error::PrefixError;
pub use prefix::NetworkPrefix;
pub use types::{GroupTag, PortIndex};
