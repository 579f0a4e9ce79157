//! Best-effort layer-3 frame inspection.
//!
//! The decoders here answer one question about an untrusted byte buffer:
//! what destination address does it carry? They are pure functions over
//! the buffer, validate only as much of the header as that question
//! needs, and never allocate. Malformed input is indistinguishable from
//! input of the wrong family: both yield `None`.

pub mod ipv4;
pub mod ipv6;

use crate::address::Address;

/// Extract the destination address from a frame.
///
/// IPv4 is attempted first because it dominates typical traffic; IPv6 is
/// tried on failure. `None` means the frame is neither and should be
/// dropped.
#[must_use]
pub fn destination(frame: &[u8]) -> Option<Address> {
    if let Some(dst) = ipv4::destination(frame) {
        return Some(Address::V4(dst));
    }
    ipv6::destination(frame).map(Address::V6)
}
