//! Helpers for exercising ports and routers in tests.
//!
//! These build well-formed frames and manually drained ports so routing
//! behavior can be asserted deterministically, without timers or real
//! transports. Panics on malformed input are deliberate: the inputs are
//! test fixtures.

use std::net::{Ipv4Addr, Ipv6Addr};

use tokio::sync::{mpsc, oneshot};

use meshlan_core::{GroupTag, NetworkPrefix, PortIndex};

use crate::error::WriteError;
use crate::port::{DEFAULT_QUEUE_DEPTH, FrameSink, FrameWrite, Port};
use crate::router::Router;

/// Parse a CIDR literal.
pub fn prefix(s: &str) -> NetworkPrefix {
    s.parse().expect("invalid prefix literal")
}

/// A minimal well-formed IPv4 packet addressed to `dst`.
pub fn ipv4_frame(dst: &str) -> Vec<u8> {
    let dst: Ipv4Addr = dst.parse().expect("invalid IPv4 literal");
    let mut p = vec![0u8; 28];
    p[0] = 0x45;
    let total_len = (p.len() as u16).to_be_bytes();
    p[2] = total_len[0];
    p[3] = total_len[1];
    p[8] = 64;
    p[9] = 17;
    p[12..16].copy_from_slice(&[192, 0, 2, 1]);
    p[16..20].copy_from_slice(&dst.octets());
    p
}

/// A minimal well-formed IPv6 packet addressed to `dst`.
pub fn ipv6_frame(dst: &str) -> Vec<u8> {
    let dst: Ipv6Addr = dst.parse().expect("invalid IPv6 literal");
    let mut p = vec![0u8; 48];
    p[0] = 0x60;
    p[4..6].copy_from_slice(&8u16.to_be_bytes());
    p[6] = 17;
    p[7] = 64;
    let src: Ipv6Addr = "2001:db8::1".parse().expect("source literal");
    p[8..24].copy_from_slice(&src.octets());
    p[24..40].copy_from_slice(&dst.octets());
    p
}

/// Build a port whose write queue the test drains by hand.
pub fn manual_port(
    name: &str,
    group: GroupTag,
    routes: &[&str],
) -> (Port, mpsc::Receiver<FrameWrite>) {
    let (sink, rx) = FrameSink::channel(DEFAULT_QUEUE_DEPTH);
    let routes = routes.iter().map(|s| prefix(s)).collect();
    (Port::new(name, group, routes, sink), rx)
}

/// Dispatch a frame and wait for its completion outcome.
///
/// Returns `None` when the router dropped the frame: the completion
/// channel closes without ever carrying a value. Requires a pump to be
/// draining the destination port.
pub async fn dispatch_and_wait(
    router: &mut Router,
    source: PortIndex,
    frame: Vec<u8>,
) -> Option<Result<(), WriteError>> {
    let (tx, rx) = oneshot::channel();
    router.dispatch(source, frame, tx);
    rx.await.ok()
}
