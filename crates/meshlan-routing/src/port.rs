//! Ports and their asynchronous write capability.
//!
//! A port is a directed sink for routed frames: it carries the group tag
//! and advertised routes the router reads, and a bounded write queue the
//! router feeds. Whatever drains the queue (a peer session, a virtual
//! interface adapter, a test harness) must deliver exactly one outcome
//! per dequeued write.

use std::fmt;

use tokio::sync::{mpsc, oneshot};

use meshlan_core::{GroupTag, NetworkPrefix};

use crate::error::WriteError;

/// Default depth of a port's write queue.
pub const DEFAULT_QUEUE_DEPTH: usize = 256;

/// One-shot completion for a frame write.
///
/// The sender is consumed on use, so an outcome can be delivered at most
/// once. A completion dropped without sending reports nothing; that is
/// the disposition of a dropped frame.
pub type WriteCompletion = oneshot::Sender<Result<(), WriteError>>;

/// A frame handed to a port for emission, paired with its completion.
#[derive(Debug)]
pub struct FrameWrite {
    pub frame: Vec<u8>,
    pub completion: WriteCompletion,
}

/// Sending half of a port's bounded write queue.
///
/// The queue is FIFO, so frames toward one port are emitted in the order
/// they were enqueued. A full queue is backpressure: the write completes
/// immediately with [`WriteError::Backlogged`] instead of blocking the
/// router.
#[derive(Debug, Clone)]
pub struct FrameSink {
    tx: mpsc::Sender<FrameWrite>,
}

impl FrameSink {
    /// Create a sink and the receiving half its pump drains.
    pub fn channel(depth: usize) -> (Self, mpsc::Receiver<FrameWrite>) {
        let (tx, rx) = mpsc::channel(depth);
        (Self { tx }, rx)
    }

    /// Enqueue a frame without blocking.
    ///
    /// On a full queue or a closed port the completion fires immediately
    /// with the corresponding error; otherwise the pump fires it once the
    /// frame has been emitted (or has failed to be).
    pub fn write(&self, frame: Vec<u8>, completion: WriteCompletion) {
        match self.tx.try_send(FrameWrite { frame, completion }) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(write)) => {
                let _ = write.completion.send(Err(WriteError::Backlogged));
            }
            Err(mpsc::error::TrySendError::Closed(write)) => {
                let _ = write.completion.send(Err(WriteError::PortClosed));
            }
        }
    }
}

/// A directed sink for routed frames.
///
/// The index identifying a port lives in the registry, not here; a port
/// learns its index at registration.
pub struct Port {
    name: String,
    group: GroupTag,
    local_routes: Vec<NetworkPrefix>,
    sink: FrameSink,
}

impl Port {
    pub fn new(
        name: impl Into<String>,
        group: GroupTag,
        local_routes: Vec<NetworkPrefix>,
        sink: FrameSink,
    ) -> Self {
        Self {
            name: name.into(),
            group,
            local_routes,
            sink,
        }
    }

    /// Human-readable name, used only in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> GroupTag {
        self.group
    }

    /// Prefixes this port accepts traffic for.
    pub fn local_routes(&self) -> &[NetworkPrefix] {
        &self.local_routes
    }

    pub(crate) fn set_local_routes(&mut self, routes: Vec<NetworkPrefix>) {
        self.local_routes = routes;
    }

    pub fn sink(&self) -> &FrameSink {
        &self.sink
    }
}

impl fmt::Debug for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Port({}, group {})", self.name, self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_enqueues_in_order() {
        let (sink, mut rx) = FrameSink::channel(4);

        let (tx1, _rx1) = oneshot::channel();
        let (tx2, _rx2) = oneshot::channel();
        sink.write(vec![1], tx1);
        sink.write(vec![2], tx2);

        assert_eq!(rx.try_recv().unwrap().frame, vec![1]);
        assert_eq!(rx.try_recv().unwrap().frame, vec![2]);
    }

    #[test]
    fn full_queue_completes_with_backlogged() {
        let (sink, _rx) = FrameSink::channel(1);

        let (tx1, mut rx1) = oneshot::channel();
        sink.write(vec![1], tx1);
        // Still queued, no outcome yet.
        assert!(rx1.try_recv().is_err());

        let (tx2, mut rx2) = oneshot::channel();
        sink.write(vec![2], tx2);
        assert_eq!(rx2.try_recv().unwrap(), Err(WriteError::Backlogged));
    }

    #[test]
    fn closed_queue_completes_with_port_closed() {
        let (sink, rx) = FrameSink::channel(1);
        drop(rx);

        let (tx, mut crx) = oneshot::channel();
        sink.write(vec![1], tx);
        assert_eq!(crx.try_recv().unwrap(), Err(WriteError::PortClosed));
    }

    #[test]
    fn port_accessors() {
        let (sink, _rx) = FrameSink::channel(1);
        let routes = vec!["10.0.0.0/24".parse().unwrap()];
        let port = Port::new("tap0", GroupTag(7), routes.clone(), sink);

        assert_eq!(port.name(), "tap0");
        assert_eq!(port.group(), GroupTag(7));
        assert_eq!(port.local_routes(), routes.as_slice());
        assert_eq!(format!("{port:?}"), "Port(tap0, group 7)");
    }
}
