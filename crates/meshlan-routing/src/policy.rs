//! Routing policy record.

/// Policy knobs the router consults per lookup.
///
/// A plain value: swapping a new one in is atomic from the router task's
/// point of view and leaves the compiled route table untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingPolicy {
    /// Relay frames between two ports that share a group.
    ///
    /// When disabled, a frame whose route lands on a port in the source's
    /// own group is dropped: peers of one tenant are expected to talk to
    /// each other directly instead of through this node.
    pub client_routing_enabled: bool,
}

impl RoutingPolicy {
    pub fn new(client_routing_enabled: bool) -> Self {
        Self {
            client_routing_enabled,
        }
    }
}
