//! Frame dispatch: select a destination port and hand off the write.

use tracing::{debug, trace};

use meshlan_core::{Address, NetworkPrefix, PortIndex, frame};

use crate::policy::RoutingPolicy;
use crate::port::{Port, WriteCompletion};
use crate::registry::PortRegistry;
use crate::table::RouteTable;

/// The routing façade.
///
/// Owns the port registry, the policy record, and the lazily recompiled
/// route table. A router is confined to one task: every method takes
/// `&mut self` and nothing here locks.
#[derive(Debug)]
pub struct Router {
    ports: PortRegistry,
    policy: RoutingPolicy,
    /// Compiled route table; `None` means invalidated.
    routes: Option<RouteTable>,
}

impl Router {
    pub fn new(policy: RoutingPolicy) -> Self {
        Self {
            ports: PortRegistry::new(),
            policy,
            routes: None,
        }
    }

    /// Register a port. Invalidates the route table.
    pub fn register_port(&mut self, port: Port) -> PortIndex {
        self.routes = None;
        let index = self.ports.register(port);
        debug!(%index, "port registered");
        index
    }

    /// Remove a port. Invalidates the route table.
    ///
    /// Frames already sitting in the port's write queue drain through its
    /// pump; the router enqueues nothing further for this index.
    pub fn deregister_port(&mut self, index: PortIndex) -> Option<Port> {
        self.routes = None;
        let port = self.ports.deregister(index);
        if port.is_some() {
            debug!(%index, "port deregistered");
        }
        port
    }

    /// Replace a port's advertised routes. Invalidates the route table.
    ///
    /// Returns false when the index is not registered.
    pub fn set_port_routes(&mut self, index: PortIndex, routes: Vec<NetworkPrefix>) -> bool {
        match self.ports.get_mut(index) {
            Some(port) => {
                port.set_local_routes(routes);
                self.routes = None;
                true
            }
            None => false,
        }
    }

    /// Swap the routing policy.
    ///
    /// Policy is evaluated per lookup, so the compiled route table stays
    /// valid across swaps.
    pub fn set_policy(&mut self, policy: RoutingPolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> RoutingPolicy {
        self.policy
    }

    pub fn ports(&self) -> &PortRegistry {
        &self.ports
    }

    /// Whether a compiled route table is currently cached.
    #[must_use]
    pub fn routes_compiled(&self) -> bool {
        self.routes.is_some()
    }

    /// The compiled route table, recompiling first if it was invalidated.
    pub fn routes(&mut self) -> &RouteTable {
        let ports = &self.ports;
        self.routes.get_or_insert_with(|| RouteTable::build(ports))
    }

    /// Snapshot of the compiled table, in table order.
    pub fn route_entries(&mut self) -> Vec<(NetworkPrefix, PortIndex)> {
        self.routes()
            .entries()
            .map(|(prefix, index)| (*prefix, index))
            .collect()
    }

    /// Route one frame arriving from `source`.
    ///
    /// Selects at most one destination port and enqueues the frame on its
    /// write queue without blocking; the completion then fires exactly
    /// once with the emission outcome. When no destination is selected
    /// the frame and the completion are dropped together, so a dropped
    /// frame never produces an outcome.
    pub fn dispatch(&mut self, source: PortIndex, frame: Vec<u8>, completion: WriteCompletion) {
        let target = match self.target_for(source, &frame) {
            Some(target) => target,
            None => {
                trace!(%source, len = frame.len(), "no route for frame, dropping");
                return;
            }
        };

        trace!(%source, %target, len = frame.len(), "forwarding frame");

        // The selector only returns live indices.
        if let Some(port) = self.ports.get(target) {
            port.sink().write(frame, completion);
        }
    }

    /// Select the destination port for a frame from `source`.
    fn target_for(&mut self, source: PortIndex, frame: &[u8]) -> Option<PortIndex> {
        let destination = frame::destination(frame)?;
        self.target_for_address(source, &destination)
    }

    /// Resolve a destination address against the route table and policy.
    fn target_for_address(&mut self, source: PortIndex, destination: &Address) -> Option<PortIndex> {
        // A frame from an unknown port cannot be held to policy.
        let source_group = match self.ports.get(source) {
            Some(port) => port.group(),
            None => {
                trace!(%source, "frame from unregistered port");
                return None;
            }
        };

        if self.routes.is_none() {
            self.routes = Some(RouteTable::build(&self.ports));
        }
        let routes = self.routes.as_ref()?;

        let client_routing = self.policy.client_routing_enabled;

        for (_prefix, candidate) in routes.find(destination) {
            if candidate == source {
                continue;
            }
            // Skip stale owners defensively; the rebuild keeps the table
            // in step with the registry, so this should not fire.
            let Some(port) = self.ports.get(candidate) else {
                continue;
            };
            if client_routing || port.group() != source_group {
                return Some(candidate);
            }
        }

        None
    }
}
