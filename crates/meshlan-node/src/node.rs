//! Node wiring: the router event loop and port pumps.
//!
//! The router lives on a single task that drains the intake queue of
//! inbound frames. Each attached port gets a pump task of its own that
//! drains the port's write queue into an emitter, so a slow emitter
//! backs up only its port.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use meshlan_core::{GroupTag, NetworkPrefix, PortIndex};
use meshlan_routing::{FrameSink, FrameWrite, Port, Router, RoutingPolicy, WriteError};

use crate::config::{self, NodeConfig};
use crate::error::NodeError;
use crate::shutdown::{self, ShutdownHandle, ShutdownSignal};

/// An inbound frame tagged with the port it arrived on.
#[derive(Debug)]
pub struct InboundFrame {
    pub source: PortIndex,
    pub frame: Vec<u8>,
}

/// Frames recorded by a capture emitter.
pub type CapturedFrames = Arc<Mutex<Vec<Vec<u8>>>>;

/// What a port's pump does with frames the router sends it.
pub enum Emitter {
    /// Acknowledge and discard.
    Discard,
    /// Log at debug level, then acknowledge.
    Log,
    /// Record for inspection, then acknowledge.
    Capture(CapturedFrames),
    /// Hand emitted frames back to the intake as inbound traffic from
    /// this port, as if the attached peer had sent them straight back.
    Reinject(mpsc::Sender<InboundFrame>),
}

impl Emitter {
    /// Parse an emitter kind from its configuration name.
    pub fn from_config(kind: &str) -> Result<Emitter, NodeError> {
        match kind {
            "discard" => Ok(Emitter::Discard),
            "log" => Ok(Emitter::Log),
            other => Err(NodeError::Config(format!("unknown emitter '{other}'"))),
        }
    }

    async fn emit(&self, port: PortIndex, name: &str, frame: Vec<u8>) -> Result<(), WriteError> {
        match self {
            Emitter::Discard => Ok(()),
            Emitter::Log => {
                debug!(%port, name, len = frame.len(), "emitting frame");
                Ok(())
            }
            Emitter::Capture(store) => {
                if let Ok(mut frames) = store.lock() {
                    frames.push(frame);
                }
                Ok(())
            }
            Emitter::Reinject(intake) => intake
                .send(InboundFrame {
                    source: port,
                    frame,
                })
                .await
                .map_err(|_| WriteError::PortClosed),
        }
    }
}

/// Drain a port's write queue into its emitter.
///
/// Every dequeued write is completed exactly once with the emission
/// outcome. Runs until the port's sink is dropped.
pub async fn run_pump(
    port: PortIndex,
    name: String,
    mut rx: mpsc::Receiver<FrameWrite>,
    emitter: Emitter,
) {
    while let Some(FrameWrite { frame, completion }) = rx.recv().await {
        let outcome = emitter.emit(port, &name, frame).await;
        if let Err(err) = &outcome {
            warn!(%port, name, %err, "frame emission failed");
        }
        let _ = completion.send(outcome);
    }
    debug!(%port, name, "pump stopped");
}

/// A meshlan node: one router confined to the event-loop task, plus a
/// pump task per attached port.
#[derive(Debug)]
pub struct Node {
    router: Router,
    intake_tx: mpsc::Sender<InboundFrame>,
    intake_rx: mpsc::Receiver<InboundFrame>,
    shutdown: ShutdownHandle,
    signal: ShutdownSignal,
}

impl Node {
    pub fn new(policy: RoutingPolicy, intake_depth: usize) -> Self {
        let (intake_tx, intake_rx) = mpsc::channel(intake_depth);
        let (shutdown, signal) = shutdown::channel();
        Self {
            router: Router::new(policy),
            intake_tx,
            intake_rx,
            shutdown,
            signal,
        }
    }

    /// Build a node from configuration: one port per `[[ports]]` entry,
    /// each with its pump spawned on the current runtime.
    pub fn from_config(config: &NodeConfig) -> Result<Self, NodeError> {
        let mut node = Node::new(config.routing.policy(), config.node.intake_depth);
        for entry in &config.ports {
            let routes = config::parse_routes(&entry.routes)?;
            let emitter = Emitter::from_config(&entry.emitter)?;
            node.attach_port(
                &entry.name,
                GroupTag(entry.group),
                routes,
                entry.queue_depth,
                emitter,
            );
        }
        Ok(node)
    }

    /// Sender used by receive paths to feed frames into the router.
    pub fn intake(&self) -> mpsc::Sender<InboundFrame> {
        self.intake_tx.clone()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Register a port and spawn its pump.
    pub fn attach_port(
        &mut self,
        name: &str,
        group: GroupTag,
        routes: Vec<NetworkPrefix>,
        queue_depth: usize,
        emitter: Emitter,
    ) -> PortIndex {
        let (sink, rx) = FrameSink::channel(queue_depth);
        let index = self
            .router
            .register_port(Port::new(name, group, routes, sink));
        tokio::spawn(run_pump(index, name.to_string(), rx, emitter));
        info!(%index, name, %group, "port attached");
        index
    }

    /// Render the compiled route table, one `prefix -> port` line per
    /// entry, in table order.
    pub fn dump_routes(&mut self) -> String {
        let entries = self.router.route_entries();
        let mut out = String::new();
        for (prefix, index) in entries {
            let name = self
                .router
                .ports()
                .get(index)
                .map(Port::name)
                .unwrap_or("?");
            out.push_str(&format!("{prefix} -> {index} ({name})\n"));
        }
        out
    }

    /// Run the event loop until shutdown is requested.
    pub async fn run(&mut self) {
        let ports = self.router.ports().len();
        let routes = self.router.routes().len();
        info!(ports, routes, "node running");

        loop {
            tokio::select! {
                _ = self.signal.wait() => break,
                inbound = self.intake_rx.recv() => match inbound {
                    Some(InboundFrame { source, frame }) => {
                        // The loop does not track delivery; pumps log
                        // emission failures themselves.
                        let (completion, _) = oneshot::channel();
                        self.router.dispatch(source, frame, completion);
                    }
                    None => break,
                },
            }
        }

        info!("node stopped");
    }
}
