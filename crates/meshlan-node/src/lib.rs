//! Node orchestration for the meshlan data plane.
//!
//! Ties the routing engine to configuration, logging, and the event loop
//! that owns the router. The secure peer transport and the virtual
//! interface adapters are external; they plug in through port emitters
//! and the inbound intake queue.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod shutdown;

pub use config::NodeConfig;
pub use error::NodeError;
pub use node::{CapturedFrames, Emitter, InboundFrame, Node};
pub use shutdown::{ShutdownHandle, ShutdownSignal};
