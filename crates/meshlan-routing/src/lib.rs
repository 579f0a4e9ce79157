//! Routing and switching engine for the meshlan data plane.
//!
//! This crate decides, frame by frame, which port (if any) should emit a
//! packet read from another port, and hands the bytes to that port's
//! write queue. It holds the port registry, the derived route table, and
//! the routing policy; the cryptographic session layer and the virtual
//! interface adapters live outside and talk to it through ports.

pub mod error;
pub mod policy;
pub mod port;
pub mod registry;
pub mod router;
pub mod table;
pub mod testing;

pub use error::WriteError;
pub use policy::RoutingPolicy;
pub use port::{DEFAULT_QUEUE_DEPTH, FrameSink, FrameWrite, Port, WriteCompletion};
pub use registry::PortRegistry;
pub use router::Router;
pub use table::RouteTable;
