// HTTP client for GStreamer Daemon
//
// Provides DaemonClient plus the pieces it is assembled from: request
// descriptors, the transport seam and envelope interpretation.

mod daemon_client;
pub mod request;
pub mod response;
pub mod transport;

pub use daemon_client::{Callback, DaemonClient, DEFAULT_HOST, DEFAULT_PORT};
pub use request::{Method, Operation, PipelineState, Request};
pub use response::{interpret, Envelope, RawResponse};
pub use transport::{HttpTransport, Transport};
