// gstc - GStreamer Daemon HTTP client
// Library exports

pub mod cli; // Subcommands for the gstc binary
pub mod client; // DaemonClient, request descriptors, transport
pub mod config;
pub mod errors; // Error codes shared with gstd

pub use client::{DaemonClient, Envelope, Operation};
pub use errors::{ErrorCode, GstcError};
