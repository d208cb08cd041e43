// Daemon client implementation
//
// HTTP client for GStreamer Daemon. One method per gstd operation; each
// builds a request descriptor, sends it once and interprets the envelope.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::request::{Operation, PipelineState};
use super::response::{interpret, Envelope};
use super::transport::{HttpTransport, Transport};
use crate::config::ClientConfig;
use crate::errors::{ErrorCode, GstcError, Result};

/// Default daemon host
pub const DEFAULT_HOST: &str = "http://localhost";
/// Default gstd HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Completion handler for callback-style submission
///
/// Invoked at most once, and only with a successful envelope.
pub type Callback = Box<dyn FnOnce(Envelope) + Send + 'static>;

/// HTTP client for communicating with gstd
///
/// Holds nothing but the daemon address and the transport; requests made
/// through the same client are independent and unordered.
pub struct DaemonClient<T: Transport = HttpTransport> {
    host: String,
    port: u16,
    base_url: String,
    transport: Arc<T>,
}

impl Default for DaemonClient<HttpTransport> {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl DaemonClient<HttpTransport> {
    /// Create a client for `host:port`
    ///
    /// Nothing is validated here; a bad address only shows up as an
    /// unreachable error on the first request.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_transport(host, port, HttpTransport::new())
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.host.clone(), config.port)
    }
}

impl<T: Transport + 'static> DaemonClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(host: impl Into<String>, port: u16, transport: T) -> Self {
        let host = host.into();
        let base_url = format!("{}:{}", host, port);
        debug!(base_url = %base_url, "Created gstd client");

        Self {
            host,
            port,
            base_url,
            transport: Arc::new(transport),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, the prefix of every request URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one operation and interpret the reply
    pub async fn execute(&self, operation: Operation) -> Result<Envelope> {
        execute_with(self.transport.as_ref(), &self.base_url, &operation).await
    }

    /// Callback-style submission
    ///
    /// Without a callback nothing is sent and a type error is returned right
    /// away. Outside a tokio runtime a thread error is returned instead of
    /// panicking. Otherwise the request runs on the current runtime; the callback
    /// receives the envelope on success and failures come back through the
    /// returned handle.
    pub fn submit(
        &self,
        operation: Operation,
        callback: Option<Callback>,
    ) -> Result<JoinHandle<Result<()>>> {
        let Some(callback) = callback else {
            error!(operation = operation.name(), "Provide a callback function");
            return Err(GstcError::client(
                ErrorCode::TypeError,
                "Provide a callback function",
            ));
        };

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            error!(operation = operation.name(), "No tokio runtime for submit: {}", e);
            GstcError::client(
                ErrorCode::ThreadError,
                "submit must be called from within a tokio runtime",
            )
        })?;

        let transport = Arc::clone(&self.transport);
        let base_url = self.base_url.clone();

        Ok(runtime.spawn(async move {
            let envelope = execute_with(transport.as_ref(), &base_url, &operation).await?;
            callback(envelope);
            Ok(())
        }))
    }

    /// List the pipelines known to the daemon
    pub async fn list_pipelines(&self) -> Result<Envelope> {
        self.execute(Operation::ListPipelines).await
    }

    /// Create a pipeline from a gst-launch style description
    pub async fn pipeline_create(&self, name: &str, description: &str) -> Result<Envelope> {
        self.execute(Operation::PipelineCreate {
            name: name.to_string(),
            description: description.to_string(),
        })
        .await
    }

    pub async fn pipeline_play(&self, name: &str) -> Result<Envelope> {
        self.set_state(name, PipelineState::Playing).await
    }

    pub async fn pipeline_pause(&self, name: &str) -> Result<Envelope> {
        self.set_state(name, PipelineState::Paused).await
    }

    pub async fn pipeline_stop(&self, name: &str) -> Result<Envelope> {
        self.set_state(name, PipelineState::Null).await
    }

    async fn set_state(&self, name: &str, state: PipelineState) -> Result<Envelope> {
        self.execute(Operation::PipelineState {
            name: name.to_string(),
            state,
        })
        .await
    }

    pub async fn pipeline_delete(&self, name: &str) -> Result<Envelope> {
        self.execute(Operation::PipelineDelete {
            name: name.to_string(),
        })
        .await
    }

    /// Fetch the pipeline graph in DOT format
    pub async fn pipeline_graph(&self, name: &str) -> Result<Envelope> {
        self.execute(Operation::PipelineGraph {
            name: name.to_string(),
        })
        .await
    }

    pub async fn list_elements(&self, pipeline: &str) -> Result<Envelope> {
        self.execute(Operation::ListElements {
            pipeline: pipeline.to_string(),
        })
        .await
    }

    pub async fn list_properties(&self, pipeline: &str, element: &str) -> Result<Envelope> {
        self.execute(Operation::ListProperties {
            pipeline: pipeline.to_string(),
            element: element.to_string(),
        })
        .await
    }

    pub async fn list_signals(&self, pipeline: &str, element: &str) -> Result<Envelope> {
        self.execute(Operation::ListSignals {
            pipeline: pipeline.to_string(),
            element: element.to_string(),
        })
        .await
    }

    /// Read an element property
    pub async fn element_get(
        &self,
        pipeline: &str,
        element: &str,
        property: &str,
    ) -> Result<Envelope> {
        self.execute(Operation::ElementGet {
            pipeline: pipeline.to_string(),
            element: element.to_string(),
            property: property.to_string(),
        })
        .await
    }

    /// Set an element property
    ///
    /// The value travels in the query string only; the body is the fixed
    /// `{"name":"paused"}` that gstd clients have always sent here.
    pub async fn element_set(
        &self,
        pipeline: &str,
        element: &str,
        property: &str,
        value: &str,
    ) -> Result<Envelope> {
        self.execute(Operation::ElementSet {
            pipeline: pipeline.to_string(),
            element: element.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        })
        .await
    }

    pub async fn event_eos(&self, pipeline: &str) -> Result<Envelope> {
        self.execute(Operation::EventEos {
            pipeline: pipeline.to_string(),
        })
        .await
    }

    pub async fn event_flush_start(&self, pipeline: &str) -> Result<Envelope> {
        self.execute(Operation::EventFlushStart {
            pipeline: pipeline.to_string(),
        })
        .await
    }

    pub async fn event_flush_stop(&self, pipeline: &str, reset: bool) -> Result<Envelope> {
        self.execute(Operation::EventFlushStop {
            pipeline: pipeline.to_string(),
            reset,
        })
        .await
    }

    /// Read the next bus message matching the current filter
    pub async fn bus_read(&self, pipeline: &str) -> Result<Envelope> {
        self.execute(Operation::BusRead {
            pipeline: pipeline.to_string(),
        })
        .await
    }

    /// Restrict bus reads to the given message types (e.g. "error+eos")
    pub async fn bus_filter(&self, pipeline: &str, types: &str) -> Result<Envelope> {
        self.execute(Operation::BusFilter {
            pipeline: pipeline.to_string(),
            types: types.to_string(),
        })
        .await
    }

    /// Bus read timeout in nanoseconds; -1 waits forever
    pub async fn bus_timeout(&self, pipeline: &str, timeout_ns: i64) -> Result<Envelope> {
        self.execute(Operation::BusTimeout {
            pipeline: pipeline.to_string(),
            timeout_ns,
        })
        .await
    }

    pub async fn signal_timeout(
        &self,
        pipeline: &str,
        element: &str,
        signal: &str,
        timeout: i64,
    ) -> Result<Envelope> {
        self.execute(Operation::SignalTimeout {
            pipeline: pipeline.to_string(),
            element: element.to_string(),
            signal: signal.to_string(),
            timeout,
        })
        .await
    }

    /// Wait for a signal emission
    ///
    /// Sets the signal timeout, then blocks on the callback resource. The
    /// second request is not sent if the first one fails.
    pub async fn signal_connect(
        &self,
        pipeline: &str,
        element: &str,
        signal: &str,
        timeout: i64,
    ) -> Result<Envelope> {
        self.signal_timeout(pipeline, element, signal, timeout)
            .await?;

        self.execute(Operation::SignalCallback {
            pipeline: pipeline.to_string(),
            element: element.to_string(),
            signal: signal.to_string(),
        })
        .await
    }

    pub async fn signal_disconnect(
        &self,
        pipeline: &str,
        element: &str,
        signal: &str,
    ) -> Result<Envelope> {
        self.execute(Operation::SignalDisconnect {
            pipeline: pipeline.to_string(),
            element: element.to_string(),
            signal: signal.to_string(),
        })
        .await
    }
}

async fn execute_with<T: Transport + ?Sized>(
    transport: &T,
    base_url: &str,
    operation: &Operation,
) -> Result<Envelope> {
    let request = operation.request();
    debug!(
        operation = operation.name(),
        method = %request.method,
        target = %request.path_and_query(),
        "Dispatching gstd operation"
    );

    let raw = transport.send(base_url, &request).await;
    interpret(&raw)
}
