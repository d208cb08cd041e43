// Request descriptors for gstd operations
//
// Every operation maps to one verb, one resource path, an ordered query and
// an optional JSON body. The body mirrors the query parameters; gstd accepts
// either, so both are always sent.

use serde_json::{json, Value};
use std::fmt;

/// HTTP verb used by a gstd resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single request against the daemon, built fresh per call
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Copy the query parameters into a JSON object body
    fn mirrored(mut self) -> Self {
        let body: serde_json::Map<String, Value> = self
            .query
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        self.body = Some(Value::Object(body));
        self
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path plus the raw, unencoded query string
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

/// Target state for a pipeline state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Playing,
    Paused,
    Null,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Playing => "playing",
            PipelineState::Paused => "paused",
            PipelineState::Null => "null",
        }
    }
}

/// Every single-request operation the daemon exposes
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListPipelines,
    PipelineCreate { name: String, description: String },
    PipelineState { name: String, state: PipelineState },
    PipelineDelete { name: String },
    PipelineGraph { name: String },
    ListElements { pipeline: String },
    ListProperties { pipeline: String, element: String },
    ListSignals { pipeline: String, element: String },
    ElementGet { pipeline: String, element: String, property: String },
    ElementSet { pipeline: String, element: String, property: String, value: String },
    EventEos { pipeline: String },
    EventFlushStart { pipeline: String },
    EventFlushStop { pipeline: String, reset: bool },
    BusRead { pipeline: String },
    BusFilter { pipeline: String, types: String },
    BusTimeout { pipeline: String, timeout_ns: i64 },
    SignalTimeout { pipeline: String, element: String, signal: String, timeout: i64 },
    SignalCallback { pipeline: String, element: String, signal: String },
    SignalDisconnect { pipeline: String, element: String, signal: String },
}

fn element_path(pipeline: &str, element: &str) -> String {
    format!("/pipelines/{}/elements/{}", pipeline, element)
}

fn signal_path(pipeline: &str, element: &str, signal: &str) -> String {
    format!("{}/signals/{}", element_path(pipeline, element), signal)
}

impl Operation {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListPipelines => "list_pipelines",
            Operation::PipelineCreate { .. } => "pipeline_create",
            Operation::PipelineState { state, .. } => match state {
                PipelineState::Playing => "pipeline_play",
                PipelineState::Paused => "pipeline_pause",
                PipelineState::Null => "pipeline_stop",
            },
            Operation::PipelineDelete { .. } => "pipeline_delete",
            Operation::PipelineGraph { .. } => "pipeline_graph",
            Operation::ListElements { .. } => "list_elements",
            Operation::ListProperties { .. } => "list_properties",
            Operation::ListSignals { .. } => "list_signals",
            Operation::ElementGet { .. } => "element_get",
            Operation::ElementSet { .. } => "element_set",
            Operation::EventEos { .. } => "event_eos",
            Operation::EventFlushStart { .. } => "event_flush_start",
            Operation::EventFlushStop { .. } => "event_flush_stop",
            Operation::BusRead { .. } => "bus_read",
            Operation::BusFilter { .. } => "bus_filter",
            Operation::BusTimeout { .. } => "bus_timeout",
            Operation::SignalTimeout { .. } => "signal_timeout",
            Operation::SignalCallback { .. } => "signal_callback",
            Operation::SignalDisconnect { .. } => "signal_disconnect",
        }
    }

    /// Build the request descriptor for this operation
    pub fn request(&self) -> Request {
        match self {
            Operation::ListPipelines => Request::new(Method::Get, "/pipelines"),
            Operation::PipelineCreate { name, description } => {
                Request::new(Method::Post, "/pipelines")
                    .with_query("name", name.as_str())
                    .with_query("description", description.as_str())
                    .mirrored()
            }
            Operation::PipelineState { name, state } => {
                Request::new(Method::Put, format!("/pipelines/{}/state", name))
                    .with_query("name", state.as_str())
                    .mirrored()
            }
            Operation::PipelineDelete { name } => Request::new(Method::Delete, "/pipelines")
                .with_query("name", name.as_str())
                .mirrored(),
            Operation::PipelineGraph { name } => {
                Request::new(Method::Get, format!("/pipelines/{}/graph", name))
            }
            Operation::ListElements { pipeline } => {
                Request::new(Method::Get, format!("/pipelines/{}/elements", pipeline))
            }
            Operation::ListProperties { pipeline, element } => Request::new(
                Method::Get,
                format!("{}/properties", element_path(pipeline, element)),
            ),
            Operation::ListSignals { pipeline, element } => Request::new(
                Method::Get,
                format!("{}/signals", element_path(pipeline, element)),
            ),
            Operation::ElementGet {
                pipeline,
                element,
                property,
            } => Request::new(
                Method::Get,
                format!("{}/properties/{}", element_path(pipeline, element), property),
            ),
            // gstd clients have always sent the pause body here; the value
            // travels only in the query string.
            Operation::ElementSet {
                pipeline,
                element,
                property,
                value,
            } => Request::new(
                Method::Put,
                format!("{}/properties/{}", element_path(pipeline, element), property),
            )
            .with_query("name", value.as_str())
            .with_body(json!({ "name": "paused" })),
            Operation::EventEos { pipeline } => event_request(pipeline, "eos", None),
            Operation::EventFlushStart { pipeline } => {
                event_request(pipeline, "flush_start", None)
            }
            Operation::EventFlushStop { pipeline, reset } => {
                event_request(pipeline, "flush_stop", Some(reset.to_string()))
            }
            Operation::BusRead { pipeline } => {
                Request::new(Method::Get, format!("/pipelines/{}/bus/message", pipeline))
            }
            Operation::BusFilter { pipeline, types } => {
                Request::new(Method::Put, format!("/pipelines/{}/bus/types", pipeline))
                    .with_query("name", types.as_str())
                    .mirrored()
            }
            Operation::BusTimeout {
                pipeline,
                timeout_ns,
            } => Request::new(Method::Put, format!("/pipelines/{}/bus/timeout", pipeline))
                .with_query("name", timeout_ns.to_string())
                .mirrored(),
            Operation::SignalTimeout {
                pipeline,
                element,
                signal,
                timeout,
            } => Request::new(
                Method::Put,
                format!("{}/timeout", signal_path(pipeline, element, signal)),
            )
            .with_query("name", timeout.to_string())
            .mirrored(),
            Operation::SignalCallback {
                pipeline,
                element,
                signal,
            } => Request::new(
                Method::Get,
                format!("{}/callback", signal_path(pipeline, element, signal)),
            ),
            Operation::SignalDisconnect {
                pipeline,
                element,
                signal,
            } => Request::new(
                Method::Get,
                format!("{}/disconnect", signal_path(pipeline, element, signal)),
            ),
        }
    }
}

fn event_request(pipeline: &str, event: &str, description: Option<String>) -> Request {
    let mut request = Request::new(Method::Post, format!("/pipelines/{}/event", pipeline))
        .with_query("name", event);
    if let Some(description) = description {
        request = request.with_query("description", description);
    }
    request.mirrored()
}
