// Callback-contract tests over a recording transport
//
// No sockets here: the transport records what it was asked to send and
// replies with a canned status and body.

use async_trait::async_trait;
use gstc::cli::{run_command, Command};
use gstc::client::{
    Callback, DaemonClient, Envelope, Method, Operation, PipelineState, RawResponse, Request,
    Transport,
};
use gstc::errors::ErrorCode;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<(String, Request)>>>,
    reply: RawResponse,
}

impl RecordingTransport {
    fn replying(status: u16, body: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            reply: RawResponse::new(status, body),
        }
    }

    fn sent(&self) -> Vec<(String, Request)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, base_url: &str, request: &Request) -> RawResponse {
        self.sent
            .lock()
            .unwrap()
            .push((base_url.to_string(), request.clone()));
        self.reply.clone()
    }
}

const OK_BODY: &str = r#"{"code":0,"description":"","response":{"nodes":[]}}"#;

fn counting_callback(count: &Arc<AtomicUsize>, seen: &Arc<Mutex<Option<Envelope>>>) -> Callback {
    let count = Arc::clone(count);
    let seen = Arc::clone(seen);
    Box::new(move |envelope: Envelope| {
        count.fetch_add(1, Ordering::SeqCst);
        *seen.lock().unwrap() = Some(envelope);
    })
}

fn every_operation() -> Vec<Operation> {
    let p = || "p1".to_string();
    let e = || "src".to_string();
    vec![
        Operation::ListPipelines,
        Operation::PipelineCreate {
            name: p(),
            description: "videotestsrc ! fakesink".to_string(),
        },
        Operation::PipelineState {
            name: p(),
            state: PipelineState::Playing,
        },
        Operation::PipelineState {
            name: p(),
            state: PipelineState::Paused,
        },
        Operation::PipelineState {
            name: p(),
            state: PipelineState::Null,
        },
        Operation::PipelineDelete { name: p() },
        Operation::ElementSet {
            pipeline: p(),
            element: e(),
            property: "pattern".to_string(),
            value: "ball".to_string(),
        },
        Operation::ElementGet {
            pipeline: p(),
            element: e(),
            property: "pattern".to_string(),
        },
        Operation::BusRead { pipeline: p() },
        Operation::EventEos { pipeline: p() },
        Operation::PipelineGraph { name: p() },
        Operation::ListElements { pipeline: p() },
        Operation::ListProperties {
            pipeline: p(),
            element: e(),
        },
        Operation::ListSignals {
            pipeline: p(),
            element: e(),
        },
        Operation::EventFlushStart { pipeline: p() },
        Operation::SignalDisconnect {
            pipeline: p(),
            element: e(),
            signal: "handoff".to_string(),
        },
    ]
}

#[test]
fn test_submit_outside_runtime_is_thread_error() {
    let transport = RecordingTransport::replying(200, OK_BODY);
    let client = DaemonClient::with_transport("http://localhost", 5000, transport.clone());
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(None));

    let err = client
        .submit(
            Operation::ListPipelines,
            Some(counting_callback(&count, &seen)),
        )
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorCode::ThreadError));
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_introspection_commands_map_to_requests() {
    let transport = RecordingTransport::replying(200, OK_BODY);
    let client = DaemonClient::with_transport("http://localhost", 5000, transport.clone());

    let commands = vec![
        Command::Graph {
            name: "p1".to_string(),
        },
        Command::ListElements {
            pipeline: "p1".to_string(),
        },
        Command::ListProperties {
            pipeline: "p1".to_string(),
            element: "src".to_string(),
        },
        Command::ListSignals {
            pipeline: "p1".to_string(),
            element: "src".to_string(),
        },
        Command::FlushStart {
            pipeline: "p1".to_string(),
        },
        Command::SignalDisconnect {
            pipeline: "p1".to_string(),
            element: "src".to_string(),
            signal: "handoff".to_string(),
        },
    ];

    for command in &commands {
        run_command(&client, command).await.unwrap();
    }

    let targets: Vec<String> = transport
        .sent()
        .iter()
        .map(|(_, r)| format!("{} {}", r.method, r.path_and_query()))
        .collect();
    assert_eq!(
        targets,
        vec![
            "GET /pipelines/p1/graph",
            "GET /pipelines/p1/elements",
            "GET /pipelines/p1/elements/src/properties",
            "GET /pipelines/p1/elements/src/signals",
            "POST /pipelines/p1/event?name=flush_start",
            "GET /pipelines/p1/elements/src/signals/handoff/disconnect",
        ]
    );
}

#[tokio::test]
async fn test_missing_callback_sends_nothing() {
    let transport = RecordingTransport::replying(200, OK_BODY);
    let client = DaemonClient::with_transport("http://localhost", 5000, transport.clone());

    for operation in every_operation() {
        let err = client.submit(operation, None).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorCode::TypeError));
        assert_eq!(err.code(), -5);
    }

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_success_invokes_callback_once() {
    for operation in every_operation() {
        let transport = RecordingTransport::replying(200, OK_BODY);
        let client = DaemonClient::with_transport("http://localhost", 5000, transport.clone());
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let handle = client
            .submit(operation.clone(), Some(counting_callback(&count, &seen)))
            .unwrap();
        handle.await.unwrap().unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1, "{}", operation.name());
        let envelope = seen.lock().unwrap().clone().unwrap();
        assert_eq!(envelope.code, 0);
        assert_eq!(envelope.response, json!({"nodes": []}));
        assert_eq!(transport.sent().len(), 1);
    }
}

#[tokio::test]
async fn test_unreachable_never_invokes_callback() {
    for status in [0u16, 500, 503] {
        for operation in every_operation() {
            let transport = RecordingTransport::replying(status, OK_BODY);
            let client = DaemonClient::with_transport("http://localhost", 5000, transport);
            let count = Arc::new(AtomicUsize::new(0));
            let seen = Arc::new(Mutex::new(None));

            let handle = client
                .submit(operation, Some(counting_callback(&count, &seen)))
                .unwrap();
            let err = handle.await.unwrap().unwrap_err();

            assert_eq!(err.kind(), Some(ErrorCode::Unreachable));
            assert_eq!(err.message(), "Server did not respond. Is it up?");
            assert_eq!(count.load(Ordering::SeqCst), 0);
        }
    }
}

#[tokio::test]
async fn test_daemon_error_never_invokes_callback() {
    for operation in every_operation() {
        let transport =
            RecordingTransport::replying(200, r#"{"code":-7,"description":"Not found"}"#);
        let client = DaemonClient::with_transport("http://localhost", 5000, transport);
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let handle = client
            .submit(operation, Some(counting_callback(&count, &seen)))
            .unwrap();
        let err = handle.await.unwrap().unwrap_err();

        assert!(err.is_daemon_error());
        assert_eq!(err.code(), -7);
        assert_eq!(err.message(), "Not found");
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_default_address_is_used_verbatim() {
    let transport = RecordingTransport::replying(200, OK_BODY);
    let client = DaemonClient::with_transport(
        gstc::client::DEFAULT_HOST,
        gstc::client::DEFAULT_PORT,
        transport.clone(),
    );

    client.pipeline_play("p1").await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    let (base_url, request) = &sent[0];
    assert_eq!(base_url, "http://localhost:5000");
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path_and_query(), "/pipelines/p1/state?name=playing");
    assert_eq!(request.body, Some(json!({"name": "playing"})));
}

#[tokio::test]
async fn test_signal_connect_issues_two_requests_in_order() {
    let transport = RecordingTransport::replying(200, OK_BODY);
    let client = DaemonClient::with_transport("http://localhost", 5000, transport.clone());

    client
        .signal_connect("pipe", "element_name", "signal_name", 100)
        .await
        .unwrap();

    let paths: Vec<String> = transport
        .sent()
        .iter()
        .map(|(_, r)| format!("{} {}", r.method, r.path_and_query()))
        .collect();
    assert_eq!(
        paths,
        vec![
            "PUT /pipelines/pipe/elements/element_name/signals/signal_name/timeout?name=100",
            "GET /pipelines/pipe/elements/element_name/signals/signal_name/callback",
        ]
    );
}

#[tokio::test]
async fn test_cli_commands_map_to_operations() {
    let transport = RecordingTransport::replying(200, OK_BODY);
    let client = DaemonClient::with_transport("http://localhost", 5000, transport.clone());

    let commands = vec![
        Command::Create {
            name: "p1".to_string(),
            description: "videotestsrc ! fakesink".to_string(),
        },
        Command::Stop {
            name: "p1".to_string(),
        },
        Command::Set {
            pipeline: "p1".to_string(),
            element: "src".to_string(),
            property: "pattern".to_string(),
            value: "ball".to_string(),
        },
        Command::FlushStop {
            pipeline: "p1".to_string(),
            reset: false,
        },
        Command::BusTimeout {
            pipeline: "p1".to_string(),
            timeout_ns: -1,
        },
    ];

    for command in &commands {
        run_command(&client, command).await.unwrap();
    }

    let targets: Vec<String> = transport
        .sent()
        .iter()
        .map(|(_, r)| format!("{} {}", r.method, r.path_and_query()))
        .collect();
    assert_eq!(
        targets,
        vec![
            "POST /pipelines?name=p1&description=videotestsrc ! fakesink",
            "PUT /pipelines/p1/state?name=null",
            "PUT /pipelines/p1/elements/src/properties/pattern?name=ball",
            "POST /pipelines/p1/event?name=flush_stop&description=false",
            "PUT /pipelines/p1/bus/timeout?name=-1",
        ]
    );
}
