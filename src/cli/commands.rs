// Command-line subcommands
//
// One subcommand per daemon operation. Dispatch lives here rather than in
// main.rs so it can run against any transport.

use clap::Subcommand;

use crate::client::{DaemonClient, Envelope, Transport};
use crate::errors::Result;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List pipelines
    ListPipelines,
    /// Create a pipeline from a gst-launch description
    Create {
        name: String,
        /// e.g. "videotestsrc ! autovideosink"
        description: String,
    },
    /// Set a pipeline to PLAYING
    Play { name: String },
    /// Set a pipeline to PAUSED
    Pause { name: String },
    /// Set a pipeline to NULL
    Stop { name: String },
    /// Delete a pipeline
    Delete { name: String },
    /// Print the pipeline graph (DOT)
    Graph { name: String },
    /// List the elements of a pipeline
    ListElements { pipeline: String },
    /// List the properties of an element
    ListProperties { pipeline: String, element: String },
    /// List the signals of an element
    ListSignals { pipeline: String, element: String },
    /// Read an element property
    Get {
        pipeline: String,
        element: String,
        property: String,
    },
    /// Set an element property
    Set {
        pipeline: String,
        element: String,
        property: String,
        value: String,
    },
    /// Send end-of-stream
    Eos { pipeline: String },
    /// Send a flush-start event
    FlushStart { pipeline: String },
    /// Send a flush-stop event
    FlushStop {
        pipeline: String,
        /// Reset the running time
        #[arg(long)]
        reset: bool,
    },
    /// Read one bus message
    BusRead { pipeline: String },
    /// Filter bus messages by type (e.g. "error+eos")
    BusFilter { pipeline: String, types: String },
    /// Bus read timeout in nanoseconds (-1 waits forever)
    BusTimeout {
        pipeline: String,
        #[arg(allow_hyphen_values = true)]
        timeout_ns: i64,
    },
    /// Wait for a signal emission
    SignalConnect {
        pipeline: String,
        element: String,
        signal: String,
        /// Microseconds to wait; -1 waits forever
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        timeout: i64,
    },
    /// Set how long signal-connect waits
    SignalTimeout {
        pipeline: String,
        element: String,
        signal: String,
        #[arg(allow_hyphen_values = true)]
        timeout: i64,
    },
    /// Release a pending signal-connect
    SignalDisconnect {
        pipeline: String,
        element: String,
        signal: String,
    },
}

/// Run a command against the daemon
pub async fn run_command<T: Transport + 'static>(
    client: &DaemonClient<T>,
    command: &Command,
) -> Result<Envelope> {
    match command {
        Command::ListPipelines => client.list_pipelines().await,
        Command::Create { name, description } => {
            client.pipeline_create(name, description).await
        }
        Command::Play { name } => client.pipeline_play(name).await,
        Command::Pause { name } => client.pipeline_pause(name).await,
        Command::Stop { name } => client.pipeline_stop(name).await,
        Command::Delete { name } => client.pipeline_delete(name).await,
        Command::Graph { name } => client.pipeline_graph(name).await,
        Command::ListElements { pipeline } => client.list_elements(pipeline).await,
        Command::ListProperties { pipeline, element } => {
            client.list_properties(pipeline, element).await
        }
        Command::ListSignals { pipeline, element } => {
            client.list_signals(pipeline, element).await
        }
        Command::Get {
            pipeline,
            element,
            property,
        } => client.element_get(pipeline, element, property).await,
        Command::Set {
            pipeline,
            element,
            property,
            value,
        } => client.element_set(pipeline, element, property, value).await,
        Command::Eos { pipeline } => client.event_eos(pipeline).await,
        Command::FlushStart { pipeline } => client.event_flush_start(pipeline).await,
        Command::FlushStop { pipeline, reset } => {
            client.event_flush_stop(pipeline, *reset).await
        }
        Command::BusRead { pipeline } => client.bus_read(pipeline).await,
        Command::BusFilter { pipeline, types } => client.bus_filter(pipeline, types).await,
        Command::BusTimeout {
            pipeline,
            timeout_ns,
        } => client.bus_timeout(pipeline, *timeout_ns).await,
        Command::SignalConnect {
            pipeline,
            element,
            signal,
            timeout,
        } => {
            client
                .signal_connect(pipeline, element, signal, *timeout)
                .await
        }
        Command::SignalTimeout {
            pipeline,
            element,
            signal,
            timeout,
        } => {
            client
                .signal_timeout(pipeline, element, signal, *timeout)
                .await
        }
        Command::SignalDisconnect {
            pipeline,
            element,
            signal,
        } => client.signal_disconnect(pipeline, element, signal).await,
    }
}

/// Render an envelope for stdout
pub fn format_envelope(envelope: &Envelope, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(envelope)
    } else {
        serde_json::to_string_pretty(envelope)
    };
    rendered.unwrap_or_else(|_| format!("{:?}", envelope))
}
