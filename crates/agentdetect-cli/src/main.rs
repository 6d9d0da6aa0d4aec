//! Replays a recorded interaction trace through the detection engine and
//! prints the resulting report as JSON. The trace format is simply a JSON
//! array of the same `DomEvent`s the Recorder accepts at runtime, so a
//! trace can be hand-written or captured from a real host binding and
//! replayed here for debugging outside of a browser.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::Deserialize;

use agentdetect_core::EngineConfig;
use agentdetect_dom::DomEvent;
use agentdetect_orchestrator::Engine;
use agentdetect_test_support::{
    env::{FakeCanvasProbe, FakeEnvironment, FakeWebglProbe},
    FakePageContext, MemoryTabStorage, RecordingReportClient,
};

#[derive(Parser, Debug)]
#[command(name = "agentdetect-cli")]
#[command(about = "Replays a recorded interaction trace through the detection engine")]
struct Args {
    /// Path to a JSON trace file: `{"events": [...], "context_id": ..., "session_key": ...}`
    #[arg(long)]
    trace: PathBuf,

    /// Use the headless-bot environment fixture instead of the human one,
    /// to see how an automated session's fingerprint score differs.
    #[arg(long)]
    headless_env: bool,

    /// Override the session key the trace file specifies, if any.
    #[arg(long)]
    session_key: Option<String>,

    /// Enable verbose (debug-level) engine logging.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct TraceFile {
    events: Vec<DomEvent>,
    context_id: Option<u64>,
    session_key: Option<String>,
    #[serde(default)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let raw = std::fs::read_to_string(&args.trace)
        .map_err(|err| anyhow::anyhow!("failed to read trace file {:?}: {err}", args.trace))?;
    let trace: TraceFile = serde_json::from_str(&raw)
        .map_err(|err| anyhow::anyhow!("failed to parse trace file {:?}: {err}", args.trace))?;

    let env = if args.headless_env {
        FakeEnvironment::headless_bot()
    } else {
        FakeEnvironment::human()
    };

    let engine = Engine::new(
        env,
        FakeCanvasProbe::default(),
        FakeWebglProbe::default(),
        Arc::new(MemoryTabStorage::new()),
        Arc::new(agentdetect_core::clock::SystemClock),
        Arc::new(RecordingReportClient::new()),
        Arc::new(FakePageContext::default()),
    );

    let config = EngineConfig {
        context_id: trace.context_id,
        session_key: args.session_key.or(trace.session_key),
        debug: args.debug_or(trace.debug),
        ..EngineConfig::default()
    };
    engine.init(config).await;

    for event in trace.events {
        engine.handle_event(event);
    }

    let result = engine.collect_and_report().await;
    println!("{}", serde_json::to_string_pretty(&result.report)?);

    Ok(())
}

impl Args {
    fn debug_or(&self, trace_debug: bool) -> bool {
        self.verbose || trace_debug
    }
}
