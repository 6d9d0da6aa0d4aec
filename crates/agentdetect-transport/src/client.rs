//! `ReportClient`: the outbound RPC and unload-beacon port (spec.md §4.5,
//! §6), built on `reqwest` the way `rustkit-http` wraps it for the
//! engine's own network crate.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use agentdetect_core::error::{EngineError, EngineResult};

use crate::payload::ReportPayload;

/// Best-effort telemetry, not a user-facing network operation, so the
/// request timeout is kept short.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The reporting transport. `report` is fire-and-await: its failure is
/// logged and swallowed by the orchestrator, never propagated. `beacon`
/// is fire-and-forget, used only from the unload hook, where nothing can
/// await a response.
#[async_trait]
pub trait ReportClient: Send + Sync {
    async fn report(&self, payload: &ReportPayload) -> EngineResult<()>;
    fn beacon(&self, payload: &ReportPayload);
}

/// A `ReportClient` backed by a real HTTP endpoint.
pub struct HttpReportClient {
    client: reqwest::Client,
    report_url: Url,
    beacon_url: Url,
}

impl HttpReportClient {
    pub fn new(report_url: Url, beacon_url: Url) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| EngineError::transport(err.to_string()))?;
        Ok(Self {
            client,
            report_url,
            beacon_url,
        })
    }
}

#[async_trait]
impl ReportClient for HttpReportClient {
    async fn report(&self, payload: &ReportPayload) -> EngineResult<()> {
        self.client
            .post(self.report_url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|err| EngineError::transport(err.to_string()))?;
        Ok(())
    }

    /// Spawns a detached task so the unload hook never awaits a response;
    /// any failure is logged at `debug` per spec.md §7's `TransportFailure`
    /// policy and otherwise discarded.
    fn beacon(&self, payload: &ReportPayload) {
        let client = self.client.clone();
        let url = self.beacon_url.clone();
        let payload = payload.clone();
        tokio::spawn(async move {
            if let Err(err) = client.post(url).json(&payload).send().await {
                tracing::debug!(%err, "unload beacon failed");
            }
        });
    }
}
