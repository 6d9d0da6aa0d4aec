//! A [`ReportClient`] that records every payload instead of sending it
//! anywhere, so end-to-end scenarios can assert on what the engine would
//! have shipped.

use std::sync::Mutex;

use async_trait::async_trait;

use agentdetect_core::error::EngineResult;
use agentdetect_transport::{ReportClient, ReportPayload};

#[derive(Debug, Default)]
pub struct RecordingReportClient {
    reported: Mutex<Vec<ReportPayload>>,
    beaconed: Mutex<Vec<ReportPayload>>,
}

impl RecordingReportClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reported(&self) -> Vec<ReportPayload> {
        self.reported.lock().expect("lock poisoned").clone()
    }

    pub fn beaconed(&self) -> Vec<ReportPayload> {
        self.beaconed.lock().expect("lock poisoned").clone()
    }

    pub fn report_count(&self) -> usize {
        self.reported.lock().expect("lock poisoned").len()
    }
}

#[async_trait]
impl ReportClient for RecordingReportClient {
    async fn report(&self, payload: &ReportPayload) -> EngineResult<()> {
        self.reported.lock().expect("lock poisoned").push(payload.clone());
        Ok(())
    }

    fn beacon(&self, payload: &ReportPayload) {
        self.beaconed.lock().expect("lock poisoned").push(payload.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdetect_transport::SignalType;

    #[tokio::test]
    async fn records_reports_and_beacons_separately() {
        let client = RecordingReportClient::new();
        let payload = ReportPayload::new("key", None, "sess", SignalType::Combined, "{}");
        client.report(&payload).await.unwrap();
        client.beacon(&payload);
        assert_eq!(client.report_count(), 1);
        assert_eq!(client.beaconed().len(), 1);
    }
}
