use std::time::Duration;

use cnc_telemetry::{MachineSnapshot, TelemetryDocument};
use utilities::http_source::{JsonSource, PollError, fetch_json};

pub struct TelemetryPoller<S: JsonSource> {
    source: S,
    interval: Duration,
}

impl<S: JsonSource> TelemetryPoller<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Fetches and parses one snapshot. Nothing is kept between calls.
    pub async fn poll_once(&self) -> Result<MachineSnapshot, PollError> {
        let document: TelemetryDocument = fetch_json(&self.source).await?;
        Ok(document.cnc_machine)
    }

    /// Fetch, log, wait; forever. Failures only cost the current cycle.
    pub async fn run(&self) {
        tracing::info!(
            url = self.source.url(),
            interval = ?self.interval,
            "Starting telemetry monitoring"
        );

        loop {
            match self.poll_once().await {
                Ok(snapshot) => snapshot.log(),
                Err(e) if e.is_network() => tracing::error!("Network request failed: {e}"),
                Err(e) => tracing::error!("Failed to process JSON data: {e}"),
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
