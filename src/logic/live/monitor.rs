//! Live Sensor Monitor
//!
//! Periodic fetch → predict → present task with an explicit start/stop
//! lifecycle. Dropping the monitor aborts the task.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::simulator::SensorSimulator;
use crate::error::Result;
use crate::logic::backend::PredictionClient;
use crate::logic::parameters::RangeFlag;
use crate::logic::prediction::PredictionRequest;
use crate::logic::presentation::ResultPresentation;

/// Updates buffered for a slow consumer before new ones are dropped
const CHANNEL_CAPACITY: usize = 16;
const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Where live readings come from
#[derive(Debug)]
pub enum ReadingSource {
    /// `GET /sample` on the backend
    Backend,
    /// Local simulator
    Simulator(SensorSimulator),
}

/// One completed poll
#[derive(Debug, Clone, Serialize)]
pub struct LiveUpdate {
    pub sequence: u64,
    pub at: DateTime<Utc>,
    pub reading: PredictionRequest,
    pub out_of_range: Vec<RangeFlag>,
    pub presentation: ResultPresentation,
}

struct LiveTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

pub struct LiveMonitor {
    client: PredictionClient,
    interval: Duration,
    latest: Arc<RwLock<Option<LiveUpdate>>>,
    task: Option<LiveTask>,
}

impl LiveMonitor {
    /// Intervals shorter than 10ms are raised to 10ms
    pub fn new(client: PredictionClient, interval: Duration) -> Self {
        Self {
            client,
            interval: interval.max(MIN_INTERVAL),
            latest: Arc::new(RwLock::new(None)),
            task: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map(|t| !t.handle.is_finished()).unwrap_or(false)
    }

    /// Most recent update, if any
    pub fn latest(&self) -> Option<LiveUpdate> {
        self.latest.read().clone()
    }

    /// Start polling; restarts if already running
    pub async fn start(&mut self, source: ReadingSource) -> mpsc::Receiver<LiveUpdate> {
        self.stop().await;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (shutdown, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(run_loop(
            self.client.clone(),
            self.interval,
            source,
            self.latest.clone(),
            tx,
            shutdown_rx,
        ));

        log::info!("Live mode started (every {:?})", self.interval);
        self.task = Some(LiveTask { shutdown, handle });
        rx
    }

    /// Stop polling and wait for the task to finish; in-flight requests are dropped
    pub async fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.shutdown.send(true);
            if let Err(e) = task.handle.await {
                if !e.is_cancelled() {
                    log::warn!("Live task ended abnormally: {}", e);
                }
            }
            log::info!("Live mode stopped");
        }
    }

    /// Mode flag: `Some(source)` turns live mode on, `None` turns it off
    pub async fn set_mode(&mut self, source: Option<ReadingSource>) -> Option<mpsc::Receiver<LiveUpdate>> {
        match source {
            Some(source) => Some(self.start(source).await),
            None => {
                self.stop().await;
                None
            }
        }
    }
}

impl Drop for LiveMonitor {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.handle.abort();
        }
    }
}

async fn run_loop(
    client: PredictionClient,
    interval: Duration,
    mut source: ReadingSource,
    latest: Arc<RwLock<Option<LiveUpdate>>>,
    tx: mpsc::Sender<LiveUpdate>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut sequence = 0u64;

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
        }

        let outcome = tokio::select! {
            _ = shutdown.changed() => break,
            outcome = poll_once(&client, &mut source, sequence) => outcome,
        };

        match outcome {
            Ok(update) => {
                sequence += 1;
                *latest.write() = Some(update.clone());
                match tx.try_send(update) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        log::debug!("Live consumer lagging, update dropped");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        log::debug!("Live consumer gone, keeping snapshot only");
                    }
                }
            }
            Err(e) => log::warn!("Live poll failed: {}", e),
        }
    }
}

async fn poll_once(
    client: &PredictionClient,
    source: &mut ReadingSource,
    sequence: u64,
) -> Result<LiveUpdate> {
    let reading = match source {
        ReadingSource::Backend => client.sample().await?,
        ReadingSource::Simulator(sim) => sim.next_reading(),
    };

    let result = client.predict(&reading).await?;
    let presentation = ResultPresentation::build(&result, client.config().fallback_threshold);

    Ok(LiveUpdate {
        sequence,
        at: Utc::now(),
        out_of_range: reading.flags().into_iter().filter(|f| f.is_out_of_range()).collect(),
        reading,
        presentation,
    })
}
