//! Prometheus metrics for the relay.

use std::time::Instant;

use metrics::{counter, histogram};
use mvt_query::RenderMode;

/// Count one tile request by render mode.
pub fn record_tile_request(mode: RenderMode) {
    counter!("relay_tile_requests_total", "render_method" => mode.as_str()).increment(1);
}

/// Count one failed tile request by failure kind.
pub fn record_tile_error(kind: &'static str) {
    counter!("relay_tile_errors_total", "kind" => kind).increment(1);
}

/// Record how long the engine took to answer.
pub fn record_engine_duration(timer: &Timer) {
    histogram!("relay_engine_request_duration_seconds").record(timer.elapsed_secs());
}

/// Count one static asset request.
pub fn record_asset_request(asset: &'static str) {
    counter!("relay_asset_requests_total", "asset" => asset).increment(1);
}

pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_micros() as f64 / 1000.0
    }
}
