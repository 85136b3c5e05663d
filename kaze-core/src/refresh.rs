//! Periodic sensor refresh
//!
//! Every interval the ambient sensor is sampled and the state is
//! re-broadcast, so idle clients still see temperature drift. Time is a
//! free-running 32-bit millisecond counter; comparisons use wrapping
//! arithmetic so the refresh keeps its cadence across the ~49 day wrap.

use kaze_hal::PersistentStorage;

use crate::config::REFRESH_INTERVAL_MS;
use crate::controller::ClimateController;
use crate::traits::{ClimateSensor, Indicator, StatePublisher, TargetDevice};

/// Fixed-interval sampler driving sensor reads and broadcasts
#[derive(Debug, Clone, Copy)]
pub struct Refresher {
    interval_ms: u32,
    last_run_ms: u32,
}

impl Default for Refresher {
    fn default() -> Self {
        Self::new(REFRESH_INTERVAL_MS)
    }
}

impl Refresher {
    /// Create a refresher whose clock starts at zero
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_run_ms: 0,
        }
    }

    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Check if a refresh is due at `now_ms`
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_run_ms) >= self.interval_ms
    }

    /// Run one refresh if the interval has elapsed
    ///
    /// Returns `true` when a refresh ran.
    pub fn poll<S, D, B, P, L>(
        &mut self,
        now_ms: u32,
        sensor: &mut S,
        controller: &mut ClimateController<D, B, P, L>,
    ) -> bool
    where
        S: ClimateSensor,
        D: TargetDevice,
        B: PersistentStorage,
        P: StatePublisher,
        L: Indicator,
    {
        if !self.is_due(now_ms) {
            return false;
        }

        self.last_run_ms = now_ms;
        Self::sample(sensor, controller);
        controller.broadcast();
        true
    }

    /// Take one sensor sample into the controller
    ///
    /// A failed read keeps the previous sample. Returns `true` when a new
    /// sample was stored.
    pub fn sample<S, D, B, P, L>(
        sensor: &mut S,
        controller: &mut ClimateController<D, B, P, L>,
    ) -> bool
    where
        S: ClimateSensor,
        D: TargetDevice,
        B: PersistentStorage,
        P: StatePublisher,
        L: Indicator,
    {
        let humidity = sensor.read_humidity();
        let temperature = sensor.read_temperature();

        match (temperature, humidity) {
            (Ok(t), Ok(h)) if t.is_finite() && h.is_finite() => {
                controller.record_climate(t, h);
                true
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Sensor read failed: {}", e);
                false
            }
            _ => {
                warn!("Sensor returned a non-finite sample");
                false
            }
        }
    }
}
