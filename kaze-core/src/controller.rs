//! Climate state machine
//!
//! The controller owns the canonical [`ClimateState`] and is the only
//! thing that mutates it. Every setter follows the same pattern:
//!
//! ```text
//!   input ──► normalize ──► TargetDevice (always)
//!                      └──► canonical field + SettingsStore (on change)
//! ```
//!
//! Setters only stage. A batch of setters is closed by [`commit`], which
//! transmits to the device, publishes the snapshot and flushes the store.
//!
//! [`commit`]: ClimateController::commit

use kaze_hal::PersistentStorage;
use kaze_protocol::{ChangeRequest, StateReport};

use crate::climate::{ClimateState, FanSpeed, Mode};
use crate::settings::{SettingKey, SettingsStore};
use crate::traits::{Indicator, StatePublisher, TargetDevice};

/// Owns the climate state and drives every collaborator
pub struct ClimateController<D, B, P, L>
where
    D: TargetDevice,
    B: PersistentStorage,
    P: StatePublisher,
    L: Indicator,
{
    state: ClimateState,
    device: D,
    settings: SettingsStore<B>,
    publisher: P,
    indicator: L,
}

impl<D, B, P, L> ClimateController<D, B, P, L>
where
    D: TargetDevice,
    B: PersistentStorage,
    P: StatePublisher,
    L: Indicator,
{
    /// Create a controller holding the default state
    pub fn new(device: D, settings: SettingsStore<B>, publisher: P, indicator: L) -> Self {
        Self {
            state: ClimateState::default(),
            device,
            settings,
            publisher,
            indicator,
        }
    }

    /// Startup sequence
    pub fn begin(&mut self) {
        self.restore();
    }

    /// Current canonical state
    pub fn state(&self) -> &ClimateState {
        &self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn settings(&self) -> &SettingsStore<B> {
        &self.settings
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    /// Set the operating mode from a client string
    ///
    /// Unrecognized values fall back to `off`.
    pub fn set_mode(&mut self, value: &str) {
        let mode = Mode::parse(value).unwrap_or_else(|| {
            warn!("Unknown mode, turning off");
            Mode::Off
        });

        if mode.is_on() {
            self.device.power_on();
            self.device.set_mode(mode);
        } else {
            self.device.power_off();
        }

        if mode != self.state.target_mode {
            info!(
                "Mode: {} -> {}",
                self.state.target_mode.as_str(),
                mode.as_str()
            );
            self.state.target_mode = mode;
        }
    }

    /// Set the fan speed from a client string
    ///
    /// Unrecognized values fall back to `auto`.
    pub fn set_fan_speed(&mut self, value: &str) {
        let speed = FanSpeed::parse(value).unwrap_or_else(|| {
            warn!("Unknown fan speed, using auto");
            FanSpeed::Auto
        });

        self.device.set_fan_speed(speed);

        if speed != self.state.target_fan_speed {
            info!(
                "Fan speed: {} -> {}",
                self.state.target_fan_speed.as_str(),
                speed.as_str()
            );
            self.state.target_fan_speed = speed;
        }
    }

    /// Set the target temperature (°C)
    pub fn set_temperature(&mut self, celsius: i32) {
        self.device.set_temperature(celsius);
        self.state.target_temperature = celsius;
    }

    pub fn set_vertical_swing(&mut self, on: bool) {
        self.device.set_swing_vertical(on);
        if on != self.state.vertical_swing {
            self.settings.set_flag(SettingKey::VerticalSwing, on);
            self.state.vertical_swing = on;
        }
    }

    pub fn set_horizontal_swing(&mut self, on: bool) {
        self.device.set_swing_horizontal(on);
        if on != self.state.horizontal_swing {
            self.settings.set_flag(SettingKey::HorizontalSwing, on);
            self.state.horizontal_swing = on;
        }
    }

    /// Set quiet mode; enabling it turns powerful mode off
    pub fn set_quiet_mode(&mut self, on: bool) {
        self.apply_quiet(on);
        if on {
            self.apply_powerful(false);
        }
    }

    /// Set powerful mode; enabling it turns quiet mode off
    pub fn set_powerful_mode(&mut self, on: bool) {
        self.apply_powerful(on);
        if on {
            self.apply_quiet(false);
        }
    }

    fn apply_quiet(&mut self, on: bool) {
        self.device.set_quiet(on);
        if on != self.state.quiet_mode {
            self.settings.set_flag(SettingKey::QuietMode, on);
            self.state.quiet_mode = on;
        }
    }

    fn apply_powerful(&mut self, on: bool) {
        self.device.set_powerful(on);
        if on != self.state.powerful_mode {
            self.settings.set_flag(SettingKey::PowerfulMode, on);
            self.state.powerful_mode = on;
        }
    }

    /// Apply a sparse client request, then commit once
    pub fn apply_request(&mut self, request: &ChangeRequest<'_>) {
        if let Some(mode) = request.target_mode {
            self.set_mode(mode);
        }
        if let Some(speed) = request.target_fan_speed {
            self.set_fan_speed(speed);
        }
        if let Some(celsius) = request.target_temperature {
            self.set_temperature(celsius);
        }
        if let Some(on) = request.vertical_swing {
            self.set_vertical_swing(on);
        }
        if let Some(on) = request.horizontal_swing {
            self.set_horizontal_swing(on);
        }
        if let Some(on) = request.quiet_mode {
            self.set_quiet_mode(on);
        }
        if let Some(on) = request.powerful_mode {
            self.set_powerful_mode(on);
        }

        self.commit();
    }

    /// Transmit the staged state, publish it and flush settings
    ///
    /// Failures are logged; canonical state is never rolled back.
    pub fn commit(&mut self) {
        self.indicator.on();
        if let Err(e) = self.device.transmit() {
            error!("Transmit failed: {}", e);
        }
        self.indicator.off();

        self.broadcast();

        match self.settings.commit() {
            Ok(true) => debug!("Settings committed"),
            Ok(false) => {}
            Err(e) => error!("Settings commit failed: {}", e),
        }
    }

    /// Publish the current snapshot without transmitting
    pub fn broadcast(&mut self) {
        let report = self.snapshot();
        if let Err(e) = self.publisher.publish(&report) {
            warn!("Publish failed: {}", e);
        }
    }

    /// Re-apply the persisted flags after a reboot
    ///
    /// Pushes the whole canonical state into the device without
    /// transmitting, so the next commit sends a complete command.
    pub fn restore(&mut self) {
        self.state.vertical_swing = self.settings.flag(SettingKey::VerticalSwing);
        self.state.horizontal_swing = self.settings.flag(SettingKey::HorizontalSwing);
        self.state.quiet_mode = self.settings.flag(SettingKey::QuietMode);
        self.state.powerful_mode = self.settings.flag(SettingKey::PowerfulMode);

        let state = self.state;
        self.set_mode(state.target_mode.as_str());
        self.set_fan_speed(state.target_fan_speed.as_str());
        self.set_vertical_swing(state.vertical_swing);
        self.set_horizontal_swing(state.horizontal_swing);
        self.set_quiet_mode(state.quiet_mode);
        self.set_powerful_mode(state.powerful_mode);

        info!(
            "Restored: vswing={} hswing={} quiet={} powerful={}",
            self.state.vertical_swing,
            self.state.horizontal_swing,
            self.state.quiet_mode,
            self.state.powerful_mode
        );
    }

    /// Flat record of the public state
    pub fn snapshot(&self) -> StateReport<'static> {
        self.state.report()
    }

    /// Store a valid sensor sample
    pub fn record_climate(&mut self, temperature: f32, humidity: f32) {
        self.state.current_temperature = Some(temperature);
        self.state.current_humidity = Some(humidity);
    }
}
