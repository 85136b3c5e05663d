//! Mock collaborators for unit tests

use std::vec::Vec;

use kaze_hal::{FlashError, PersistentStorage, StorageKey};
use kaze_protocol::StateReport;

use crate::climate::{FanSpeed, Mode};
use crate::traits::{
    ClimateSensor, Indicator, PublishError, SensorError, StatePublisher, TargetDevice,
    TransmitError,
};

/// Every call a controller can make on a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCall {
    PowerOn,
    PowerOff,
    Mode(Mode),
    FanSpeed(FanSpeed),
    Temperature(i32),
    SwingVertical(bool),
    SwingHorizontal(bool),
    Quiet(bool),
    Powerful(bool),
    Transmit,
}

#[derive(Default)]
pub struct MockDevice {
    pub calls: Vec<DeviceCall>,
    pub fail_transmit: bool,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, call: DeviceCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl TargetDevice for MockDevice {
    fn power_on(&mut self) {
        self.calls.push(DeviceCall::PowerOn);
    }

    fn power_off(&mut self) {
        self.calls.push(DeviceCall::PowerOff);
    }

    fn set_mode(&mut self, mode: Mode) {
        self.calls.push(DeviceCall::Mode(mode));
    }

    fn set_fan_speed(&mut self, speed: FanSpeed) {
        self.calls.push(DeviceCall::FanSpeed(speed));
    }

    fn set_temperature(&mut self, celsius: i32) {
        self.calls.push(DeviceCall::Temperature(celsius));
    }

    fn set_swing_vertical(&mut self, on: bool) {
        self.calls.push(DeviceCall::SwingVertical(on));
    }

    fn set_swing_horizontal(&mut self, on: bool) {
        self.calls.push(DeviceCall::SwingHorizontal(on));
    }

    fn set_quiet(&mut self, on: bool) {
        self.calls.push(DeviceCall::Quiet(on));
    }

    fn set_powerful(&mut self, on: bool) {
        self.calls.push(DeviceCall::Powerful(on));
    }

    fn transmit(&mut self) -> Result<(), TransmitError> {
        self.calls.push(DeviceCall::Transmit);
        if self.fail_transmit {
            Err(TransmitError::Encoding)
        } else {
            Ok(())
        }
    }
}

/// RAM-backed key-value storage counting writes
///
/// Holds the single settings value. A failed write leaves the previous
/// value in place, as a power-fail safe backend must.
#[derive(Default)]
pub struct MockStorage {
    pub value: Option<Vec<u8>>,
    pub writes: usize,
    pub erases: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub corrupted: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStorage for MockStorage {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        if self.fail_reads {
            return Err(FlashError::Flash);
        }
        if self.corrupted {
            return Err(FlashError::Corrupted);
        }
        let value = match key {
            StorageKey::Settings => self.value.as_ref().ok_or(FlashError::NotFound)?,
        };
        let dest = buffer
            .get_mut(..value.len())
            .ok_or(FlashError::BufferTooSmall)?;
        dest.copy_from_slice(value);
        Ok(value.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if self.fail_writes {
            return Err(FlashError::Flash);
        }
        match key {
            StorageKey::Settings => self.value = Some(data.to_vec()),
        }
        self.writes += 1;
        Ok(())
    }

    fn erase_all(&mut self) -> Result<(), FlashError> {
        self.value = None;
        self.corrupted = false;
        self.erases += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockPublisher {
    pub reports: Vec<StateReport<'static>>,
}

impl StatePublisher for MockPublisher {
    fn publish(&mut self, report: &StateReport<'_>) -> Result<(), PublishError> {
        // Canonical names are 'static, so re-borrow them for storage
        let owned = StateReport {
            target_mode: Mode::parse(report.target_mode)
                .map(Mode::as_str)
                .unwrap_or("?"),
            target_fan_speed: FanSpeed::parse(report.target_fan_speed)
                .map(FanSpeed::as_str)
                .unwrap_or("?"),
            current_temperature: report.current_temperature,
            current_humidity: report.current_humidity,
            target_temperature: report.target_temperature,
            vertical_swing: report.vertical_swing,
            horizontal_swing: report.horizontal_swing,
            quiet_mode: report.quiet_mode,
            powerful_mode: report.powerful_mode,
        };
        self.reports.push(owned);
        Ok(())
    }
}

/// Records indicator transitions as `true` (on) / `false` (off)
#[derive(Default)]
pub struct MockIndicator {
    pub transitions: Vec<bool>,
}

impl Indicator for MockIndicator {
    fn on(&mut self) {
        self.transitions.push(true);
    }

    fn off(&mut self) {
        self.transitions.push(false);
    }
}

/// Sensor returning a scripted sample, or failing
pub struct MockSensor {
    pub temperature: Result<f32, SensorError>,
    pub humidity: Result<f32, SensorError>,
    pub reads: usize,
}

impl MockSensor {
    pub fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature: Ok(temperature),
            humidity: Ok(humidity),
            reads: 0,
        }
    }

    pub fn failing() -> Self {
        Self {
            temperature: Err(SensorError::Timeout),
            humidity: Err(SensorError::Timeout),
            reads: 0,
        }
    }
}

impl ClimateSensor for MockSensor {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.reads += 1;
        self.temperature
    }

    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        self.reads += 1;
        self.humidity
    }
}
