//! Climate types
//!
//! Mode and fan speed travel as lowercase strings on the wire and are
//! accepted case-insensitively. Internally they are closed enums so an
//! unrecognized value can never reach the target device.

use kaze_protocol::StateReport;

/// Target temperature the device boots with
pub const DEFAULT_TARGET_TEMPERATURE: i32 = 23;

/// Operating mode of the air conditioner
///
/// `Off` is a power state rather than a real mode; selecting it powers
/// the unit down without changing the device's last real mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Off,
    Cool,
    Heat,
    Fan,
    Auto,
    Dry,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Off,
        Mode::Cool,
        Mode::Heat,
        Mode::Fan,
        Mode::Auto,
        Mode::Dry,
    ];

    /// Parse a client-supplied mode, ignoring ASCII case
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(value))
    }

    /// Canonical lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Off => "off",
            Mode::Cool => "cool",
            Mode::Heat => "heat",
            Mode::Fan => "fan",
            Mode::Auto => "auto",
            Mode::Dry => "dry",
        }
    }

    /// Check if this mode keeps the unit powered
    pub const fn is_on(self) -> bool {
        !matches!(self, Mode::Off)
    }
}

/// Fan speed setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FanSpeed {
    #[default]
    Auto,
    Min,
    Max,
}

impl FanSpeed {
    pub const ALL: [FanSpeed; 3] = [FanSpeed::Auto, FanSpeed::Min, FanSpeed::Max];

    /// Parse a client-supplied fan speed, ignoring ASCII case
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.as_str().eq_ignore_ascii_case(value))
    }

    /// Canonical lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            FanSpeed::Auto => "auto",
            FanSpeed::Min => "min",
            FanSpeed::Max => "max",
        }
    }
}

/// Canonical state owned by the controller
///
/// This is the single source of truth: network clients see it verbatim,
/// and the target device is only ever told about values that are
/// already stored here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateState {
    /// Last valid ambient temperature sample (°C)
    pub current_temperature: Option<f32>,
    /// Last valid relative humidity sample (%)
    pub current_humidity: Option<f32>,
    pub target_mode: Mode,
    pub target_fan_speed: FanSpeed,
    /// Requested temperature (°C), stored unclamped
    pub target_temperature: i32,
    pub vertical_swing: bool,
    pub horizontal_swing: bool,
    pub quiet_mode: bool,
    pub powerful_mode: bool,
}

impl Default for ClimateState {
    fn default() -> Self {
        Self {
            current_temperature: None,
            current_humidity: None,
            target_mode: Mode::Off,
            target_fan_speed: FanSpeed::Auto,
            target_temperature: DEFAULT_TARGET_TEMPERATURE,
            vertical_swing: true,
            horizontal_swing: true,
            quiet_mode: false,
            powerful_mode: false,
        }
    }
}

impl ClimateState {
    /// Build the wire record for this state
    pub fn report(&self) -> StateReport<'static> {
        StateReport {
            current_temperature: self.current_temperature,
            current_humidity: self.current_humidity,
            target_mode: self.target_mode.as_str(),
            target_fan_speed: self.target_fan_speed.as_str(),
            target_temperature: self.target_temperature,
            vertical_swing: self.vertical_swing,
            horizontal_swing: self.horizontal_swing,
            quiet_mode: self.quiet_mode,
            powerful_mode: self.powerful_mode,
        }
    }
}
