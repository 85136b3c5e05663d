//! Hardware description of the remote board
//!
//! The reference wiring is a Raspberry Pi Pico with an IR LED driver on
//! GPIO15, a DHT22 on GPIO2, the on-board LED as activity indicator and
//! the Wi-Fi bridge on UART0 (GPIO0/GPIO1).

/// Interval between sensor refreshes (ms)
pub const REFRESH_INTERVAL_MS: u32 = 30_000;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

/// RP2040 PWM output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    A,
    B,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }

    /// PWM slice this GPIO is routed to (GPIO n feeds slice (n / 2) mod 8)
    pub const fn pwm_slice(self) -> u8 {
        (self.pin >> 1) & 7
    }

    /// PWM channel this GPIO is routed to (even pins A, odd pins B)
    pub const fn pwm_channel(self) -> PwmChannel {
        if self.pin & 1 == 0 {
            PwmChannel::A
        } else {
            PwmChannel::B
        }
    }
}

/// Air-conditioner protocol family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceFamily {
    /// 35-byte, three-section frames on a 38 kHz carrier; only the
    /// last section carries settings.
    Daikin,
    /// 27-byte, two-section frames on a 36.7 kHz carrier with a fixed
    /// 8-byte preamble section.
    Panasonic,
}

impl DeviceFamily {
    pub const fn name(self) -> &'static str {
        match self {
            DeviceFamily::Daikin => "Daikin",
            DeviceFamily::Panasonic => "Panasonic",
        }
    }
}

/// Supported ambient sensor variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    /// Integer readings, 0-50 °C
    Dht11,
    /// 0.1 resolution, -40-80 °C
    #[default]
    Dht22,
}

/// Complete hardware description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// IR LED driver output
    pub ir: PinConfig,
    /// Sensor single-wire data line
    pub sensor: PinConfig,
    pub sensor_kind: SensorKind,
    /// Activity indicator
    pub led: PinConfig,
    pub device_family: DeviceFamily,
    pub refresh_interval_ms: u32,
    /// Bridge UART baud rate
    pub link_baud: u32,
}

impl BoardConfig {
    /// Reference wiring
    pub const DEFAULT: Self = Self {
        ir: PinConfig::new(15),
        sensor: PinConfig::new(2),
        sensor_kind: SensorKind::Dht22,
        led: PinConfig::new(25),
        device_family: DeviceFamily::Daikin,
        refresh_interval_ms: REFRESH_INTERVAL_MS,
        link_baud: 115_200,
    };

    /// Check that no GPIO is assigned two roles
    pub const fn pins_distinct(&self) -> bool {
        self.ir.pin != self.sensor.pin
            && self.ir.pin != self.led.pin
            && self.sensor.pin != self.led.pin
    }

    /// Same wiring, different device family
    pub const fn with_family(self, device_family: DeviceFamily) -> Self {
        Self {
            device_family,
            ..self
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_wiring() {
        let config = BoardConfig::default();
        assert_eq!(config.ir.pin, 15);
        assert_eq!(config.sensor_kind, SensorKind::Dht22);
        assert!(!config.led.inverted);
        assert_eq!(config.refresh_interval_ms, 30_000);
    }

    #[test]
    fn test_pwm_routing() {
        let ir = BoardConfig::DEFAULT.ir;
        assert_eq!(ir.pwm_slice(), 7);
        assert_eq!(ir.pwm_channel(), PwmChannel::B);

        assert_eq!(PinConfig::new(0).pwm_slice(), 0);
        assert_eq!(PinConfig::new(0).pwm_channel(), PwmChannel::A);
        assert_eq!(PinConfig::new(16).pwm_slice(), 0);
        assert_eq!(PinConfig::new(29).pwm_slice(), 6);
        assert_eq!(PinConfig::new(29).pwm_channel(), PwmChannel::B);
    }

    #[test]
    fn test_pins_distinct() {
        assert!(BoardConfig::DEFAULT.pins_distinct());

        let clash = BoardConfig {
            led: PinConfig::new(2),
            ..BoardConfig::DEFAULT
        };
        assert!(!clash.pins_distinct());
    }

    #[test]
    fn test_with_family_keeps_wiring() {
        let config = BoardConfig::DEFAULT.with_family(DeviceFamily::Panasonic);
        assert_eq!(config.device_family, DeviceFamily::Panasonic);
        assert_eq!(config.ir, BoardConfig::DEFAULT.ir);
        assert_eq!(config.device_family.name(), "Panasonic");
    }
}
