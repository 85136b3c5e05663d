//! Panasonic air conditioner protocol
//!
//! # Frame Layout
//!
//! Two sections sent back to back: a fixed 8-byte preamble and a 19-byte
//! settings block whose last byte is an additive checksum seeded with
//! `0xF4`.
//!
//! | Byte | Bits | Field                                         |
//! |------|------|-----------------------------------------------|
//! | 13   | 0    | power                                         |
//! | 13   | 4-7  | mode                                          |
//! | 14   | 1-5  | temperature × 2                               |
//! | 16   | 0-3  | vertical swing (0xF auto, 0x1 highest)        |
//! | 16   | 4-7  | fan (0xA auto, 0x3 min, 0x7 max)              |
//! | 17   | 0-3  | horizontal swing (0xD auto, 0x6 middle)       |
//! | 21   | 0    | quiet                                         |
//! | 21   | 5    | powerful                                      |
//! | 26   | all  | checksum of bytes 8-25                        |

use kaze_core::climate::{FanSpeed, Mode};
use kaze_core::traits::{TargetDevice, TransmitError};
use kaze_hal::IrOutput;

use super::waveform::{CapacityError, PulseTiming, Waveform};

/// Total state length
pub const STATE_LENGTH: usize = 27;

/// Carrier frequency (Hz)
pub const CARRIER_HZ: u32 = 36_700;

/// Supported target temperature range (°C)
pub const MIN_TEMP: i32 = 16;
pub const MAX_TEMP: i32 = 30;

const PREAMBLE_LENGTH: usize = 8;
const CHECKSUM_INIT: u8 = 0xF4;

const TIMING: PulseTiming = PulseTiming {
    header_mark: 3456,
    header_space: 1728,
    bit_mark: 432,
    one_space: 1296,
    zero_space: 432,
};

const SECTION_GAP_US: u16 = 10_000;

/// Known-good idle state
const RESET_STATE: [u8; STATE_LENGTH] = [
    0x02, 0x20, 0xE0, 0x04, 0x00, 0x00, 0x00, 0x06, 0x02, 0x20, 0xE0, 0x04, 0x00, 0x00, 0x00,
    0x80, 0x00, 0x00, 0x00, 0x0E, 0xE0, 0x00, 0x00, 0x89, 0x00, 0x00, 0x00,
];

/// State bytes and field positions
pub mod byte {
    pub const POWER_MODE: usize = 13;
    pub const TEMPERATURE: usize = 14;
    pub const FAN_SWING_V: usize = 16;
    pub const SWING_H: usize = 17;
    pub const SPECIAL: usize = 21;
    pub const CHECKSUM: usize = 26;

    pub const POWER_BIT: u8 = 0x01;
    pub const QUIET_BIT: u8 = 0x01;
    pub const POWERFUL_BIT: u8 = 0x20;
}

/// Protocol mode codes
pub mod mode {
    pub const AUTO: u8 = 0x0;
    pub const DRY: u8 = 0x2;
    pub const COOL: u8 = 0x3;
    pub const HEAT: u8 = 0x4;
    pub const FAN: u8 = 0x6;
}

/// Protocol fan codes
pub mod fan {
    pub const AUTO: u8 = 0xA;
    pub const MIN: u8 = 0x3;
    pub const MAX: u8 = 0x7;
}

/// Vertical swing codes
pub mod swing_v {
    pub const AUTO: u8 = 0xF;
    pub const HIGHEST: u8 = 0x1;
}

/// Horizontal swing codes
pub mod swing_h {
    pub const AUTO: u8 = 0xD;
    pub const MIDDLE: u8 = 0x6;
}

/// Panasonic air conditioner driven through an IR emitter
pub struct PanasonicAc<O> {
    output: O,
    state: [u8; STATE_LENGTH],
}

impl<O: IrOutput> PanasonicAc<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            state: RESET_STATE,
        }
    }

    /// Raw state with the checksum filled in
    pub fn state(&mut self) -> &[u8; STATE_LENGTH] {
        self.update_checksum();
        &self.state
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    fn update_checksum(&mut self) {
        self.state[byte::CHECKSUM] = checksum(&self.state);
    }

    /// Build the full pulse train for the current state
    pub fn waveform(&mut self) -> Result<Waveform, CapacityError> {
        self.update_checksum();

        let mut wave = Waveform::new(CARRIER_HZ);
        wave.header(&TIMING)?;
        wave.bytes(&TIMING, &self.state[..PREAMBLE_LENGTH])?;
        wave.footer(&TIMING, SECTION_GAP_US)?;
        wave.header(&TIMING)?;
        wave.bytes(&TIMING, &self.state[PREAMBLE_LENGTH..])?;
        wave.footer(&TIMING, 0)?;

        Ok(wave)
    }

    fn set_bit(&mut self, index: usize, mask: u8, on: bool) {
        if on {
            self.state[index] |= mask;
        } else {
            self.state[index] &= !mask;
        }
    }

    fn set_low_nibble(&mut self, index: usize, value: u8) {
        self.state[index] = (self.state[index] & 0xF0) | (value & 0x0F);
    }

    fn set_high_nibble(&mut self, index: usize, value: u8) {
        self.state[index] = (self.state[index] & 0x0F) | (value << 4);
    }
}

impl<O: IrOutput> TargetDevice for PanasonicAc<O> {
    fn power_on(&mut self) {
        self.set_bit(byte::POWER_MODE, byte::POWER_BIT, true);
    }

    fn power_off(&mut self) {
        self.set_bit(byte::POWER_MODE, byte::POWER_BIT, false);
    }

    fn set_mode(&mut self, mode: Mode) {
        let code = match mode {
            Mode::Auto => mode::AUTO,
            Mode::Dry => mode::DRY,
            Mode::Cool => mode::COOL,
            Mode::Heat => mode::HEAT,
            Mode::Fan => mode::FAN,
            Mode::Off => return,
        };
        self.set_high_nibble(byte::POWER_MODE, code);
    }

    fn set_fan_speed(&mut self, speed: FanSpeed) {
        let code = match speed {
            FanSpeed::Auto => fan::AUTO,
            FanSpeed::Min => fan::MIN,
            FanSpeed::Max => fan::MAX,
        };
        self.set_high_nibble(byte::FAN_SWING_V, code);
    }

    fn set_temperature(&mut self, celsius: i32) {
        let clamped = celsius.clamp(MIN_TEMP, MAX_TEMP) as u8;
        let current = self.state[byte::TEMPERATURE];
        self.state[byte::TEMPERATURE] = (current & 0b1100_0001) | (clamped << 1);
    }

    fn set_swing_vertical(&mut self, on: bool) {
        let code = if on { swing_v::AUTO } else { swing_v::HIGHEST };
        self.set_low_nibble(byte::FAN_SWING_V, code);
    }

    fn set_swing_horizontal(&mut self, on: bool) {
        let code = if on { swing_h::AUTO } else { swing_h::MIDDLE };
        self.set_low_nibble(byte::SWING_H, code);
    }

    fn set_quiet(&mut self, on: bool) {
        self.set_bit(byte::SPECIAL, byte::QUIET_BIT, on);
    }

    fn set_powerful(&mut self, on: bool) {
        self.set_bit(byte::SPECIAL, byte::POWERFUL_BIT, on);
    }

    fn transmit(&mut self) -> Result<(), TransmitError> {
        let wave = self.waveform().map_err(|_| TransmitError::Encoding)?;
        wave.send(&mut self.output)?;
        Ok(())
    }
}

/// Checksum over the settings block, excluding the checksum byte
fn checksum(state: &[u8; STATE_LENGTH]) -> u8 {
    state[PREAMBLE_LENGTH..byte::CHECKSUM]
        .iter()
        .fold(CHECKSUM_INIT, |sum, &b| sum.wrapping_add(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockIr;

    fn adapter() -> PanasonicAc<MockIr> {
        PanasonicAc::new(MockIr::default())
    }

    #[test]
    fn test_reset_state_checksum() {
        let mut ac = adapter();
        // 0xF4 + 0x2FD, truncated
        assert_eq!(ac.state()[byte::CHECKSUM], 0xF1);
    }

    #[test]
    fn test_power_and_mode() {
        let mut ac = adapter();
        ac.power_on();
        ac.set_mode(Mode::Heat);
        assert_eq!(ac.state()[byte::POWER_MODE], 0x41);

        ac.power_off();
        assert_eq!(ac.state()[byte::POWER_MODE], 0x40);
    }

    #[test]
    fn test_temperature_clamped() {
        let mut ac = adapter();
        ac.set_temperature(23);
        assert_eq!(ac.state()[byte::TEMPERATURE], 46);

        ac.set_temperature(10);
        assert_eq!(ac.state()[byte::TEMPERATURE], 32);

        ac.set_temperature(35);
        assert_eq!(ac.state()[byte::TEMPERATURE], 60);
    }

    #[test]
    fn test_swing_mapping() {
        let mut ac = adapter();
        ac.set_swing_vertical(true);
        ac.set_swing_horizontal(true);
        assert_eq!(ac.state()[byte::FAN_SWING_V] & 0x0F, swing_v::AUTO);
        assert_eq!(ac.state()[byte::SWING_H] & 0x0F, swing_h::AUTO);

        ac.set_swing_vertical(false);
        ac.set_swing_horizontal(false);
        assert_eq!(ac.state()[byte::FAN_SWING_V] & 0x0F, swing_v::HIGHEST);
        assert_eq!(ac.state()[byte::SWING_H] & 0x0F, swing_h::MIDDLE);
    }

    #[test]
    fn test_fan_speed() {
        let mut ac = adapter();
        ac.set_swing_vertical(true);
        ac.set_fan_speed(FanSpeed::Min);
        assert_eq!(ac.state()[byte::FAN_SWING_V], 0x3F);
        ac.set_fan_speed(FanSpeed::Auto);
        assert_eq!(ac.state()[byte::FAN_SWING_V], 0xAF);
    }

    #[test]
    fn test_quiet_and_powerful_bits() {
        let mut ac = adapter();
        ac.set_powerful(true);
        assert_eq!(ac.state()[byte::SPECIAL], 0x20);
        ac.set_powerful(false);
        ac.set_quiet(true);
        assert_eq!(ac.state()[byte::SPECIAL], 0x01);
    }

    #[test]
    fn test_checksum_tracks_changes() {
        let mut ac = adapter();
        ac.power_on();
        ac.set_mode(Mode::Cool);
        ac.set_temperature(21);
        ac.set_quiet(true);

        let state = *ac.state();
        assert_eq!(state[byte::CHECKSUM], checksum(&state));
        // Preamble never changes
        assert_eq!(state[..PREAMBLE_LENGTH], RESET_STATE[..PREAMBLE_LENGTH]);
    }

    #[test]
    fn test_transmit_layout() {
        let mut ac = adapter();
        ac.transmit().unwrap();

        let (carrier, timings) = &ac.output().sent[0];
        assert_eq!(*carrier, CARRIER_HZ);
        assert_eq!(timings[0], 3456);
        assert_eq!(timings[1], 1728);

        // End of preamble: footer mark, section gap, next header
        let gap = 2 + PREAMBLE_LENGTH * 16 + 1;
        assert_eq!(timings[gap - 1], 432);
        assert_eq!(timings[gap], SECTION_GAP_US);
        assert_eq!(timings[gap + 1], 3456);

        assert_eq!(timings.len(), 2 * 2 + STATE_LENGTH * 16 + 3);
    }
}
