//! Daikin air conditioner protocol
//!
//! # Frame Layout
//!
//! A command is a 5-bit leader followed by three sections, each starting
//! with the signature `11 DA 27` and ending in an additive checksum:
//!
//! ```text
//! ┌────────┬───────────┬───────────┬──────────────────────┐
//! │ leader │ section 1 │ section 2 │ section 3            │
//! │ 5 bits │ 8 bytes   │ 8 bytes   │ 19 bytes             │
//! └────────┴───────────┴───────────┴──────────────────────┘
//! ```
//!
//! Only section 3 carries settings:
//!
//! | Byte | Bits | Field                                   |
//! |------|------|-----------------------------------------|
//! | 21   | 0    | power                                   |
//! | 21   | 4-6  | mode                                    |
//! | 22   | 1-6  | temperature × 2                         |
//! | 24   | 0-3  | vertical swing (0xF auto, 0x0 fixed)    |
//! | 24   | 4-7  | fan (0xA auto, 3-7 speed 1-5)           |
//! | 25   | 0-3  | horizontal swing (0xF auto, 0x0 fixed)  |
//! | 29   | 0    | powerful                                |
//! | 29   | 5    | quiet                                   |

use kaze_core::climate::{FanSpeed, Mode};
use kaze_core::traits::{TargetDevice, TransmitError};
use kaze_hal::IrOutput;

use super::waveform::{CapacityError, PulseTiming, Waveform};

/// Total state length
pub const STATE_LENGTH: usize = 35;

/// Carrier frequency (Hz)
pub const CARRIER_HZ: u32 = 38_000;

/// Supported target temperature range (°C)
pub const MIN_TEMP: i32 = 10;
pub const MAX_TEMP: i32 = 32;

const SECTION_1: core::ops::Range<usize> = 0..8;
const SECTION_2: core::ops::Range<usize> = 8..16;
const SECTION_3: core::ops::Range<usize> = 16..35;

const TIMING: PulseTiming = PulseTiming {
    header_mark: 3650,
    header_space: 1623,
    bit_mark: 428,
    one_space: 1280,
    zero_space: 428,
};

/// Footer space between sections (zero space plus message gap)
const GAP_US: u16 = 428 + 29_000;
const LEADER_BITS: u8 = 5;

/// State bytes and field positions
pub mod byte {
    pub const POWER_MODE: usize = 21;
    pub const TEMPERATURE: usize = 22;
    pub const FAN_SWING_V: usize = 24;
    pub const SWING_H: usize = 25;
    pub const SPECIAL: usize = 29;

    pub const POWER_BIT: u8 = 0x01;
    pub const POWERFUL_BIT: u8 = 0x01;
    pub const QUIET_BIT: u8 = 0x20;
}

/// Protocol mode codes
pub mod mode {
    pub const AUTO: u8 = 0b000;
    pub const DRY: u8 = 0b010;
    pub const COOL: u8 = 0b011;
    pub const HEAT: u8 = 0b100;
    pub const FAN: u8 = 0b110;
}

/// Protocol fan codes
pub mod fan {
    pub const AUTO: u8 = 0xA;
    /// Speed 1
    pub const MIN: u8 = 0x3;
    /// Speed 5
    pub const MAX: u8 = 0x7;
}

const SWING_AUTO: u8 = 0xF;
const SWING_FIXED: u8 = 0x0;

/// Daikin air conditioner driven through an IR emitter
pub struct DaikinAc<O> {
    output: O,
    state: [u8; STATE_LENGTH],
}

impl<O: IrOutput> DaikinAc<O> {
    /// Create an adapter holding the protocol's reset state
    pub fn new(output: O) -> Self {
        let mut state = [0u8; STATE_LENGTH];
        for start in [SECTION_1.start, SECTION_2.start, SECTION_3.start] {
            state[start..start + 3].copy_from_slice(&[0x11, 0xDA, 0x27]);
        }
        state[4] = 0xC5;
        state[12] = 0x42;
        state[21] = 0x49;
        state[22] = 0x1E;
        state[24] = 0xB0;
        state[27] = 0x06;
        state[28] = 0x60;
        state[31] = 0xC0;

        Self { output, state }
    }

    /// Raw state with checksums filled in
    pub fn state(&mut self) -> &[u8; STATE_LENGTH] {
        self.update_checksums();
        &self.state
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    fn update_checksums(&mut self) {
        for section in [SECTION_1, SECTION_2, SECTION_3] {
            let last = section.end - 1;
            self.state[last] = sum_bytes(&self.state[section.start..last]);
        }
    }

    /// Build the full pulse train for the current state
    pub fn waveform(&mut self) -> Result<Waveform, CapacityError> {
        self.update_checksums();

        let mut wave = Waveform::new(CARRIER_HZ);
        wave.bits(&TIMING, 0, LEADER_BITS)?;
        wave.footer(&TIMING, GAP_US)?;

        for section in [SECTION_1, SECTION_2, SECTION_3] {
            let is_last = section.end == STATE_LENGTH;
            wave.header(&TIMING)?;
            wave.bytes(&TIMING, &self.state[section])?;
            wave.footer(&TIMING, if is_last { 0 } else { GAP_US })?;
        }

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

impl<O: IrOutput> TargetDevice for DaikinAc<O> {
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
            // Power state is carried by the power bit only
            Mode::Off => return,
        };
        let current = self.state[byte::POWER_MODE];
        self.state[byte::POWER_MODE] = (current & 0x8F) | (code << 4);
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
        self.state[byte::TEMPERATURE] = clamped * 2;
    }

    fn set_swing_vertical(&mut self, on: bool) {
        self.set_low_nibble(byte::FAN_SWING_V, if on { SWING_AUTO } else { SWING_FIXED });
    }

    fn set_swing_horizontal(&mut self, on: bool) {
        self.set_low_nibble(byte::SWING_H, if on { SWING_AUTO } else { SWING_FIXED });
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

fn sum_bytes(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockIr;
    use proptest::prelude::*;

    fn adapter() -> DaikinAc<MockIr> {
        DaikinAc::new(MockIr::default())
    }

    fn assert_checksums(state: &[u8; STATE_LENGTH]) {
        for section in [SECTION_1, SECTION_2, SECTION_3] {
            let last = section.end - 1;
            assert_eq!(state[last], sum_bytes(&state[section.start..last]));
        }
    }

    #[test]
    fn test_reset_state_signatures() {
        let mut ac = adapter();
        let state = ac.state();
        assert_eq!(state[0..3], [0x11, 0xDA, 0x27]);
        assert_eq!(state[8..11], [0x11, 0xDA, 0x27]);
        assert_eq!(state[16..19], [0x11, 0xDA, 0x27]);
        assert_eq!(state[7], 0xD7);
        assert_checksums(state);
    }

    #[test]
    fn test_power_and_mode() {
        let mut ac = adapter();
        ac.power_off();
        ac.set_mode(Mode::Cool);
        assert_eq!(ac.state()[byte::POWER_MODE] & byte::POWER_BIT, 0);
        assert_eq!((ac.state()[byte::POWER_MODE] >> 4) & 0x07, mode::COOL);

        ac.power_on();
        ac.set_mode(Mode::Dry);
        let value = ac.state()[byte::POWER_MODE];
        assert_eq!(value & byte::POWER_BIT, 1);
        assert_eq!((value >> 4) & 0x07, mode::DRY);
        // Fixed bit 3 untouched
        assert_eq!(value & 0x08, 0x08);
    }

    #[test]
    fn test_off_mode_does_not_touch_mode_bits() {
        let mut ac = adapter();
        ac.set_mode(Mode::Fan);
        let before = ac.state()[byte::POWER_MODE];
        ac.set_mode(Mode::Off);
        assert_eq!(ac.state()[byte::POWER_MODE], before);
    }

    #[test]
    fn test_temperature_clamped() {
        let mut ac = adapter();
        ac.set_temperature(24);
        assert_eq!(ac.state()[byte::TEMPERATURE], 48);

        ac.set_temperature(5);
        assert_eq!(ac.state()[byte::TEMPERATURE], 20);

        ac.set_temperature(40);
        assert_eq!(ac.state()[byte::TEMPERATURE], 64);
    }

    #[test]
    fn test_fan_and_vertical_swing_share_a_byte() {
        let mut ac = adapter();
        ac.set_fan_speed(FanSpeed::Max);
        ac.set_swing_vertical(true);
        assert_eq!(ac.state()[byte::FAN_SWING_V], 0x7F);

        ac.set_fan_speed(FanSpeed::Auto);
        ac.set_swing_vertical(false);
        assert_eq!(ac.state()[byte::FAN_SWING_V], 0xA0);

        ac.set_fan_speed(FanSpeed::Min);
        assert_eq!(ac.state()[byte::FAN_SWING_V], 0x30);
    }

    #[test]
    fn test_horizontal_swing() {
        let mut ac = adapter();
        ac.set_swing_horizontal(true);
        assert_eq!(ac.state()[byte::SWING_H] & 0x0F, 0x0F);
        ac.set_swing_horizontal(false);
        assert_eq!(ac.state()[byte::SWING_H] & 0x0F, 0x00);
    }

    #[test]
    fn test_quiet_and_powerful_bits() {
        let mut ac = adapter();
        ac.set_quiet(true);
        assert_eq!(ac.state()[byte::SPECIAL], 0x20);
        ac.set_powerful(true);
        assert_eq!(ac.state()[byte::SPECIAL], 0x21);
        ac.set_quiet(false);
        assert_eq!(ac.state()[byte::SPECIAL], 0x01);
    }

    #[test]
    fn test_transmit_sends_whole_frame() {
        let mut ac = adapter();
        ac.power_on();
        ac.set_mode(Mode::Heat);
        ac.transmit().unwrap();

        let (carrier, timings) = &ac.output().sent[0];
        assert_eq!(*carrier, CARRIER_HZ);

        // Leader: 5 zero bits then footer mark, all marks and spaces alternate
        assert_eq!(timings[0], 428);
        assert_eq!(timings[10], 428);
        assert_eq!(timings[11], GAP_US);
        assert_eq!(timings[12], 3650);
        assert_eq!(timings[13], 1623);

        // leader + 3 × (header + bits + footer + gap), final gap dropped
        let bits = STATE_LENGTH * 8;
        assert_eq!(timings.len(), 12 + 3 * 4 + 2 * bits - 1);
        assert_eq!(timings.last(), Some(&428));
    }

    #[test]
    fn test_output_failure_is_reported() {
        let mut ac = DaikinAc::new(MockIr {
            fail: true,
            ..Default::default()
        });
        assert_eq!(
            ac.transmit(),
            Err(TransmitError::Output(kaze_hal::IrError::Hardware))
        );
    }

    proptest! {
        #[test]
        fn prop_checksums_always_valid(
            celsius in -50i32..80,
            mode_index in 0usize..6,
            quiet in any::<bool>(),
            powerful in any::<bool>(),
            swing in any::<bool>(),
        ) {
            let mut ac = adapter();
            ac.power_on();
            ac.set_mode(Mode::ALL[mode_index]);
            ac.set_temperature(celsius);
            ac.set_quiet(quiet);
            ac.set_powerful(powerful);
            ac.set_swing_vertical(swing);

            let state = *ac.state();
            assert_checksums(&state);
            let temp = state[byte::TEMPERATURE] as i32 / 2;
            prop_assert!((MIN_TEMP..=MAX_TEMP).contains(&temp));
        }
    }
}
