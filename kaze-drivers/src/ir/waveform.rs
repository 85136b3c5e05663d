//! Pulse-distance waveform builder
//!
//! Both supported protocols use the same scheme: a header, then every bit
//! as a fixed mark followed by a short (0) or long (1) space, LSB first,
//! then a footer mark and an inter-section gap.
//!
//! ```text
//!   header        bit 0   bit 1        footer   gap
//! ▇▇▇▇▇▇___      ▇_      ▇___   ...    ▇        __________
//! ```

use heapless::Vec;
use kaze_hal::{IrError, IrOutput};

/// Maximum number of mark/space entries in one waveform
pub const MAX_TIMINGS: usize = 640;

/// Waveform does not fit in [`MAX_TIMINGS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError;

/// Timing constants of a pulse-distance protocol (µs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub header_mark: u16,
    pub header_space: u16,
    pub bit_mark: u16,
    pub one_space: u16,
    pub zero_space: u16,
}

/// Carrier frequency plus alternating mark/space durations
///
/// Always starts with a mark. Consecutive marks (or spaces) are merged,
/// so the list stays strictly alternating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    carrier_hz: u32,
    timings: Vec<u16, MAX_TIMINGS>,
}

impl Waveform {
    pub fn new(carrier_hz: u32) -> Self {
        Self {
            carrier_hz,
            timings: Vec::new(),
        }
    }

    pub fn carrier_hz(&self) -> u32 {
        self.carrier_hz
    }

    /// Mark/space durations, starting with a mark
    pub fn timings(&self) -> &[u16] {
        &self.timings
    }

    /// Carrier on for `us`
    pub fn mark(&mut self, us: u16) -> Result<(), CapacityError> {
        let is_mark_slot = self.timings.len() % 2 == 0;
        self.push(us, is_mark_slot)
    }

    /// Carrier off for `us`
    pub fn space(&mut self, us: u16) -> Result<(), CapacityError> {
        if self.timings.is_empty() {
            // Leading silence carries no information
            return Ok(());
        }
        let is_space_slot = self.timings.len() % 2 == 1;
        self.push(us, is_space_slot)
    }

    fn push(&mut self, us: u16, starts_new_entry: bool) -> Result<(), CapacityError> {
        if starts_new_entry {
            self.timings.push(us).map_err(|_| CapacityError)
        } else {
            // Same kind as the last entry: extend it
            match self.timings.last_mut() {
                Some(last) => {
                    *last = last.saturating_add(us);
                    Ok(())
                }
                None => Err(CapacityError),
            }
        }
    }

    /// Header mark and space
    pub fn header(&mut self, timing: &PulseTiming) -> Result<(), CapacityError> {
        self.mark(timing.header_mark)?;
        self.space(timing.header_space)
    }

    /// The low `count` bits of `value`, LSB first
    pub fn bits(&mut self, timing: &PulseTiming, value: u64, count: u8) -> Result<(), CapacityError> {
        for i in 0..count {
            self.mark(timing.bit_mark)?;
            if (value >> i) & 1 == 1 {
                self.space(timing.one_space)?;
            } else {
                self.space(timing.zero_space)?;
            }
        }
        Ok(())
    }

    /// Whole bytes, each LSB first
    pub fn bytes(&mut self, timing: &PulseTiming, data: &[u8]) -> Result<(), CapacityError> {
        for &byte in data {
            self.bits(timing, byte as u64, 8)?;
        }
        Ok(())
    }

    /// Footer mark followed by a gap
    ///
    /// A gap of zero ends the waveform on the footer mark.
    pub fn footer(&mut self, timing: &PulseTiming, gap_us: u16) -> Result<(), CapacityError> {
        self.mark(timing.bit_mark)?;
        if gap_us > 0 {
            self.space(gap_us)?;
        }
        Ok(())
    }

    /// Emit on an IR output
    pub fn send<O: IrOutput>(&self, output: &mut O) -> Result<(), IrError> {
        output.send(self.carrier_hz, &self.timings)
    }
}
