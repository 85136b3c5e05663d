//! Mock HAL implementations for driver tests

use core::ops::Range;
use std::vec::Vec;

use embedded_storage_async::nor_flash::{
    ErrorType, MultiwriteNorFlash, NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash,
};
use kaze_hal::{BusError, DhtBus, IrError, IrOutput, OutputPin};

pub struct MockPin {
    high: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self { high: false }
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Captures every pulse train sent
#[derive(Default)]
pub struct MockIr {
    pub sent: Vec<(u32, Vec<u16>)>,
    pub fail: bool,
}

impl IrOutput for MockIr {
    fn send(&mut self, carrier_hz: u32, timings_us: &[u16]) -> Result<(), IrError> {
        if self.fail {
            return Err(IrError::Hardware);
        }
        self.sent.push((carrier_hz, timings_us.to_vec()));
        Ok(())
    }
}

/// Replays scripted frames, counting transactions
pub struct MockBus {
    pub frames: Vec<Result<[u8; 5], BusError>>,
    pub transactions: usize,
}

impl MockBus {
    pub fn new(frames: &[Result<[u8; 5], BusError>]) -> Self {
        Self {
            frames: frames.to_vec(),
            transactions: 0,
        }
    }
}

impl DhtBus for MockBus {
    fn read_frame(&mut self) -> Result<[u8; 5], BusError> {
        let frame = self
            .frames
            .get(self.transactions)
            .copied()
            .unwrap_or(Err(BusError::NoResponse));
        self.transactions += 1;
        frame
    }
}

/// Erase page size of the RAM flash
pub const MOCK_PAGE_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFlashError {
    NotAligned,
    OutOfBounds,
    /// Power was cut before the operation landed
    PowerLost,
}

impl NorFlashError for MockFlashError {
    fn kind(&self) -> NorFlashErrorKind {
        match self {
            MockFlashError::NotAligned => NorFlashErrorKind::NotAligned,
            MockFlashError::OutOfBounds => NorFlashErrorKind::OutOfBounds,
            MockFlashError::PowerLost => NorFlashErrorKind::Other,
        }
    }
}

/// RAM-backed NOR flash
///
/// Programming can only clear bits, erasing sets whole pages to 0xFF.
/// `writes_left` simulates a power cut: once it reaches zero every
/// program and erase fails without touching the array.
pub struct MockFlash {
    pub bytes: Vec<u8>,
    pub writes_left: Option<usize>,
    pub erases: usize,
}

impl MockFlash {
    pub fn new(pages: usize) -> Self {
        Self {
            bytes: vec![0xFF; pages * MOCK_PAGE_SIZE],
            writes_left: None,
            erases: 0,
        }
    }

    pub fn range(&self) -> Range<u32> {
        0..self.bytes.len() as u32
    }

    fn spend_write(&mut self) -> Result<(), MockFlashError> {
        match self.writes_left {
            Some(0) => Err(MockFlashError::PowerLost),
            Some(ref mut left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn span(&self, offset: u32, len: usize) -> Result<Range<usize>, MockFlashError> {
        let start = offset as usize;
        let end = start + len;
        if end > self.bytes.len() {
            return Err(MockFlashError::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl ErrorType for MockFlash {
    type Error = MockFlashError;
}

impl ReadNorFlash for MockFlash {
    const READ_SIZE: usize = 1;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let span = self.span(offset, bytes.len())?;
        bytes.copy_from_slice(&self.bytes[span]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl NorFlash for MockFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = MOCK_PAGE_SIZE;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        if from as usize % MOCK_PAGE_SIZE != 0 || to as usize % MOCK_PAGE_SIZE != 0 {
            return Err(MockFlashError::NotAligned);
        }
        let span = self.span(from, to.saturating_sub(from) as usize)?;
        self.spend_write()?;
        self.bytes[span].fill(0xFF);
        self.erases += 1;
        Ok(())
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if offset as usize % Self::WRITE_SIZE != 0 || bytes.len() % Self::WRITE_SIZE != 0 {
            return Err(MockFlashError::NotAligned);
        }
        let span = self.span(offset, bytes.len())?;
        self.spend_write()?;
        for (cell, byte) in self.bytes[span].iter_mut().zip(bytes) {
            *cell &= *byte;
        }
        Ok(())
    }
}

impl MultiwriteNorFlash for MockFlash {}
