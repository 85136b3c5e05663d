//! Byte framing for the bridge UART.
//!
//! ```text
//! ┌──────┬────────┬──────┬───────────────┬──────────┐
//! │ 0xAA │ length │ type │ payload       │ checksum │
//! │      │ 0-250  │      │ length bytes  │ XOR      │
//! └──────┴────────┴──────┴───────────────┴──────────┘
//! ```
//!
//! The checksum is the XOR of length, type and every payload byte.
//!
//! The bridge can reboot at any point, cutting a frame short, and the
//! next frame then arrives while the parser still counts payload bytes
//! of the old one. When a frame is rejected the parser therefore looks
//! for another start byte inside the bytes it already buffered instead
//! of discarding them.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Bytes a frame adds around its payload (start, length, type, checksum)
pub const FRAME_OVERHEAD: usize = 4;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + FRAME_OVERHEAD;

const HEADER_LEN: usize = 3;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Length byte out of range
    InvalidLength,
    /// Output buffer too small for encoding
    BufferTooSmall,
}

fn xor_checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length ^ msg_type, |acc, byte| acc ^ byte)
}

/// One message on the link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a frame carrying a copy of `payload`
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        Ok(Self {
            msg_type,
            payload: Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?,
        })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Bytes this frame occupies on the wire
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Write the wire form into `buffer`, returning its length
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let out = buffer
            .get_mut(..self.encoded_len())
            .ok_or(FrameError::BufferTooSmall)?;

        // Bounded by MAX_PAYLOAD_SIZE
        let length = self.payload.len() as u8;
        let (header, rest) = out.split_at_mut(HEADER_LEN);
        let (body, trailer) = rest.split_at_mut(self.payload.len());

        header.copy_from_slice(&[FRAME_START, length, self.msg_type]);
        body.copy_from_slice(&self.payload);
        trailer[0] = xor_checksum(length, self.msg_type, &self.payload);

        Ok(out.len())
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut wire = Vec::new();
        wire.resize(self.encoded_len(), 0)
            .map_err(|_| FrameError::BufferTooSmall)?;
        self.encode(&mut wire)?;
        Ok(wire)
    }
}

/// Incremental frame parser fed one byte at a time from the UART
///
/// Everything from a start byte onwards is buffered until the frame it
/// announces is complete. Bytes outside a frame are skipped.
#[derive(Debug, Clone, Default)]
pub struct FrameParser {
    pending: Vec<u8, MAX_FRAME_SIZE>,
}

impl FrameParser {
    /// Create a parser waiting for a start byte
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(frame))` when a frame completes, `Ok(None)` when
    /// more bytes are needed, or `Err` when the buffered frame was
    /// rejected. After an error the parser has already moved on to the
    /// next start byte it holds, if any.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        if self.pending.is_empty() && byte != FRAME_START {
            return Ok(None);
        }
        if self.pending.push(byte).is_err() {
            // Only reachable while catching up on bytes kept by a resync
            self.discard(1);
        }
        self.take_frame()
    }

    /// Feed bytes until the first complete frame
    ///
    /// Bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    fn take_frame(&mut self) -> Result<Option<Frame>, FrameError> {
        let Some(&length) = self.pending.get(1) else {
            return Ok(None);
        };
        let length = length as usize;
        if length > MAX_PAYLOAD_SIZE {
            self.discard(1);
            return Err(FrameError::InvalidLength);
        }

        let total = length + FRAME_OVERHEAD;
        if self.pending.len() < total {
            return Ok(None);
        }

        let msg_type = self.pending[2];
        let payload = &self.pending[HEADER_LEN..HEADER_LEN + length];
        if xor_checksum(length as u8, msg_type, payload) != self.pending[total - 1] {
            self.discard(1);
            return Err(FrameError::InvalidChecksum);
        }

        let frame = Frame::new(msg_type, payload);
        self.discard(total);
        frame.map(Some)
    }

    /// Drop `count` buffered bytes, then anything before the next start byte
    fn discard(&mut self, count: usize) {
        let rest = self.pending.get(count..).unwrap_or(&[]);
        match rest.iter().position(|&b| b == FRAME_START) {
            Some(offset) => {
                let from = count + offset;
                let keep = self.pending.len() - from;
                self.pending.copy_within(from.., 0);
                self.pending.truncate(keep);
            }
            None => self.pending.clear(),
        }
    }
}
