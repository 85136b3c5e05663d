//! Infrared emitter abstraction
//!
//! Protocol encoders turn a device state into a raw pulse train; the
//! emitter only has to reproduce it on a modulated carrier.

/// Errors from the IR emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrError {
    /// Carrier frequency cannot be generated by the hardware
    UnsupportedCarrier,
    /// Timing list is empty or malformed
    InvalidTimings,
    /// Peripheral reported a failure while emitting
    Hardware,
}

/// Modulated infrared output
///
/// `timings_us` alternates mark (carrier on) and space (carrier off)
/// durations in microseconds, always starting with a mark. The call
/// returns once the whole train has been emitted; there is no
/// acknowledgment from the receiving unit.
pub trait IrOutput {
    /// Emit a pulse train on a carrier of `carrier_hz`
    fn send(&mut self, carrier_hz: u32, timings_us: &[u16]) -> Result<(), IrError>;
}
