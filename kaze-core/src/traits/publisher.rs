//! State publication trait

use kaze_protocol::StateReport;

/// Errors that can occur when publishing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishError {
    /// Report did not fit the link payload
    Encoding,
    /// Outbound queue is full; the report was dropped
    QueueFull,
}

/// Pushes state snapshots to every subscribed client
pub trait StatePublisher {
    /// Publish one report, fire-and-forget
    fn publish(&mut self, report: &StateReport<'_>) -> Result<(), PublishError>;
}
