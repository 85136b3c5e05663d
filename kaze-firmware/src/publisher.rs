//! State publisher backed by the link TX channel

use kaze_core::traits::{PublishError, StatePublisher};
use kaze_protocol::{ControllerMessage, StateReport};

use crate::channels::STATE_FRAMES;

/// Encodes broadcasts into STATE frames for the link TX task
pub struct LinkPublisher;

impl StatePublisher for LinkPublisher {
    fn publish(&mut self, report: &StateReport<'_>) -> Result<(), PublishError> {
        let frame = ControllerMessage::State(*report)
            .to_frame()
            .map_err(|_| PublishError::Encoding)?;

        STATE_FRAMES
            .try_send(frame)
            .map_err(|_| PublishError::QueueFull)
    }
}
