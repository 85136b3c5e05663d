//! Message types for the bridge link
//!
//! Message types are divided into two categories:
//! - Bridge → Controller: client requests, link heartbeat, client events
//! - Controller → Bridge: state broadcasts, heartbeat responses

use crate::frame::{Frame, FrameError};
use crate::record::{ChangeRequest, StateReport};

// Message type IDs: Bridge → Controller
pub const MSG_REQUEST: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;
pub const MSG_CLIENT_CONNECTED: u8 = 0x03;

// Message type IDs: Controller → Bridge
pub const MSG_STATE: u8 = 0x20;
pub const MSG_PONG: u8 = 0x24;

/// Errors turning frames into messages and back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Frame-level failure
    Frame(FrameError),
    /// Payload is not the JSON record the type promises
    InvalidJson,
    /// Message type not understood by this side of the link
    UnknownType(u8),
    /// Required payload bytes are missing
    MissingPayload,
}

impl From<FrameError> for ProtocolError {
    fn from(e: FrameError) -> Self {
        ProtocolError::Frame(e)
    }
}

/// Messages from the bridge to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMessage<'a> {
    /// A client asked for a state change
    Request(ChangeRequest<'a>),
    /// Link heartbeat
    Ping,
    /// A new client subscribed and needs the current state
    ClientConnected { client: u8 },
}

impl<'a> BridgeMessage<'a> {
    /// Parse a message from a frame, borrowing strings from its payload
    pub fn from_frame(frame: &'a Frame) -> Result<Self, ProtocolError> {
        match frame.msg_type {
            MSG_REQUEST => ChangeRequest::from_json(&frame.payload)
                .map(BridgeMessage::Request)
                .map_err(|_| ProtocolError::InvalidJson),
            MSG_PING => Ok(BridgeMessage::Ping),
            MSG_CLIENT_CONNECTED => {
                let client = *frame.payload.first().ok_or(ProtocolError::MissingPayload)?;
                Ok(BridgeMessage::ClientConnected { client })
            }
            other => Err(ProtocolError::UnknownType(other)),
        }
    }

    /// Encode into a frame (bridge-side tooling and tests)
    pub fn to_frame(&self) -> Result<Frame, ProtocolError> {
        match self {
            BridgeMessage::Request(request) => {
                let json = request
                    .to_json_vec()
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Ok(Frame::new(MSG_REQUEST, &json)?)
            }
            BridgeMessage::Ping => Ok(Frame::empty(MSG_PING)),
            BridgeMessage::ClientConnected { client } => {
                Ok(Frame::new(MSG_CLIENT_CONNECTED, &[*client])?)
            }
        }
    }
}

/// Messages from the controller to the bridge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerMessage<'a> {
    /// Broadcast the full state to every client
    State(StateReport<'a>),
    /// Heartbeat response
    Pong,
}

impl<'a> ControllerMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, ProtocolError> {
        match self {
            ControllerMessage::State(report) => {
                let json = report
                    .to_json_vec()
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Ok(Frame::new(MSG_STATE, &json)?)
            }
            ControllerMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }

    /// Parse a message from a frame (bridge-side tooling and tests)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, ProtocolError> {
        match frame.msg_type {
            MSG_STATE => StateReport::from_json(&frame.payload)
                .map(ControllerMessage::State)
                .map_err(|_| ProtocolError::InvalidJson),
            MSG_PONG => Ok(ControllerMessage::Pong),
            other => Err(ProtocolError::UnknownType(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_frame() {
        let frame = Frame::new(MSG_REQUEST, br#"{"targetMode":"dry"}"#).unwrap();
        let msg = BridgeMessage::from_frame(&frame).unwrap();

        match msg {
            BridgeMessage::Request(request) => {
                assert_eq!(request.target_mode, Some("dry"));
                assert_eq!(request.target_temperature, None);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_request_with_bad_json() {
        let frame = Frame::new(MSG_REQUEST, b"{\"targetMode\":").unwrap();
        assert_eq!(
            BridgeMessage::from_frame(&frame),
            Err(ProtocolError::InvalidJson)
        );
    }

    #[test]
    fn test_ping_and_client_connected() {
        let ping = Frame::empty(MSG_PING);
        assert_eq!(BridgeMessage::from_frame(&ping), Ok(BridgeMessage::Ping));

        let connected = Frame::new(MSG_CLIENT_CONNECTED, &[3]).unwrap();
        assert_eq!(
            BridgeMessage::from_frame(&connected),
            Ok(BridgeMessage::ClientConnected { client: 3 })
        );

        let truncated = Frame::empty(MSG_CLIENT_CONNECTED);
        assert_eq!(
            BridgeMessage::from_frame(&truncated),
            Err(ProtocolError::MissingPayload)
        );
    }

    #[test]
    fn test_unknown_type() {
        let frame = Frame::empty(0x7F);
        assert_eq!(
            BridgeMessage::from_frame(&frame),
            Err(ProtocolError::UnknownType(0x7F))
        );
    }

    #[test]
    fn test_bridge_request_through_frame() {
        let original = BridgeMessage::Request(ChangeRequest {
            target_fan_speed: Some("min"),
            vertical_swing: Some(true),
            ..Default::default()
        });
        let frame = original.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_REQUEST);
        assert_eq!(BridgeMessage::from_frame(&frame), Ok(original));
    }

    #[test]
    fn test_state_broadcast_frame() {
        let report = StateReport {
            current_temperature: None,
            current_humidity: None,
            target_mode: "off",
            target_fan_speed: "auto",
            target_temperature: 23,
            vertical_swing: true,
            horizontal_swing: true,
            quiet_mode: false,
            powerful_mode: false,
        };
        let frame = ControllerMessage::State(report).to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_STATE);

        match ControllerMessage::from_frame(&frame).unwrap() {
            ControllerMessage::State(parsed) => assert_eq!(parsed, report),
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_pong_frame() {
        let frame = ControllerMessage::Pong.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_PONG);
        assert!(frame.payload.is_empty());
    }
}
