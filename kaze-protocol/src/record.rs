//! JSON records exchanged with network clients
//!
//! Field names are camelCase on the wire. String fields borrow from the
//! frame payload, so parsing a request allocates nothing.

use serde::{Deserialize, Serialize};

use crate::frame::MAX_PAYLOAD_SIZE;

/// Full state broadcast to every subscriber
///
/// Temperatures are `None` (JSON `null`) until the sensor has produced
/// a valid sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReport<'a> {
    pub current_temperature: Option<f32>,
    pub current_humidity: Option<f32>,
    pub target_mode: &'a str,
    pub target_fan_speed: &'a str,
    pub target_temperature: i32,
    pub vertical_swing: bool,
    pub horizontal_swing: bool,
    pub quiet_mode: bool,
    pub powerful_mode: bool,
}

impl<'a> StateReport<'a> {
    /// Serialize into `buffer`, returning the JSON length
    pub fn to_json(&self, buffer: &mut [u8]) -> Result<usize, serde_json_core::ser::Error> {
        serde_json_core::to_slice(self, buffer)
    }

    /// Serialize into a buffer sized for one frame payload
    pub fn to_json_vec(
        &self,
    ) -> Result<heapless::Vec<u8, MAX_PAYLOAD_SIZE>, serde_json_core::ser::Error> {
        serde_json_core::to_vec(self)
    }

    /// Parse a report (used by bridge-side tooling and tests)
    pub fn from_json(json: &'a [u8]) -> Result<Self, serde_json_core::de::Error> {
        serde_json_core::from_slice(json).map(|(report, _)| report)
    }
}

/// Sparse change request from a client
///
/// Only the fields present in the JSON object are applied. Mode and fan
/// speed stay raw strings here; normalization is the controller's job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeRequest<'a> {
    #[serde(borrow, skip_serializing_if = "Option::is_none")]
    pub target_mode: Option<&'a str>,
    #[serde(borrow, skip_serializing_if = "Option::is_none")]
    pub target_fan_speed: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_swing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_swing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powerful_mode: Option<bool>,
}

impl<'a> ChangeRequest<'a> {
    /// Parse a request from a JSON payload
    pub fn from_json(json: &'a [u8]) -> Result<Self, serde_json_core::de::Error> {
        serde_json_core::from_slice(json).map(|(request, _)| request)
    }

    /// Serialize into a buffer sized for one frame payload
    pub fn to_json_vec(
        &self,
    ) -> Result<heapless::Vec<u8, MAX_PAYLOAD_SIZE>, serde_json_core::ser::Error> {
        serde_json_core::to_vec(self)
    }

    /// Check whether the request carries no fields at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
