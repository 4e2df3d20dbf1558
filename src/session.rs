//! Per-connection measurement state.

use crate::{
    kinematics,
    measurement::CscMeasurement,
    wire::{self, DecodeError},
};

/// Measurement state for one sensor connection.
///
/// A session holds the single most recent measurement, the only history
/// needed to derive rates for the next notification. Create a fresh session
/// when a sensor connects, and drop or [`reset`](Self::reset) it on
/// disconnect, so that rates never span two connections.
///
/// The caller is expected to serialize [`update`](Self::update) calls, in the
/// order the sensor produced the notifications; out-of-order delivery corrupts
/// the rollover correction and delta signs.
#[derive(Debug, Default)]
pub struct Session {
    previous: Option<CscMeasurement>,
}

impl Session {
    /// Create a session with no measurement history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a notification payload and derive rates against the stored
    /// measurement.
    ///
    /// On success the returned measurement replaces the stored one. A payload
    /// that fails to decode leaves the stored measurement untouched.
    pub fn update(
        &mut self,
        payload: &[u8],
        wheel_circumference_m: f64,
    ) -> Result<CscMeasurement, DecodeError> {
        let decoded = wire::decode(payload)?;
        let derived = kinematics::derive(&decoded, self.previous.as_ref(), wheel_circumference_m);

        self.previous = Some(derived.clone());

        Ok(derived)
    }

    /// Discard the stored measurement.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// The most recent successfully decoded measurement, if any.
    pub fn last(&self) -> Option<&CscMeasurement> {
        self.previous.as_ref()
    }
}
