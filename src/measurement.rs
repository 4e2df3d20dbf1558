//! The measurement record and its revolution blocks.

/// A decoded CSC measurement.
///
/// Counters are stored exactly as the sensor delivered them. The derived
/// metrics are filled in by [`kinematics::derive`](crate::kinematics::derive)
/// once a preceding measurement is available; `None` there means "not
/// computable", which is distinct from a computed rate of zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CscMeasurement {
    /// The wheel revolution block, carried when flags bit 0 is set.
    pub wheel: Option<WheelData>,
    /// The crank revolution block, carried when flags bit 1 is set.
    pub crank: Option<CrankData>,
    /// Cadence derived from the preceding measurement, in revolutions per
    /// minute.
    pub rpm: Option<f64>,
    /// Speed derived from the preceding measurement, in kilometres per hour.
    pub speed_km_h: Option<f64>,
}

impl CscMeasurement {
    /// Whether the payload carried wheel revolution data.
    pub fn wheel_revolution_data_present(&self) -> bool {
        self.wheel.is_some()
    }

    /// Whether the payload carried crank revolution data.
    pub fn crank_revolution_data_present(&self) -> bool {
        self.crank.is_some()
    }
}

/// Counters of the wheel revolution block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelData {
    /// Total wheel revolutions since the counter last reset, wrapping at 32
    /// bits.
    pub cumulative_revolutions: u32,
    /// Time of the most recent wheel revolution, in units of 1/1024 s,
    /// wrapping at 16 bits.
    pub last_event_time: u16,
}

/// Counters of the crank revolution block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CrankData {
    /// Total crank revolutions since the counter last reset, wrapping at 16
    /// bits.
    pub cumulative_revolutions: u16,
    /// Time of the most recent crank revolution, in units of 1/1024 s,
    /// wrapping at 16 bits.
    pub last_event_time: u16,
}
