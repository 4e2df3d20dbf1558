//! Deriving rate metrics from successive measurements.
//!
//! A single measurement carries only counter readings; cadence and speed exist
//! in the delta between two of them. Event times tick at 1024 Hz and wrap
//! roughly every 64 seconds, so their deltas are corrected for 16-bit
//! rollover. Revolution counters are used uncorrected: at notification rate
//! they are not expected to wrap between readings.

use crate::measurement::{CrankData, CscMeasurement, WheelData};

/// Event-time ticks per second.
const TICKS_PER_SECOND: f64 = 1024.0;

/// Event-time ticks per hour.
const TICKS_PER_HOUR: f64 = 3600.0 * TICKS_PER_SECOND;

/// Enrich a measurement with the rates derivable from its predecessor.
///
/// Each metric is computed only when both measurements carry the matching
/// revolution block. The first measurement of a session has no predecessor
/// and is returned unchanged, its derived fields absent.
///
/// `wheel_circumference_m` is the host's calibration value converting wheel
/// revolutions into distance, in metres.
pub fn derive(
    current: &CscMeasurement,
    previous: Option<&CscMeasurement>,
    wheel_circumference_m: f64,
) -> CscMeasurement {
    let mut current = current.clone();

    let Some(previous) = previous else {
        return current;
    };

    if let (Some(c), Some(p)) = (&current.crank, &previous.crank) {
        current.rpm = Some(cadence_rpm(c, p));
    }

    if let (Some(c), Some(p)) = (&current.wheel, &previous.wheel) {
        current.speed_km_h = Some(speed_km_h(c, p, wheel_circumference_m));
    }

    current
}

/// Cadence across a pair of crank blocks, in revolutions per minute.
///
/// A zero time-delta yields a rate of zero: no time has elapsed, so no rate
/// exists yet.
fn cadence_rpm(current: &CrankData, previous: &CrankData) -> f64 {
    let delta_revolutions =
        i32::from(current.cumulative_revolutions) - i32::from(previous.cumulative_revolutions);
    let delta_ticks = tick_delta(previous.last_event_time, current.last_event_time);

    if delta_ticks == 0 {
        return 0.0;
    }

    (f64::from(delta_revolutions) / f64::from(delta_ticks)) * 60.0 * TICKS_PER_SECOND
}

/// Speed across a pair of wheel blocks, in kilometres per hour.
///
/// A zero time-delta yields a rate of zero rather than a division fault.
fn speed_km_h(current: &WheelData, previous: &WheelData, wheel_circumference_m: f64) -> f64 {
    let delta_revolutions =
        i64::from(current.cumulative_revolutions) - i64::from(previous.cumulative_revolutions);
    let delta_ticks = tick_delta(previous.last_event_time, current.last_event_time);

    if delta_ticks == 0 {
        return 0.0;
    }

    let delta_hours = f64::from(delta_ticks) / TICKS_PER_HOUR;

    (delta_revolutions as f64 * wheel_circumference_m) / delta_hours
}

/// Delta between two event times, corrected for 16-bit rollover.
///
/// A reading below its predecessor is taken as a single wrap of the sensor's
/// clock, not a reversal.
fn tick_delta(previous: u16, current: u16) -> u16 {
    current.wrapping_sub(previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(wheel: Option<(u32, u16)>, crank: Option<(u16, u16)>) -> CscMeasurement {
        CscMeasurement {
            wheel: wheel.map(|(cumulative_revolutions, last_event_time)| WheelData {
                cumulative_revolutions,
                last_event_time,
            }),
            crank: crank.map(|(cumulative_revolutions, last_event_time)| CrankData {
                cumulative_revolutions,
                last_event_time,
            }),
            rpm: None,
            speed_km_h: None,
        }
    }

    fn assert_close(found: f64, expected: f64) {
        assert!(
            (found - expected).abs() < 1e-6,
            "{found} is not close to {expected}"
        );
    }

    #[test]
    fn first_measurement_has_no_rates() {
        let m = derive(&measurement(Some((1000, 0)), Some((50, 0))), None, 2.105);

        assert_eq!(m.rpm, None);
        assert_eq!(m.speed_km_h, None);
    }

    #[test]
    fn rates_over_one_second() {
        // One second of wheel ticks and half a second of crank ticks: four
        // wheel revolutions and two crank revolutions.
        let previous = measurement(Some((1000, 0)), Some((50, 0)));
        let current = measurement(Some((1004, 1024)), Some((52, 512)));

        let m = derive(&current, Some(&previous), 2.105);

        assert_close(m.rpm.unwrap(), 240.0);
        // 1024 ticks is exactly 1/3600 of an hour.
        assert_close(m.speed_km_h.unwrap(), (4.0 * 2.105) * 3600.0);
    }

    #[test]
    fn rates_need_blocks_on_both_sides() {
        let previous = measurement(Some((1000, 0)), None);
        let current = measurement(Some((1004, 1024)), Some((52, 512)));

        let m = derive(&current, Some(&previous), 2.105);

        // The predecessor has no crank block, and speed needs a wheel block on
        // the current side too.
        assert_eq!(m.rpm, None);
        assert!(m.speed_km_h.is_some());

        let m = derive(&measurement(None, Some((54, 1024))), Some(&current), 2.105);

        assert!(m.rpm.is_some());
        assert_eq!(m.speed_km_h, None);
    }

    #[test]
    fn event_time_rollover_is_corrected() {
        assert_eq!(tick_delta(65_000, 500), 1036);

        let previous = measurement(None, Some((10, 65_000)));
        let current = measurement(None, Some((12, 500)));

        let m = derive(&current, Some(&previous), 2.105);

        assert_close(m.rpm.unwrap(), (2.0 / 1036.0) * 60.0 * 1024.0);
    }

    #[test]
    fn wheel_time_rollover_is_corrected() {
        let previous = measurement(Some((1000, 65_000)), None);
        let current = measurement(Some((1004, 500)), None);

        let m = derive(&current, Some(&previous), 2.105);

        // 1036 ticks of travel; the uncorrected delta would be negative.
        let expected = (4.0 * 2.105) / (1036.0 / (3600.0 * 1024.0));
        assert_close(m.speed_km_h.unwrap(), expected);
    }

    #[test]
    fn zero_time_delta_yields_zero_rates() {
        let previous = measurement(Some((1000, 512)), Some((50, 512)));
        let current = measurement(Some((1002, 512)), Some((51, 512)));

        let m = derive(&current, Some(&previous), 2.105);

        assert_eq!(m.rpm, Some(0.0));
        assert_eq!(m.speed_km_h, Some(0.0));
    }

    #[test]
    fn stationary_sensor_reports_zero_not_absent() {
        // Counters and times identical: a rate of zero is still a computed
        // rate, distinct from "not computable".
        let previous = measurement(None, Some((50, 512)));
        let current = measurement(None, Some((50, 512)));

        let m = derive(&current, Some(&previous), 2.105);

        assert_eq!(m.rpm, Some(0.0));
    }
}
