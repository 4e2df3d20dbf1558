//! Wire format of the CSC Measurement characteristic.
//!
//! A payload opens with a one-byte flags bitfield announcing which revolution
//! blocks follow, wheel block before crank block, all multi-byte integers
//! little-endian. The payload must be at least as long as its own flags
//! imply; trailing bytes beyond the announced blocks are ignored.

use tartan_bitfield::bitfield;
use thiserror::Error;
use zerocopy::FromBytes;

use crate::measurement::{CrankData, CscMeasurement, WheelData};

const WHEEL_BLOCK_LEN: usize = 6;
const CRANK_BLOCK_LEN: usize = 4;

/// The longest possible payload: the flags byte plus both revolution blocks.
pub const MAX_PAYLOAD_LEN: usize = 1 + WHEEL_BLOCK_LEN + CRANK_BLOCK_LEN;

bitfield! {
    /// The flags byte opening every payload. Remaining bits are reserved.
    struct Flags(u8) {
        [0] wheel_revolution_data_present,
        [1] crank_revolution_data_present,
    }
}

/// An error decoding a measurement payload.
#[derive(Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Unexpectedly reached the end of the payload.
    #[error("Unexpectedly reached the end of the payload.")]
    EndOfPayload,
}

/// Decode a measurement notification payload.
///
/// Returns the presence flags and raw counters only; the derived metrics are
/// left unset for [`kinematics::derive`](crate::kinematics::derive). A payload
/// shorter than its flags imply fails outright, never yielding a partial
/// record.
///
/// This method is also re-exported as `freehub::decode`.
pub fn decode(r: &[u8]) -> Result<CscMeasurement, DecodeError> {
    let i = &mut 0; // Counter of bytes read, used to read bytes from the tip.

    let flags = Flags(take::<1>(r, i)?[0]);

    let wheel = if flags.wheel_revolution_data_present() {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct WheelBlock {
            revolutions: [u8; 4],
            event_time: [u8; 2],
        }

        let WheelBlock {
            revolutions,
            event_time,
        } = zerocopy::transmute!(take::<WHEEL_BLOCK_LEN>(r, i)?);

        Some(WheelData {
            cumulative_revolutions: u32::from_le_bytes(revolutions),
            last_event_time: u16::from_le_bytes(event_time),
        })
    } else {
        None
    };

    let crank = if flags.crank_revolution_data_present() {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct CrankBlock {
            revolutions: [u8; 2],
            event_time: [u8; 2],
        }

        let CrankBlock {
            revolutions,
            event_time,
        } = zerocopy::transmute!(take::<CRANK_BLOCK_LEN>(r, i)?);

        Some(CrankData {
            cumulative_revolutions: u16::from_le_bytes(revolutions),
            last_event_time: u16::from_le_bytes(event_time),
        })
    } else {
        None
    };

    Ok(CscMeasurement {
        wheel,
        crank,
        rpm: None,
        speed_km_h: None,
    })
}

/// Encode a measurement into a notification payload, returning the number of
/// bytes written.
///
/// Only the presence flags and counters have a wire representation; the
/// derived metrics are not written.
///
/// This method is also re-exported as `freehub::encode`.
pub fn encode(m: &CscMeasurement, w: &mut [u8; MAX_PAYLOAD_LEN]) -> usize {
    let mut flags = Flags(0);
    flags.set_wheel_revolution_data_present(m.wheel.is_some());
    flags.set_crank_revolution_data_present(m.crank.is_some());

    w[0] = flags.0;
    let mut i = 1;

    if let Some(wheel) = &m.wheel {
        w[i..i + 4].copy_from_slice(&wheel.cumulative_revolutions.to_le_bytes());
        w[i + 4..i + 6].copy_from_slice(&wheel.last_event_time.to_le_bytes());
        i += WHEEL_BLOCK_LEN;
    }

    if let Some(crank) = &m.crank {
        w[i..i + 2].copy_from_slice(&crank.cumulative_revolutions.to_le_bytes());
        w[i + 2..i + 4].copy_from_slice(&crank.last_event_time.to_le_bytes());
        i += CRANK_BLOCK_LEN;
    }

    i
}

/// Take an exact number of bytes from an offset in a payload, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], DecodeError> {
    let s = *i;
    *i += N;

    Ok(r.get(s..*i)
        .ok_or(DecodeError::EndOfPayload)?
        .try_into()
        .unwrap())
}
