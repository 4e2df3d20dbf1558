#![cfg_attr(not(feature = "std"), no_std)]

//! A decoder for the Bluetooth Cycling Speed and Cadence measurement
//! characteristic.
//!
//! Freehub turns the raw notification payloads of a CSC sensor into calibrated
//! motion metrics: cadence in revolutions per minute, and speed in kilometres
//! per hour. Payloads carry hardware counters that wrap at fixed bit widths,
//! so rates are derived from the delta between successive measurements, with
//! rollover correction applied to the event-time fields.
//!
//! Most users should begin with [`Session`], which pairs decoding with the
//! bookkeeping needed to derive rates across successive notifications. The
//! [`wire`] and [`kinematics`] modules expose the underlying steps for hosts
//! managing measurement state themselves.
//!
//! Freehub owns no transport: discovery, connection lifecycle, and
//! notification delivery belong to the host's radio stack, which must deliver
//! payloads serialized and in sensor order.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: link the standard library (default). Disable for `no_std` targets.
//! - `defmt`: derive `defmt::Format` on public data types.

pub mod kinematics;
pub mod measurement;
pub mod session;
pub mod wire;

pub use measurement::{CrankData, CscMeasurement, WheelData};
pub use session::Session;
pub use wire::{DecodeError, MAX_PAYLOAD_LEN, decode, encode};

/// UUID of the Cycling Speed and Cadence service (assigned number `0x1816`).
pub const SERVICE_UUID: &str = "00001816-0000-1000-8000-00805f9b34fb";

/// UUID of the CSC Measurement characteristic (assigned number `0x2A5B`).
pub const MEASUREMENT_UUID: &str = "00002a5b-0000-1000-8000-00805f9b34fb";
