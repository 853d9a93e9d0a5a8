//! Vibrator hardware abstraction.
//!
//! Drives a single vibration motor through whichever kernel interface the
//! device exposes: force feedback on an input event node, the `timed_output`
//! class, or an LED class device with the transient trigger. The interface is
//! picked once by [`Vibrator::open`].

pub mod config;
pub mod error;
pub mod force_feedback;
pub mod led;
pub mod sysfs;
pub mod timed_output;
pub mod vibrator;

pub use config::VibratorConfig;
pub use error::{Result, VibratorError};
pub use vibrator::{Actuator, BackendKind, HalInfo, Vibrator, HAL_INFO};
