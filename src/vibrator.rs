use crate::config::VibratorConfig;
use crate::error::{Result, VibratorError};
use crate::force_feedback::{ForceFeedbackSession, InputBus};
use crate::led::LedTrigger;
use crate::timed_output::TimedOutput;
use std::fmt;

/// Trait for the mechanisms that can drive the vibration motor
pub trait Actuator: Send {
    /// Vibrate for `timeout_ms`; the kernel stops the motor when it elapses
    fn on(&mut self, timeout_ms: u32) -> Result<()>;

    /// Stop vibrating now. Safe to call when already off.
    fn off(&mut self) -> Result<()>;

    fn kind(&self) -> BackendKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    ForceFeedback,
    TimedOutput,
    Led,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ForceFeedback => "force feedback",
            Self::TimedOutput => "timed_output",
            Self::Led => "LED trigger",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub api_version: (u8, u8),
}

pub const HAL_INFO: HalInfo = HalInfo {
    name: "Default vibrator HAL",
    author: "The Android Open Source Project",
    api_version: (1, 0),
};

/// Handle to the vibrator bound at open time.
pub struct Vibrator {
    backend: Box<dyn Actuator>,
}

impl Vibrator {
    /// Probe the device and bind the first mechanism present.
    #[cfg(target_os = "linux")]
    pub fn open(config: &VibratorConfig) -> Result<Self> {
        let bus = crate::force_feedback::DevInput::new(&config.input_dir);
        Self::open_with(bus, config)
    }

    /// Probe force feedback on `bus`, then timed_output, then the LED trigger.
    pub fn open_with<B>(bus: B, config: &VibratorConfig) -> Result<Self>
    where
        B: InputBus + 'static,
    {
        let backend: Box<dyn Actuator> =
            if let Some(ff) = ForceFeedbackSession::probe(bus, &config.ff_names) {
                Box::new(ff)
            } else if let Some(timed) = TimedOutput::probe(&config.timed_output_enable) {
                Box::new(timed)
            } else if let Some(led) = LedTrigger::probe(&config.led_dir) {
                Box::new(led)
            } else {
                log::error!("Vibrator device does not exist. Cannot start vibrator");
                return Err(VibratorError::NotFound);
            };

        log::info!("Vibrator using {}", backend.kind());
        Ok(Self { backend })
    }

    pub fn on(&mut self, timeout_ms: u32) -> Result<()> {
        self.backend.on(timeout_ms)
    }

    pub fn off(&mut self) -> Result<()> {
        self.backend.off()
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn info(&self) -> &'static HalInfo {
        &HAL_INFO
    }

    /// Stop the motor and release the handle.
    pub fn close(mut self) {
        if let Err(e) = self.backend.off() {
            log::warn!("Failed to stop vibrator on close: {}", e);
        }
    }
}
