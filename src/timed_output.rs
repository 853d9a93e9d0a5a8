use crate::error::Result;
use crate::sysfs;
use crate::vibrator::{Actuator, BackendKind};
use std::path::{Path, PathBuf};

/// `timed_output` class vibrator: one file, write the duration to start.
pub struct TimedOutput {
    enable: PathBuf,
}

impl TimedOutput {
    pub fn new(enable: impl Into<PathBuf>) -> Self {
        Self {
            enable: enable.into(),
        }
    }

    pub fn probe(enable: &Path) -> Option<Self> {
        sysfs::device_exists(enable).then(|| Self::new(enable))
    }

    fn send(&self, timeout_ms: u32) -> Result<()> {
        sysfs::write_value(&self.enable, &timeout_ms.to_string())
    }
}

impl Actuator for TimedOutput {
    fn on(&mut self, timeout_ms: u32) -> Result<()> {
        // constant on, up to the driver's maximum
        self.send(timeout_ms)
    }

    fn off(&mut self) -> Result<()> {
        self.send(0)
    }

    fn kind(&self) -> BackendKind {
        BackendKind::TimedOutput
    }
}
