use crate::error::Result;
use crate::sysfs;
use crate::vibrator::{Actuator, BackendKind};
use std::path::{Path, PathBuf};

/// Vibrator driven through an LED class device with the transient trigger.
pub struct LedTrigger {
    dir: PathBuf,
}

impl LedTrigger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn probe(dir: &Path) -> Option<Self> {
        sysfs::device_exists(&dir.join("activate")).then(|| Self::new(dir))
    }

    fn write(&self, file: &str, value: &str) -> Result<()> {
        sysfs::write_value(&self.dir.join(file), value)
    }
}

impl Actuator for LedTrigger {
    fn on(&mut self, timeout_ms: u32) -> Result<()> {
        self.write("state", "1")?;
        self.write("duration", &format!("{timeout_ms}\n"))?;
        self.write("activate", "1")
    }

    fn off(&mut self) -> Result<()> {
        self.write("activate", "0")
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Led
    }
}
