#[cfg(target_os = "linux")]
mod ffi;
#[cfg(target_os = "linux")]
mod linux;
#[cfg(test)]
pub(crate) mod mock;

#[cfg(target_os = "linux")]
pub use linux::{DevInput, EventDevice};

use crate::error::{Result, VibratorError};
use crate::vibrator::{Actuator, BackendKind};
use std::io;
use std::path::PathBuf;

/// Smallest non-zero rumble magnitude; the driver only cares that it is set.
pub const MIN_MAGNITUDE: u16 = 1;

const EVENT_PREFIX: &str = "event";

/// Rumble effect parameters handed to `EVIOCSFF`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RumbleEffect {
    /// -1 asks the kernel to allocate a new slot
    pub id: i16,
    pub length_ms: u16,
    pub delay_ms: u16,
    pub strong_magnitude: u16,
    pub weak_magnitude: u16,
}

impl RumbleEffect {
    pub fn new(id: Option<i16>, timeout_ms: u32) -> Self {
        Self {
            id: id.unwrap_or(-1),
            length_ms: u16::try_from(timeout_ms).unwrap_or(u16::MAX),
            delay_ms: 0,
            strong_magnitude: 0,
            weak_magnitude: MIN_MAGNITUDE,
        }
    }
}

/// An open `/dev/input/eventN` node capable of force feedback.
/// Dropping the device closes it.
pub trait EffectDevice: Send {
    /// Upload `effect` and return the id the kernel assigned to it
    fn upload(&mut self, effect: &RumbleEffect) -> io::Result<i16>;

    /// Write an `EV_FF` event; a value of 0 stops playback
    fn write_event(&mut self, code: u16, value: i32) -> io::Result<()>;

    fn erase(&mut self, id: i16) -> io::Result<()>;
}

/// Directory of input event nodes
pub trait InputBus: Send {
    type Device: EffectDevice;

    /// Names of the `eventN` entries, in directory order
    fn event_nodes(&self) -> io::Result<Vec<String>>;

    fn device_name(&self, node: &str) -> io::Result<String>;

    fn open(&self, node: &str) -> io::Result<Self::Device>;

    fn node_path(&self, node: &str) -> PathBuf;
}

fn is_vibrator(name: &str, known: &[String]) -> bool {
    known.iter().any(|prefix| name.starts_with(prefix.as_str()))
}

/// Numeric suffix of an `eventN` node name
fn node_index(node: &str) -> Option<u32> {
    let rest = node.strip_prefix(EVENT_PREFIX)?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Find the first event node whose name starts with one of `known`.
///
/// Nodes that can't be opened read-write are skipped. The scan stops at the first
/// matching name even if its index turns out to be unparsable.
pub fn lookup<B: InputBus>(bus: &B, known: &[String]) -> Option<(String, u32)> {
    let nodes = match bus.event_nodes() {
        Ok(nodes) => nodes,
        Err(e) => {
            log::error!("Failed to list input devices: {}", e);
            return None;
        }
    };

    for node in nodes {
        if !node.starts_with(EVENT_PREFIX) {
            continue;
        }
        let name = match bus.device_name(&node) {
            Ok(name) => name,
            Err(e) => {
                log::debug!("Skipping {}: {}", node, e);
                continue;
            }
        };
        if is_vibrator(&name, known) {
            log::debug!("Found force feedback vibrator {:?} at {}", name, node);
            let index = node_index(&node);
            if index.is_none() {
                log::warn!("Unable to parse event index from {}", node);
            }
            return index.map(|index| (node, index));
        }
    }

    None
}

/// Force feedback vibrator session.
///
/// The device is opened on the first `on` and held until `off`, which stops
/// and erases the uploaded effect before closing it.
pub struct ForceFeedbackSession<B: InputBus> {
    bus: B,
    node: String,
    index: u32,
    device: Option<B::Device>,
    effect_id: Option<i16>,
}

impl<B: InputBus> ForceFeedbackSession<B> {
    /// Discover the vibrator on `bus` and make sure its node opens read-write.
    pub fn probe(bus: B, known: &[String]) -> Option<Self> {
        let (node, index) = lookup(&bus, known)?;

        if let Err(e) = bus.open(&node) {
            log::debug!("open {} failed: {}", bus.node_path(&node).display(), e);
            return None;
        }

        Some(Self {
            bus,
            node,
            index,
            device: None,
            effect_id: None,
        })
    }

    pub fn event_index(&self) -> u32 {
        self.index
    }

    pub fn effect_id(&self) -> Option<i16> {
        self.effect_id
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn upload(&mut self, timeout_ms: u32) -> Result<()> {
        let Some(device) = self.device.as_mut() else {
            return Ok(());
        };

        let effect = RumbleEffect::new(self.effect_id, timeout_ms);
        let id = device
            .upload(&effect)
            .map_err(|source| VibratorError::Protocol {
                op: "upload",
                source,
            })?;

        if self.effect_id.is_none() {
            self.effect_id = Some(id);
        }
        Ok(())
    }

    fn play(&mut self, count: i32) -> Result<()> {
        let Some(device) = self.device.as_mut() else {
            return Ok(());
        };
        let Some(id) = self.effect_id else {
            return Err(VibratorError::Protocol {
                op: "trigger",
                source: io::Error::new(io::ErrorKind::NotFound, "no effect uploaded"),
            });
        };

        device
            .write_event(id as u16, count)
            .map_err(|source| VibratorError::Protocol {
                op: "trigger",
                source,
            })
    }

    fn stop(&mut self) {
        let Some(mut device) = self.device.take() else {
            return;
        };

        if let Some(id) = self.effect_id.take() {
            if let Err(e) = device.write_event(id as u16, 0) {
                log::error!("Failed to stop ff effect {}: {}", id, e);
            }
            // the effect is considered gone even if the erase fails
            if let Err(e) = device.erase(id) {
                log::error!("Failed to erase ff effect {}: {}", id, e);
            }
        }

        drop(device);
        log::debug!("Closed {}", self.bus.node_path(&self.node).display());
    }
}

impl<B: InputBus> Actuator for ForceFeedbackSession<B> {
    fn on(&mut self, timeout_ms: u32) -> Result<()> {
        if self.device.is_none() {
            let device = self
                .bus
                .open(&self.node)
                .map_err(|source| VibratorError::Open {
                    path: self.bus.node_path(&self.node),
                    source,
                })?;
            self.device = Some(device);
        }

        // Best effort: once the node is open the caller always sees success
        if let Err(e) = self.upload(timeout_ms) {
            log::error!("{}", e);
        }
        if let Err(e) = self.play(1) {
            log::error!("{}", e);
        }

        Ok(())
    }

    fn off(&mut self) -> Result<()> {
        self.stop();
        Ok(())
    }

    fn kind(&self) -> BackendKind {
        BackendKind::ForceFeedback
    }
}

impl<B: InputBus> Drop for ForceFeedbackSession<B> {
    fn drop(&mut self) {
        if self.device.is_some() {
            log::debug!("Releasing force feedback effect on drop");
            self.stop();
        }
    }
}
