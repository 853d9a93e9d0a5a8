use super::ffi::{self, FfEffect, FfReplay, FfRumbleEffect, EV_FF};
use super::{EffectDevice, InputBus, RumbleEffect};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::{AsRawFd, OwnedFd};
use std::path::{Path, PathBuf};

/// The real `/dev/input` directory.
pub struct DevInput {
    dir: PathBuf,
}

impl DevInput {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl InputBus for DevInput {
    type Device = EventDevice;

    fn event_nodes(&self) -> io::Result<Vec<String>> {
        let mut nodes = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let name = entry?.file_name();
            if let Some(name) = name.to_str() {
                if name.starts_with("event") {
                    nodes.push(name.to_string());
                }
            }
        }
        Ok(nodes)
    }

    fn device_name(&self, node: &str) -> io::Result<String> {
        EventDevice::open(&self.node_path(node))?.name()
    }

    fn open(&self, node: &str) -> io::Result<EventDevice> {
        EventDevice::open(&self.node_path(node))
    }

    fn node_path(&self, node: &str) -> PathBuf {
        self.dir.join(node)
    }
}

/// An event node opened read-write for effect upload and playback.
pub struct EventDevice {
    file: File,
}

impl EventDevice {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { file })
    }

    /// Device name reported by `EVIOCGNAME`
    pub fn name(&self) -> io::Result<String> {
        let mut buf = [0u8; 64];
        let len = buf.len() - 1;
        unsafe {
            ffi::eviocgname(self.file.as_raw_fd(), &mut buf[..len])?;
        }
        let end = buf.iter().position(|&b| b == 0).unwrap_or(len);
        Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
    }

    /// Second descriptor on the same open node
    pub fn try_clone_fd(&self) -> io::Result<OwnedFd> {
        Ok(self.file.try_clone()?.into())
    }
}

impl EffectDevice for EventDevice {
    fn upload(&mut self, effect: &RumbleEffect) -> io::Result<i16> {
        let mut raw = FfEffect::rumble(
            effect.id,
            FfReplay {
                length: effect.length_ms,
                delay: effect.delay_ms,
            },
            FfRumbleEffect {
                strong_magnitude: effect.strong_magnitude,
                weak_magnitude: effect.weak_magnitude,
            },
        );

        unsafe {
            ffi::eviocsff(self.file.as_raw_fd(), std::ptr::addr_of_mut!(raw))?;
        }
        log::debug!("Uploaded rumble effect {} ({} ms)", raw.id, effect.length_ms);
        Ok(raw.id)
    }

    fn write_event(&mut self, code: u16, value: i32) -> io::Result<()> {
        let event = libc::input_event {
            time: libc::timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            type_: EV_FF,
            code,
            value,
        };
        let bytes = unsafe {
            std::slice::from_raw_parts(
                &event as *const _ as *const u8,
                std::mem::size_of::<libc::input_event>(),
            )
        };

        let written = self.file.write(bytes)?;
        if written != bytes.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short event write: {} of {} bytes", written, bytes.len()),
            ));
        }
        Ok(())
    }

    fn erase(&mut self, id: i16) -> io::Result<()> {
        let id = nix::sys::ioctl::ioctl_param_type::from(id as u16);
        unsafe {
            ffi::eviocrmff(self.file.as_raw_fd(), id)?;
        }
        Ok(())
    }
}
