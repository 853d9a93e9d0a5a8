use super::{EffectDevice, InputBus, RumbleEffect};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Open(String),
    Upload {
        id: i16,
        length_ms: u16,
        weak_magnitude: u16,
    },
    Event {
        code: u16,
        value: i32,
    },
    Erase(i16),
    Close,
}

/// In-memory input directory that records every device operation.
pub(crate) struct MockBus {
    nodes: Vec<(String, String)>,
    unreadable: Vec<String>,
    unopenable: Vec<String>,
    read_only: Vec<String>,
    calls: Arc<Mutex<Vec<Call>>>,
    next_id: Arc<Mutex<i16>>,
    fail_upload: bool,
    fail_erase: bool,
}

impl MockBus {
    pub fn new(nodes: &[(&str, &str)]) -> Self {
        Self {
            nodes: nodes
                .iter()
                .map(|(node, name)| (node.to_string(), name.to_string()))
                .collect(),
            unreadable: Vec::new(),
            unopenable: Vec::new(),
            read_only: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(0)),
            fail_upload: false,
            fail_erase: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }

    pub fn with_node(mut self, node: &str, name: &str) -> Self {
        self.nodes.push((node.to_string(), name.to_string()));
        self
    }

    /// Name query on `node` fails
    pub fn unreadable(mut self, node: &str) -> Self {
        self.unreadable.push(node.to_string());
        self
    }

    /// Name query works but opening `node` read-write fails
    pub fn unopenable(mut self, node: &str) -> Self {
        self.deny_open(node);
        self
    }

    /// Node only opens read-only, so neither the name query nor the open works
    pub fn read_only(mut self, node: &str) -> Self {
        self.read_only.push(node.to_string());
        self
    }

    pub fn deny_open(&mut self, node: &str) {
        self.unopenable.push(node.to_string());
    }

    pub fn first_id(self, id: i16) -> Self {
        *self.next_id.lock().unwrap() = id;
        self
    }

    pub fn failing_uploads(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn failing_erase(mut self) -> Self {
        self.fail_erase = true;
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }
}

impl InputBus for MockBus {
    type Device = MockDevice;

    fn event_nodes(&self) -> io::Result<Vec<String>> {
        Ok(self.nodes.iter().map(|(node, _)| node.clone()).collect())
    }

    fn device_name(&self, node: &str) -> io::Result<String> {
        if self.unreadable.iter().chain(&self.read_only).any(|n| n == node) {
            return Err(io::Error::from_raw_os_error(13));
        }
        self.nodes
            .iter()
            .find(|(n, _)| n == node)
            .map(|(_, name)| name.clone())
            .ok_or_else(|| io::Error::from_raw_os_error(2))
    }

    fn open(&self, node: &str) -> io::Result<MockDevice> {
        if self.unopenable.iter().chain(&self.read_only).any(|n| n == node) {
            return Err(io::Error::from_raw_os_error(13));
        }
        self.calls.lock().unwrap().push(Call::Open(node.to_string()));
        Ok(MockDevice {
            calls: Arc::clone(&self.calls),
            next_id: Arc::clone(&self.next_id),
            fail_upload: self.fail_upload,
            fail_erase: self.fail_erase,
        })
    }

    fn node_path(&self, node: &str) -> PathBuf {
        PathBuf::from("/dev/input").join(node)
    }
}

pub(crate) struct MockDevice {
    calls: Arc<Mutex<Vec<Call>>>,
    next_id: Arc<Mutex<i16>>,
    fail_upload: bool,
    fail_erase: bool,
}

impl EffectDevice for MockDevice {
    fn upload(&mut self, effect: &RumbleEffect) -> io::Result<i16> {
        self.calls.lock().unwrap().push(Call::Upload {
            id: effect.id,
            length_ms: effect.length_ms,
            weak_magnitude: effect.weak_magnitude,
        });
        if self.fail_upload {
            return Err(io::Error::from_raw_os_error(22));
        }
        if effect.id >= 0 {
            return Ok(effect.id);
        }
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        Ok(id)
    }

    fn write_event(&mut self, code: u16, value: i32) -> io::Result<()> {
        self.calls.lock().unwrap().push(Call::Event { code, value });
        Ok(())
    }

    fn erase(&mut self, id: i16) -> io::Result<()> {
        self.calls.lock().unwrap().push(Call::Erase(id));
        if self.fail_erase {
            return Err(io::Error::from_raw_os_error(22));
        }
        Ok(())
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.calls.lock().unwrap().push(Call::Close);
    }
}
