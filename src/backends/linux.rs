#![cfg(target_os = "linux")]

//! Linux evdev backend.
//!
//! Talks to `/dev/input/eventN` directly: the node is opened read-only with
//! `O_NONBLOCK`, capabilities and identity come from the `EVIOCG*` ioctls, and
//! events are read one `struct input_event` at a time.
//!
//! Reading any of these nodes usually needs membership in the `input` group
//! (or a udev rule granting access to the gun). Without it the scan sees
//! [`ProbeError::PermissionDenied`] and moves on.

use crate::bits::{CodeBits, EventTypeBits};
use crate::device::{AbsInfo, EventNode, NodeSource};
use crate::error::ProbeError;
use crate::event::RawEvent;
use crate::metadata::DeviceId;
use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::mem::size_of;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// Size of one `struct input_event` on this target.
const RECORD_SIZE: usize = size_of::<libc::input_event>();

mod ioctl {
    use std::mem::size_of;

    nix::ioctl_read!(eviocgid, b'E', 0x02, libc::input_id);
    nix::ioctl_read_buf!(eviocgname, b'E', 0x06, u8);

    /// `EVIOCGBIT(kind, len)`: the type is part of the request number.
    pub unsafe fn eviocgbit(fd: libc::c_int, kind: u16, buf: &mut [u8]) -> nix::Result<libc::c_int> {
        let req = nix::request_code_read!(b'E', 0x20 + kind as u32, buf.len());
        nix::errno::Errno::result(libc::ioctl(fd, req, buf.as_mut_ptr()))
    }

    /// `EVIOCGABS(axis)`.
    pub unsafe fn eviocgabs(
        fd: libc::c_int,
        axis: u16,
        info: *mut libc::input_absinfo,
    ) -> nix::Result<libc::c_int> {
        let req = nix::request_code_read!(b'E', 0x40 + axis as u32, size_of::<libc::input_absinfo>());
        nix::errno::Errno::result(libc::ioctl(fd, req, info))
    }
}

/// Candidate nodes named `{prefix}{index}`.
#[derive(Clone, Debug)]
pub struct EvdevSource {
    prefix: String,
}

impl EvdevSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn node_path(&self, index: u32) -> PathBuf {
        PathBuf::from(format!("{}{}", self.prefix, index))
    }
}

impl Default for EvdevSource {
    fn default() -> Self {
        Self::new("/dev/input/event")
    }
}

impl NodeSource for EvdevSource {
    fn path(&self, index: u32) -> String {
        self.node_path(index).display().to_string()
    }

    fn open(&self, index: u32) -> Result<Box<dyn EventNode>, ProbeError> {
        Ok(Box::new(EvdevNode::open(self.node_path(index))?))
    }
}

/// One open evdev node. Closed on drop.
#[derive(Debug)]
pub struct EvdevNode {
    file: File,
}

impl EvdevNode {
    /// Open `path` read-only and non-blocking.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path.as_ref())
            .map_err(ProbeError::from_open)?;
        Ok(Self { file })
    }

    fn fd(&self) -> libc::c_int {
        self.file.as_raw_fd()
    }
}

/// Type, code and value sit at the tail of `struct input_event`, after the
/// timestamp, whatever layout the timestamp has on this target.
fn decode_record(buf: &[u8; RECORD_SIZE]) -> RawEvent {
    let tail = RECORD_SIZE - 8;
    let kind = u16::from_ne_bytes([buf[tail], buf[tail + 1]]);
    let code = u16::from_ne_bytes([buf[tail + 2], buf[tail + 3]]);
    let value = i32::from_ne_bytes([buf[tail + 4], buf[tail + 5], buf[tail + 6], buf[tail + 7]]);
    RawEvent { kind, code, value }
}

impl EventNode for EvdevNode {
    fn event_types(&self) -> Result<EventTypeBits, ProbeError> {
        let mut bits = EventTypeBits::new();
        unsafe { ioctl::eviocgbit(self.fd(), 0, bits.as_mut_bytes()) }
            .map_err(|_| ProbeError::CapabilityQueryFailed { query: "EVIOCGBIT(0)" })?;
        Ok(bits)
    }

    fn event_codes(&self, kind: u16) -> Result<CodeBits, ProbeError> {
        let mut bits = CodeBits::new();
        unsafe { ioctl::eviocgbit(self.fd(), kind, bits.as_mut_bytes()) }
            .map_err(|_| ProbeError::CapabilityQueryFailed { query: "EVIOCGBIT" })?;
        Ok(bits)
    }

    fn identity(&self) -> Result<DeviceId, ProbeError> {
        let mut id = libc::input_id {
            bustype: 0,
            vendor: 0,
            product: 0,
            version: 0,
        };
        unsafe { ioctl::eviocgid(self.fd(), &mut id) }
            .map_err(|_| ProbeError::CapabilityQueryFailed { query: "EVIOCGID" })?;
        Ok(DeviceId {
            bustype: id.bustype,
            vendor: id.vendor,
            product: id.product,
            version: id.version,
        })
    }

    fn abs_info(&self, axis: u16) -> Result<AbsInfo, ProbeError> {
        let mut info = libc::input_absinfo {
            value: 0,
            minimum: 0,
            maximum: 0,
            fuzz: 0,
            flat: 0,
            resolution: 0,
        };
        unsafe { ioctl::eviocgabs(self.fd(), axis, &mut info) }
            .map_err(|_| ProbeError::CapabilityQueryFailed { query: "EVIOCGABS" })?;
        Ok(AbsInfo {
            value: info.value,
            minimum: info.minimum,
            maximum: info.maximum,
        })
    }

    fn read_event(&mut self) -> Result<Option<RawEvent>, ProbeError> {
        let mut buf = [0u8; RECORD_SIZE];
        match self.file.read(&mut buf) {
            Ok(n) if n == RECORD_SIZE => Ok(Some(decode_record(&buf))),
            Ok(n) => Err(ProbeError::ShortRead {
                got: n,
                expected: RECORD_SIZE,
            }),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(ProbeError::StreamRead(e)),
        }
    }

    fn name(&self) -> Option<String> {
        let mut buf = [0u8; 256];
        let len = unsafe { ioctl::eviocgname(self.fd(), &mut buf) }.ok()?;
        let len = (len.max(0) as usize).min(buf.len());
        let raw = &buf[..len];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Some(String::from_utf8_lossy(&raw[..end]).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tail_decodes() {
        let mut buf = [0u8; RECORD_SIZE];
        let tail = RECORD_SIZE - 8;
        buf[tail..tail + 2].copy_from_slice(&3u16.to_ne_bytes());
        buf[tail + 2..tail + 4].copy_from_slice(&1u16.to_ne_bytes());
        buf[tail + 4..].copy_from_slice(&(-42i32).to_ne_bytes());
        assert_eq!(decode_record(&buf), RawEvent::abs(1, -42));
    }

    #[test]
    fn missing_node_is_unavailable() {
        let source = EvdevSource::new("/nonexistent/lightgun/event");
        assert_eq!(source.path(7), "/nonexistent/lightgun/event7");
        assert!(source.open(7).err().is_some_and(|e| e.is_unavailable()));
    }
}
