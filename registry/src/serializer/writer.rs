use crate::identity::Identity;

use super::Serializer;

#[derive(Debug, Default)]
pub struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn write<S: Serializer>(&mut self, value: &S) {
        value.write(self);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Write a u16 length prefixed string
    ///
    /// Every string the registry accepts is capped far below u16::MAX.
    /// Longer input is a caller bug: it panics in debug builds and is
    /// truncated on a char boundary otherwise.
    pub fn write_string(&mut self, value: &str) {
        debug_assert!(
            value.len() <= u16::MAX as usize,
            "string of {} bytes does not fit a u16 length prefix",
            value.len()
        );
        let mut end = value.len().min(u16::MAX as usize);
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        let bytes = &value.as_bytes()[..end];
        self.write_u16(bytes.len() as u16);
        self.write_bytes(bytes);
    }

    pub fn write_identity(&mut self, identity: &Identity) {
        self.write_bytes(identity.as_bytes());
    }

    pub fn bytes(self) -> Vec<u8> {
        self.bytes
    }
}
