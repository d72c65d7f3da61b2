use crate::identity::{Identity, IDENTITY_SIZE};

use super::{ReaderError, Serializer};

pub struct Reader<'a> {
    bytes: &'a [u8],
    total: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, total: 0 }
    }

    pub fn read<S: Serializer>(&mut self) -> Result<S, ReaderError> {
        S::read(self)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ReaderError> {
        if n > self.bytes.len() {
            return Err(ReaderError::UnexpectedEof);
        }
        let (head, tail) = self.bytes.split_at(n);
        self.bytes = tail;
        self.total += n;
        Ok(head)
    }

    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], ReaderError> {
        let slice = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn read_bytes_32(&mut self) -> Result<[u8; 32], ReaderError> {
        self.read_bytes::<32>()
    }

    pub fn read_u8(&mut self) -> Result<u8, ReaderError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ReaderError> {
        Ok(u16::from_be_bytes(self.read_bytes()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, ReaderError> {
        Ok(u32::from_be_bytes(self.read_bytes()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, ReaderError> {
        Ok(u64::from_be_bytes(self.read_bytes()?))
    }

    pub fn read_string(&mut self) -> Result<String, ReaderError> {
        let len = self.read_u16()? as usize;
        self.read_string_with_size(len)
    }

    pub fn read_string_with_size(&mut self, len: usize) -> Result<String, ReaderError> {
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ReaderError::InvalidValue)
    }

    /// Read a length prefixed string, rejecting it when longer than `max`
    pub fn read_string_max(&mut self, max: usize) -> Result<String, ReaderError> {
        let len = self.read_u16()? as usize;
        if len > max {
            return Err(ReaderError::InvalidSize);
        }
        self.read_string_with_size(len)
    }

    pub fn read_identity(&mut self) -> Result<Identity, ReaderError> {
        Ok(Identity::new(self.read_bytes::<IDENTITY_SIZE>()?))
    }

    /// Bytes consumed so far
    pub fn total_read(&self) -> usize {
        self.total
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}
