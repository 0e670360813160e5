use crate::error::SortError;

pub const INITIAL_CAPACITY: usize = 4096;

/// Append-only byte buffer whose capacity doubles until an append fits.
///
/// Growth goes through fallible reservation so an allocation failure surfaces
/// as [`SortError::Allocation`] instead of aborting the process.
#[derive(Debug)]
pub struct OutputBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl OutputBuffer {
    pub fn new() -> Result<Self, SortError> {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, SortError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| SortError::Allocation {
                requested: capacity,
            })?;
        Ok(Self { bytes, capacity })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, data: &[u8]) -> Result<(), SortError> {
        let needed = self
            .bytes
            .len()
            .checked_add(data.len())
            .ok_or(SortError::Allocation {
                requested: usize::MAX,
            })?;
        self.ensure_capacity(needed)?;
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    pub fn push_byte(&mut self, byte: u8) -> Result<(), SortError> {
        self.push(&[byte])
    }

    pub fn push_str(&mut self, text: &str) -> Result<(), SortError> {
        self.push(text.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn ensure_capacity(&mut self, needed: usize) -> Result<(), SortError> {
        if needed <= self.capacity {
            return Ok(());
        }

        let mut next = self.capacity.max(1);
        while next < needed {
            next = next.checked_mul(2).ok_or(SortError::Allocation { requested: needed })?;
        }

        self.bytes
            .try_reserve_exact(next - self.bytes.len())
            .map_err(|_| SortError::Allocation { requested: next })?;
        self.capacity = next;
        Ok(())
    }
}
