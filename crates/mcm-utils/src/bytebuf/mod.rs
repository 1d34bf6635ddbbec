//! Fixed-capacity byte buffer with a positional cursor.
//!
//! Serialization helper for the fixed-size structures of the wallet core.
//! All reads and writes go through a cursor that advances on access and is
//! bounds-checked against the fixed capacity. Multi-byte integer writes
//! honor a configurable byte order (big-endian by default); the WOTS+
//! hash-address structure is built through this type.

use mcm_types::CryptoError;

/// Byte order for multi-byte integer writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

/// Fixed-capacity byte region with a cursor.
#[derive(Clone, Debug)]
pub struct ByteBuffer {
    data: Vec<u8>,
    position: usize,
    order: ByteOrder,
}

impl ByteBuffer {
    /// Create a zero-filled buffer of `capacity` bytes, cursor at 0.
    pub fn allocate(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
            position: 0,
            order: ByteOrder::BigEndian,
        }
    }

    /// Create a buffer holding a copy of `bytes`, cursor at 0.
    pub fn wrap(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
            position: 0,
            order: ByteOrder::BigEndian,
        }
    }

    /// Set the byte order used by [`put_int`](Self::put_int).
    pub fn with_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor. `position == capacity` is allowed (buffer exhausted).
    pub fn set_position(&mut self, position: usize) -> Result<(), CryptoError> {
        if position > self.capacity() {
            return Err(CryptoError::InvalidPosition {
                position,
                capacity: self.capacity(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Reset the cursor to the start of the buffer.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.position
    }

    fn check_write(&self, requested: usize) -> Result<(), CryptoError> {
        if requested > self.remaining() {
            return Err(CryptoError::BufferOverflow {
                position: self.position,
                capacity: self.capacity(),
                requested,
            });
        }
        Ok(())
    }

    fn check_read(&self, requested: usize) -> Result<(), CryptoError> {
        if requested > self.remaining() {
            return Err(CryptoError::BufferUnderflow {
                position: self.position,
                capacity: self.capacity(),
                requested,
            });
        }
        Ok(())
    }

    /// Write one byte at the cursor.
    pub fn put(&mut self, byte: u8) -> Result<(), CryptoError> {
        self.check_write(1)?;
        self.data[self.position] = byte;
        self.position += 1;
        Ok(())
    }

    /// Write all of `src` at the cursor.
    pub fn put_slice(&mut self, src: &[u8]) -> Result<(), CryptoError> {
        self.check_write(src.len())?;
        self.data[self.position..self.position + src.len()].copy_from_slice(src);
        self.position += src.len();
        Ok(())
    }

    /// Write `length` bytes of `src` starting at `offset`.
    pub fn put_slice_range(
        &mut self,
        src: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        let range = src
            .get(offset..offset + length)
            .ok_or(CryptoError::InvalidLength {
                field: "source range",
                expected: offset + length,
                got: src.len(),
            })?;
        self.put_slice(range)
    }

    /// Write a 32-bit integer at the cursor, honoring the configured order.
    pub fn put_int(&mut self, value: i32) -> Result<(), CryptoError> {
        let bytes = match self.order {
            ByteOrder::BigEndian => value.to_be_bytes(),
            ByteOrder::LittleEndian => value.to_le_bytes(),
        };
        self.put_slice(&bytes)
    }

    /// Read bytes at the cursor into `dst`, filling it completely.
    pub fn get(&mut self, dst: &mut [u8]) -> Result<(), CryptoError> {
        self.check_read(dst.len())?;
        dst.copy_from_slice(&self.data[self.position..self.position + dst.len()]);
        self.position += dst.len();
        Ok(())
    }

    /// Read one byte at the cursor.
    pub fn get_one(&mut self) -> Result<u8, CryptoError> {
        self.check_read(1)?;
        let byte = self.data[self.position];
        self.position += 1;
        Ok(byte)
    }

    /// Return a copy of the full backing region, regardless of cursor.
    pub fn array(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Borrow the full backing region, regardless of cursor.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
