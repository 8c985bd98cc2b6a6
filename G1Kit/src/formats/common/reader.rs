//! Bounds-checked little-endian reads over a borrowed buffer

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Cursor over a byte slice. Every read is checked against the slice end.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Reader positioned at `offset`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        let mut reader = Self::new(data);
        reader.seek(offset)?;
        Ok(reader)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(self.out_of_bounds(offset, 0));
        }
        self.pos = offset;
        Ok(())
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.bytes(len).map(|_| ())
    }

    /// Borrow `len` bytes at an absolute offset without moving the cursor.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| self.out_of_bounds(offset, len))?;
        self.data
            .get(offset..end)
            .ok_or_else(|| self.out_of_bounds(offset, len))
    }

    /// Borrow the next `len` bytes and advance.
    pub fn bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.slice(self.pos, len)?;
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.bytes(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.bytes(4)?))
    }

    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
        let bytes = self.bytes(N * 4)?;
        let mut out = [0f32; N];
        LittleEndian::read_f32_into(bytes, &mut out);
        Ok(out)
    }

    /// Read `count` u32 values starting at an absolute offset.
    pub fn u32_table(&self, offset: usize, count: usize) -> Result<Vec<u32>> {
        let len = count
            .checked_mul(4)
            .ok_or_else(|| self.out_of_bounds(offset, usize::MAX))?;
        let bytes = self.slice(offset, len)?;
        let mut out = vec![0u32; count];
        LittleEndian::read_u32_into(bytes, &mut out);
        Ok(out)
    }

    fn out_of_bounds(&self, offset: usize, len: usize) -> Error {
        Error::OutOfBounds {
            offset,
            len,
            size: self.data.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() {
        let data = [0x01, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x80, 0x3F];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u16().unwrap(), 1);
        assert_eq!(reader.read_i16().unwrap(), -1);
        assert!((reader.read_f32().unwrap() - 1.0).abs() < f32::EPSILON);
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_reads_past_end_fail() {
        let data = [0u8; 6];
        let mut reader = ByteReader::at(&data, 4).unwrap();
        assert!(matches!(
            reader.read_u32(),
            Err(Error::OutOfBounds { offset: 4, len: 4, size: 6 })
        ));
        assert!(reader.slice(usize::MAX, 2).is_err());
        assert!(ByteReader::at(&data, 7).is_err());
        assert!(reader.u32_table(0, 2).is_err());
    }
}
