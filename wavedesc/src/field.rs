//! Bounds-checked fixed-width field reads from a descriptor cursor.
//!
//! The cursor is positioned relative to the start of the descriptor, so
//! `position()` is always the descriptor-relative offset of the next field.
//! A read that runs off the end of the buffer becomes a `MalformedField`
//! naming the field, rather than an `io::Error`.

use std::io::{self, Cursor, Read};

use byteorder::{ByteOrder, ReadBytesExt};

use crate::error::DecodeError;

pub(crate) trait ReadField {
    fn field_u8(&mut self, field: &'static str) -> Result<u8, DecodeError>;
    fn field_u16<BO: ByteOrder>(&mut self, field: &'static str) -> Result<u16, DecodeError>;
    fn field_i16<BO: ByteOrder>(&mut self, field: &'static str) -> Result<i16, DecodeError>;
    fn field_u32<BO: ByteOrder>(&mut self, field: &'static str) -> Result<u32, DecodeError>;
    fn field_f32<BO: ByteOrder>(&mut self, field: &'static str) -> Result<f32, DecodeError>;
    fn field_f64<BO: ByteOrder>(&mut self, field: &'static str) -> Result<f64, DecodeError>;

    /// Read a field as raw bytes, for fields whose interpretation depends on
    /// their value.
    fn field_bytes<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError>;

    /// Read a fixed size, null padded ASCII field.
    fn field_text<const N: usize>(&mut self, field: &'static str) -> Result<String, DecodeError>;

    /// Step over a field we don't keep. It must still be present.
    fn skip_field(&mut self, field: &'static str, width: usize) -> Result<(), DecodeError>;
}

fn read_field<T>(
    cursor: &mut Cursor<&[u8]>,
    field: &'static str,
    width: usize,
    read: impl FnOnce(&mut Cursor<&[u8]>) -> io::Result<T>,
) -> Result<T, DecodeError> {
    let offset = cursor.position() as usize;
    read(cursor).map_err(|_| truncated(cursor, field, offset, width))
}

fn truncated(cursor: &Cursor<&[u8]>, field: &'static str, offset: usize, width: usize) -> DecodeError {
    let available = cursor.get_ref().len().saturating_sub(offset);
    DecodeError::malformed(
        field,
        offset,
        format!("needs {width} bytes but only {available} remain in the preamble"),
    )
}

/// Everything up to the first null byte, lossily decoded.
pub(crate) fn array_to_string(x: &[u8]) -> String {
    String::from_utf8_lossy(&x[0..x.iter().position(|b| *b == 0).unwrap_or(x.len())])
        .trim_end()
        .to_string()
}

impl ReadField for Cursor<&[u8]> {
    fn field_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        read_field(self, field, 1, |c| c.read_u8())
    }

    fn field_u16<BO: ByteOrder>(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        read_field(self, field, 2, |c| c.read_u16::<BO>())
    }

    fn field_i16<BO: ByteOrder>(&mut self, field: &'static str) -> Result<i16, DecodeError> {
        read_field(self, field, 2, |c| c.read_i16::<BO>())
    }

    fn field_u32<BO: ByteOrder>(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        read_field(self, field, 4, |c| c.read_u32::<BO>())
    }

    fn field_f32<BO: ByteOrder>(&mut self, field: &'static str) -> Result<f32, DecodeError> {
        read_field(self, field, 4, |c| c.read_f32::<BO>())
    }

    fn field_f64<BO: ByteOrder>(&mut self, field: &'static str) -> Result<f64, DecodeError> {
        read_field(self, field, 8, |c| c.read_f64::<BO>())
    }

    fn field_bytes<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        read_field(self, field, N, |c| {
            let mut buf = [0; N];
            c.read_exact(&mut buf)?;
            Ok(buf)
        })
    }

    fn field_text<const N: usize>(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let buf = self.field_bytes::<N>(field)?;
        Ok(array_to_string(&buf))
    }

    fn skip_field(&mut self, field: &'static str, width: usize) -> Result<(), DecodeError> {
        let offset = self.position() as usize;
        if self.get_ref().len() < offset + width {
            return Err(truncated(self, field, offset, width));
        }
        self.set_position((offset + width) as u64);
        Ok(())
    }
}
