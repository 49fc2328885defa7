use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;

/// NBT tag type IDs.
pub const TAG_END: u8 = 0;
pub const TAG_BYTE: u8 = 1;
pub const TAG_SHORT: u8 = 2;
pub const TAG_INT: u8 = 3;
pub const TAG_LONG: u8 = 4;
pub const TAG_FLOAT: u8 = 5;
pub const TAG_DOUBLE: u8 = 6;
pub const TAG_BYTE_ARRAY: u8 = 7;
pub const TAG_STRING: u8 = 8;
pub const TAG_LIST: u8 = 9;
pub const TAG_COMPOUND: u8 = 10;
pub const TAG_INT_ARRAY: u8 = 11;
pub const TAG_LONG_ARRAY: u8 = 12;

#[derive(Debug, Error)]
pub enum NbtError {
    #[error("not enough data reading NBT")]
    ReadUnderflow,
    #[error("unknown NBT tag id {0}")]
    UnknownTag(u8),
    #[error("invalid modified-UTF-8 string")]
    InvalidString,
}

pub type NbtResult<T> = Result<T, NbtError>;

/// An NBT value.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<NbtValue>),
    Compound(Vec<(String, NbtValue)>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl NbtValue {
    pub fn tag_id(&self) -> u8 {
        match self {
            NbtValue::Byte(_) => TAG_BYTE,
            NbtValue::Short(_) => TAG_SHORT,
            NbtValue::Int(_) => TAG_INT,
            NbtValue::Long(_) => TAG_LONG,
            NbtValue::Float(_) => TAG_FLOAT,
            NbtValue::Double(_) => TAG_DOUBLE,
            NbtValue::ByteArray(_) => TAG_BYTE_ARRAY,
            NbtValue::String(_) => TAG_STRING,
            NbtValue::List(_) => TAG_LIST,
            NbtValue::Compound(_) => TAG_COMPOUND,
            NbtValue::IntArray(_) => TAG_INT_ARRAY,
            NbtValue::LongArray(_) => TAG_LONG_ARRAY,
        }
    }

    /// Look up a named entry in a `Compound`; `None` for any other variant.
    pub fn get(&self, key: &str) -> Option<&NbtValue> {
        match self {
            NbtValue::Compound(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Write this value as a root compound tag with no name (network protocol
    /// form, used for post-1.20.2 registry data; pre-1.20.2 wire NBT such as
    /// Slot tags and block entities uses `write_root_named` instead).
    pub fn write_root_network(&self, buf: &mut BytesMut) {
        buf.put_u8(self.tag_id());
        self.write_payload(buf);
    }

    /// Write this value as a full named root tag (for files).
    pub fn write_root_named(&self, name: &str, buf: &mut BytesMut) {
        buf.put_u8(self.tag_id());
        write_nbt_string(name, buf);
        self.write_payload(buf);
    }

    /// Write just the payload (no tag type or name).
    pub fn write_payload(&self, buf: &mut BytesMut) {
        match self {
            NbtValue::Byte(v) => buf.put_i8(*v),
            NbtValue::Short(v) => buf.put_i16(*v),
            NbtValue::Int(v) => buf.put_i32(*v),
            NbtValue::Long(v) => buf.put_i64(*v),
            NbtValue::Float(v) => buf.put_f32(*v),
            NbtValue::Double(v) => buf.put_f64(*v),
            NbtValue::ByteArray(v) => {
                buf.put_i32(v.len() as i32);
                for b in v {
                    buf.put_i8(*b);
                }
            }
            NbtValue::String(v) => {
                write_nbt_string(v, buf);
            }
            NbtValue::List(v) => {
                if v.is_empty() {
                    buf.put_u8(TAG_END);
                    buf.put_i32(0);
                } else {
                    buf.put_u8(v[0].tag_id());
                    buf.put_i32(v.len() as i32);
                    for item in v {
                        item.write_payload(buf);
                    }
                }
            }
            NbtValue::Compound(entries) => {
                for (name, value) in entries {
                    buf.put_u8(value.tag_id());
                    write_nbt_string(name, buf);
                    value.write_payload(buf);
                }
                buf.put_u8(TAG_END);
            }
            NbtValue::IntArray(v) => {
                buf.put_i32(v.len() as i32);
                for i in v {
                    buf.put_i32(*i);
                }
            }
            NbtValue::LongArray(v) => {
                buf.put_i32(v.len() as i32);
                for l in v {
                    buf.put_i64(*l);
                }
            }
        }
    }

    /// Read a root tag (type byte + name + payload), as stored in files and
    /// sent for e.g. chunk heightmaps / block entities pre-1.20.2.
    pub fn read_root_named(buf: &mut BytesMut) -> NbtResult<(String, NbtValue)> {
        let tag_id = read_u8(buf)?;
        if tag_id == TAG_END {
            return Ok((String::new(), NbtValue::Compound(Vec::new())));
        }
        let name = read_nbt_string(buf)?;
        let value = Self::read_payload(tag_id, buf)?;
        Ok((name, value))
    }

    /// Read a root tag with the name omitted (network protocol form).
    pub fn read_root_network(buf: &mut BytesMut) -> NbtResult<NbtValue> {
        let tag_id = read_u8(buf)?;
        if tag_id == TAG_END {
            return Ok(NbtValue::Compound(Vec::new()));
        }
        Self::read_payload(tag_id, buf)
    }

    /// Read just the payload for a known tag id.
    pub fn read_payload(tag_id: u8, buf: &mut BytesMut) -> NbtResult<NbtValue> {
        Ok(match tag_id {
            TAG_BYTE => NbtValue::Byte(read_u8(buf)? as i8),
            TAG_SHORT => NbtValue::Short(read_i16(buf)?),
            TAG_INT => NbtValue::Int(read_i32(buf)?),
            TAG_LONG => NbtValue::Long(read_i64(buf)?),
            TAG_FLOAT => NbtValue::Float(read_f32(buf)?),
            TAG_DOUBLE => NbtValue::Double(read_f64(buf)?),
            TAG_BYTE_ARRAY => {
                let len = read_i32(buf)?.max(0) as usize;
                let mut out = Vec::with_capacity(len);
                for _ in 0..len {
                    out.push(read_u8(buf)? as i8);
                }
                NbtValue::ByteArray(out)
            }
            TAG_STRING => NbtValue::String(read_nbt_string(buf)?),
            TAG_LIST => {
                let elem_tag = read_u8(buf)?;
                let len = read_i32(buf)?.max(0) as usize;
                let mut out = Vec::with_capacity(len);
                if elem_tag != TAG_END {
                    for _ in 0..len {
                        out.push(Self::read_payload(elem_tag, buf)?);
                    }
                }
                NbtValue::List(out)
            }
            TAG_COMPOUND => {
                let mut entries = Vec::new();
                loop {
                    let child_tag = read_u8(buf)?;
                    if child_tag == TAG_END {
                        break;
                    }
                    let name = read_nbt_string(buf)?;
                    let value = Self::read_payload(child_tag, buf)?;
                    entries.push((name, value));
                }
                NbtValue::Compound(entries)
            }
            TAG_INT_ARRAY => {
                let len = read_i32(buf)?.max(0) as usize;
                let mut out = Vec::with_capacity(len);
                for _ in 0..len {
                    out.push(read_i32(buf)?);
                }
                NbtValue::IntArray(out)
            }
            TAG_LONG_ARRAY => {
                let len = read_i32(buf)?.max(0) as usize;
                let mut out = Vec::with_capacity(len);
                for _ in 0..len {
                    out.push(read_i64(buf)?);
                }
                NbtValue::LongArray(out)
            }
            other => return Err(NbtError::UnknownTag(other)),
        })
    }
}

fn read_u8(buf: &mut BytesMut) -> NbtResult<u8> {
    if !buf.has_remaining() {
        return Err(NbtError::ReadUnderflow);
    }
    Ok(buf.get_u8())
}

fn read_i16(buf: &mut BytesMut) -> NbtResult<i16> {
    if buf.remaining() < 2 {
        return Err(NbtError::ReadUnderflow);
    }
    Ok(buf.get_i16())
}

fn read_i32(buf: &mut BytesMut) -> NbtResult<i32> {
    if buf.remaining() < 4 {
        return Err(NbtError::ReadUnderflow);
    }
    Ok(buf.get_i32())
}

fn read_i64(buf: &mut BytesMut) -> NbtResult<i64> {
    if buf.remaining() < 8 {
        return Err(NbtError::ReadUnderflow);
    }
    Ok(buf.get_i64())
}

fn read_f32(buf: &mut BytesMut) -> NbtResult<f32> {
    if buf.remaining() < 4 {
        return Err(NbtError::ReadUnderflow);
    }
    Ok(buf.get_f32())
}

fn read_f64(buf: &mut BytesMut) -> NbtResult<f64> {
    if buf.remaining() < 8 {
        return Err(NbtError::ReadUnderflow);
    }
    Ok(buf.get_f64())
}

/// NBT strings are length-prefixed (u16) Java modified-UTF-8. We don't have
/// surrogate pairs or embedded NULs to worry about for protocol text in
/// practice, so this decodes the common case (plain UTF-8 bytes) and falls
/// back to a lossy conversion rather than failing the whole packet.
pub fn read_nbt_string(buf: &mut BytesMut) -> NbtResult<String> {
    if buf.remaining() < 2 {
        return Err(NbtError::ReadUnderflow);
    }
    let len = buf.get_u16() as usize;
    if buf.remaining() < len {
        return Err(NbtError::ReadUnderflow);
    }
    let bytes = buf.split_to(len);
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_nbt_string(s: &str, buf: &mut BytesMut) {
    let bytes = s.as_bytes();
    buf.put_u16(bytes.len() as u16);
    buf.put_slice(bytes);
}

/// Helper macro for building compound tags.
#[macro_export]
macro_rules! nbt_compound {
    ($($key:expr => $val:expr),* $(,)?) => {
        $crate::NbtValue::Compound(vec![
            $(($key.into(), $val)),*
        ])
    };
}

/// Helper macro for building list tags.
#[macro_export]
macro_rules! nbt_list {
    ($($val:expr),* $(,)?) => {
        $crate::NbtValue::List(vec![$($val),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_simple_compound() {
        let nbt = NbtValue::Compound(vec![
            ("name".into(), NbtValue::String("test".into())),
            ("value".into(), NbtValue::Int(42)),
        ]);
        let mut buf = BytesMut::new();
        nbt.write_root_network(&mut buf);
        assert_eq!(buf[0], TAG_COMPOUND);
    }

    #[test]
    fn test_long_array() {
        let nbt = NbtValue::LongArray(vec![1, 2, 3]);
        let mut buf = BytesMut::new();
        nbt.write_payload(&mut buf);
        assert_eq!(buf.len(), 28);
    }

    #[test]
    fn test_roundtrip_network_compound() {
        let nbt = nbt_compound! {
            "Count" => NbtValue::Byte(5),
            "id" => NbtValue::Short(42),
            "Damage" => NbtValue::Short(0),
            "list" => NbtValue::List(vec![NbtValue::Int(1), NbtValue::Int(2)]),
        };
        let mut buf = BytesMut::new();
        nbt.write_root_network(&mut buf);
        let decoded = NbtValue::read_root_network(&mut buf).unwrap();
        assert_eq!(decoded, nbt);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_roundtrip_named_root() {
        let nbt = NbtValue::Compound(vec![("x".into(), NbtValue::Int(-7))]);
        let mut buf = BytesMut::new();
        nbt.write_root_named("root", &mut buf);
        let (name, decoded) = NbtValue::read_root_named(&mut buf).unwrap();
        assert_eq!(name, "root");
        assert_eq!(decoded, nbt);
    }

    #[test]
    fn test_empty_list_roundtrip() {
        let nbt = NbtValue::Compound(vec![("empty".into(), NbtValue::List(Vec::new()))]);
        let mut buf = BytesMut::new();
        nbt.write_root_network(&mut buf);
        let decoded = NbtValue::read_root_network(&mut buf).unwrap();
        assert_eq!(decoded, nbt);
    }

    #[test]
    fn test_read_underflow() {
        let mut buf = BytesMut::from(&[TAG_COMPOUND][..]);
        assert!(matches!(
            NbtValue::read_root_network(&mut buf),
            Err(NbtError::ReadUnderflow)
        ));
    }
}
