use crate::error::{CodecError, CodecResult};
use bytes::{Buf, BufMut, BytesMut};
use mclib_nbt::NbtValue;
use mclib_types::BlockPos;
use uuid::Uuid;

// === VarInt / VarLong (§4.1) ===

/// Read a VarInt: up to 5 base-128 groups, LSB-first, continuation bit on
/// every byte but the last.
pub fn read_varint(buf: &mut BytesMut) -> CodecResult<i32> {
    let mut result: i32 = 0;
    let mut shift: u32 = 0;
    loop {
        if !buf.has_remaining() {
            return Err(CodecError::ReadUnderflow);
        }
        let byte = buf.get_u8();
        result |= ((byte & 0x7F) as i32) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
        if shift >= 35 {
            return Err(CodecError::MalformedVarInt);
        }
    }
}

/// Write a VarInt. Always emits at least one byte.
pub fn write_varint(buf: &mut BytesMut, value: i32) {
    let mut uval = value as u32;
    loop {
        let mut byte = (uval & 0x7F) as u8;
        uval >>= 7;
        if uval != 0 {
            byte |= 0x80;
        }
        buf.put_u8(byte);
        if uval == 0 {
            break;
        }
    }
}

/// Byte length a VarInt would occupy without actually encoding it — used by
/// the frame layer to size length prefixes.
pub fn varint_len(value: i32) -> usize {
    let mut val = value as u32;
    let mut len = 0;
    loop {
        len += 1;
        val >>= 7;
        if val == 0 {
            break;
        }
    }
    len
}

pub fn read_varlong(buf: &mut BytesMut) -> CodecResult<i64> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;
    loop {
        if !buf.has_remaining() {
            return Err(CodecError::ReadUnderflow);
        }
        let byte = buf.get_u8();
        result |= ((byte & 0x7F) as i64) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
        if shift >= 70 {
            return Err(CodecError::MalformedVarInt);
        }
    }
}

pub fn write_varlong(buf: &mut BytesMut, value: i64) {
    let mut uval = value as u64;
    loop {
        let mut byte = (uval & 0x7F) as u8;
        uval >>= 7;
        if uval != 0 {
            byte |= 0x80;
        }
        buf.put_u8(byte);
        if uval == 0 {
            break;
        }
    }
}

pub fn varlong_len(value: i64) -> usize {
    let mut val = value as u64;
    let mut len = 0;
    loop {
        len += 1;
        val >>= 7;
        if val == 0 {
            break;
        }
    }
    len
}

// === Strings, UUIDs, byte arrays ===

/// Read a VarInt-length-prefixed UTF-8 string. `max_len` is the protocol
/// character limit; the wire byte budget is `4 * max_len` to allow for
/// multi-byte UTF-8 (matches the Notchian server's own generous check).
pub fn read_string(buf: &mut BytesMut, max_len: usize) -> CodecResult<String> {
    let len = read_varint(buf)? as usize;
    if len > max_len * 4 {
        return Err(CodecError::StringTooLong(len, max_len));
    }
    if buf.remaining() < len {
        return Err(CodecError::ReadUnderflow);
    }
    let bytes = buf.split_to(len);
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_string(buf: &mut BytesMut, s: &str) {
    write_varint(buf, s.len() as i32);
    buf.put_slice(s.as_bytes());
}

/// UUID as two big-endian 64-bit halves (§4.2).
pub fn read_uuid(buf: &mut BytesMut) -> CodecResult<Uuid> {
    if buf.remaining() < 16 {
        return Err(CodecError::ReadUnderflow);
    }
    let mut bytes = [0u8; 16];
    buf.copy_to_slice(&mut bytes);
    Ok(Uuid::from_bytes(bytes))
}

pub fn write_uuid(buf: &mut BytesMut, uuid: &Uuid) {
    buf.put_slice(uuid.as_bytes());
}

pub fn read_byte_array(buf: &mut BytesMut) -> CodecResult<Vec<u8>> {
    let len = read_varint(buf)? as usize;
    if buf.remaining() < len {
        return Err(CodecError::ReadUnderflow);
    }
    Ok(buf.split_to(len).to_vec())
}

pub fn write_byte_array(buf: &mut BytesMut, data: &[u8]) {
    write_varint(buf, data.len() as i32);
    buf.put_slice(data);
}

/// Read a fixed-size byte array (no length prefix).
pub fn read_fixed_bytes(buf: &mut BytesMut, len: usize) -> CodecResult<Vec<u8>> {
    if buf.remaining() < len {
        return Err(CodecError::ReadUnderflow);
    }
    Ok(buf.split_to(len).to_vec())
}

// === Position (§4.2) ===

pub fn read_position(buf: &mut BytesMut) -> CodecResult<BlockPos> {
    if buf.remaining() < 8 {
        return Err(CodecError::ReadUnderflow);
    }
    Ok(BlockPos::decode(buf.get_u64()))
}

pub fn write_position(buf: &mut BytesMut, pos: &BlockPos) {
    buf.put_u64(pos.encode());
}

// === NBT passthrough (§4.9) ===
//
// Pre-1.20.2 wire NBT (item `tag`, BlockEntityData, chunk block entities)
// uses the named root form (type byte + empty-name length + payload), not
// the network form introduced later — the named form with an empty name
// is what the original reads via `in >> m_NBT` for a Slot's tag compound.

pub fn read_nbt(buf: &mut BytesMut) -> CodecResult<NbtValue> {
    let (_name, value) = NbtValue::read_root_named(buf)?;
    Ok(value)
}

pub fn write_nbt(buf: &mut BytesMut, value: &NbtValue) {
    value.write_root_named("", buf);
}

/// A growable byte buffer with a read cursor and big-endian primitive
/// (de)serialization (§4.2). Wraps `bytes::BytesMut`: writes append, reads
/// advance the cursor and fail with `CodecError::ReadUnderflow` if short,
/// never panic.
#[derive(Debug, Default, Clone)]
pub struct DataBuffer {
    inner: BytesMut,
}

impl DataBuffer {
    pub fn new() -> Self {
        Self {
            inner: BytesMut::new(),
        }
    }

    pub fn from_bytes(inner: BytesMut) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> BytesMut {
        self.inner
    }

    pub fn as_mut(&mut self) -> &mut BytesMut {
        &mut self.inner
    }

    /// Bytes still unread.
    pub fn size(&self) -> usize {
        self.inner.remaining()
    }

    pub fn is_finished(&self) -> bool {
        !self.inner.has_remaining()
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        if self.inner.remaining() < 1 {
            return Err(CodecError::ReadUnderflow);
        }
        Ok(self.inner.get_u8())
    }

    pub fn read_i8(&mut self) -> CodecResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_bool(&mut self) -> CodecResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i16(&mut self) -> CodecResult<i16> {
        if self.inner.remaining() < 2 {
            return Err(CodecError::ReadUnderflow);
        }
        Ok(self.inner.get_i16())
    }

    pub fn read_u16(&mut self) -> CodecResult<u16> {
        if self.inner.remaining() < 2 {
            return Err(CodecError::ReadUnderflow);
        }
        Ok(self.inner.get_u16())
    }

    pub fn read_i32(&mut self) -> CodecResult<i32> {
        if self.inner.remaining() < 4 {
            return Err(CodecError::ReadUnderflow);
        }
        Ok(self.inner.get_i32())
    }

    pub fn read_i64(&mut self) -> CodecResult<i64> {
        if self.inner.remaining() < 8 {
            return Err(CodecError::ReadUnderflow);
        }
        Ok(self.inner.get_i64())
    }

    pub fn read_u64(&mut self) -> CodecResult<u64> {
        if self.inner.remaining() < 8 {
            return Err(CodecError::ReadUnderflow);
        }
        Ok(self.inner.get_u64())
    }

    pub fn read_f32(&mut self) -> CodecResult<f32> {
        if self.inner.remaining() < 4 {
            return Err(CodecError::ReadUnderflow);
        }
        Ok(self.inner.get_f32())
    }

    pub fn read_f64(&mut self) -> CodecResult<f64> {
        if self.inner.remaining() < 8 {
            return Err(CodecError::ReadUnderflow);
        }
        Ok(self.inner.get_f64())
    }

    pub fn read_varint(&mut self) -> CodecResult<i32> {
        read_varint(&mut self.inner)
    }

    pub fn read_varlong(&mut self) -> CodecResult<i64> {
        read_varlong(&mut self.inner)
    }

    pub fn read_string(&mut self, max_len: usize) -> CodecResult<String> {
        read_string(&mut self.inner, max_len)
    }

    pub fn read_uuid(&mut self) -> CodecResult<Uuid> {
        read_uuid(&mut self.inner)
    }

    pub fn read_byte_array(&mut self) -> CodecResult<Vec<u8>> {
        read_byte_array(&mut self.inner)
    }

    pub fn read_fixed_bytes(&mut self, len: usize) -> CodecResult<Vec<u8>> {
        read_fixed_bytes(&mut self.inner, len)
    }

    pub fn read_position(&mut self) -> CodecResult<BlockPos> {
        read_position(&mut self.inner)
    }

    pub fn read_nbt(&mut self) -> CodecResult<NbtValue> {
        read_nbt(&mut self.inner)
    }

    pub fn write_u8(&mut self, v: u8) {
        self.inner.put_u8(v);
    }

    pub fn write_i8(&mut self, v: i8) {
        self.inner.put_i8(v);
    }

    pub fn write_bool(&mut self, v: bool) {
        self.inner.put_u8(v as u8);
    }

    pub fn write_i16(&mut self, v: i16) {
        self.inner.put_i16(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.inner.put_u16(v);
    }

    pub fn write_i32(&mut self, v: i32) {
        self.inner.put_i32(v);
    }

    pub fn write_i64(&mut self, v: i64) {
        self.inner.put_i64(v);
    }

    pub fn write_u64(&mut self, v: u64) {
        self.inner.put_u64(v);
    }

    pub fn write_f32(&mut self, v: f32) {
        self.inner.put_f32(v);
    }

    pub fn write_f64(&mut self, v: f64) {
        self.inner.put_f64(v);
    }

    pub fn write_varint(&mut self, v: i32) {
        write_varint(&mut self.inner, v);
    }

    pub fn write_varlong(&mut self, v: i64) {
        write_varlong(&mut self.inner, v);
    }

    pub fn write_string(&mut self, s: &str) {
        write_string(&mut self.inner, s);
    }

    pub fn write_uuid(&mut self, uuid: &Uuid) {
        write_uuid(&mut self.inner, uuid);
    }

    pub fn write_byte_array(&mut self, data: &[u8]) {
        write_byte_array(&mut self.inner, data);
    }

    pub fn write_position(&mut self, pos: &BlockPos) {
        write_position(&mut self.inner, pos);
    }

    pub fn write_nbt(&mut self, value: &NbtValue) {
        write_nbt(&mut self.inner, value);
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.inner.put_slice(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_roundtrip() {
        let test_cases = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (127, vec![0x7F]),
            (128, vec![0x80, 0x01]),
            (255, vec![0xFF, 0x01]),
            (25565, vec![0xDD, 0xC7, 0x01]),
            (2097151, vec![0xFF, 0xFF, 0x7F]),
            (-1, vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
            (-2147483648, vec![0x80, 0x80, 0x80, 0x80, 0x08]),
        ];

        for (value, expected_bytes) in test_cases {
            let mut buf = BytesMut::new();
            write_varint(&mut buf, value);
            assert_eq!(buf.to_vec(), expected_bytes, "write_varint({}) failed", value);

            let mut buf = BytesMut::from(&expected_bytes[..]);
            let result = read_varint(&mut buf).unwrap();
            assert_eq!(result, value, "read_varint for {} failed", value);
        }
    }

    #[test]
    fn test_varint_300() {
        let mut buf = BytesMut::new();
        write_varint(&mut buf, 300);
        assert_eq!(buf.to_vec(), vec![0xAC, 0x02]);
        let mut buf = BytesMut::from(&[0xACu8, 0x02][..]);
        assert_eq!(read_varint(&mut buf).unwrap(), 300);
    }

    #[test]
    fn test_varint_len_matches_encoded_length() {
        for v in [0, 1, 127, 128, 25565, -1, i32::MAX, i32::MIN] {
            let mut buf = BytesMut::new();
            write_varint(&mut buf, v);
            assert_eq!(varint_len(v), buf.len());
        }
    }

    #[test]
    fn test_varint_read_underflow() {
        let mut buf = BytesMut::from(&[0x80u8][..]);
        assert!(matches!(read_varint(&mut buf), Err(CodecError::ReadUnderflow)));
    }

    #[test]
    fn test_varint_malformed_too_long() {
        let mut buf = BytesMut::from(&[0x80u8, 0x80, 0x80, 0x80, 0x80, 0x01][..]);
        assert!(matches!(read_varint(&mut buf), Err(CodecError::MalformedVarInt)));
    }

    #[test]
    fn test_string_roundtrip() {
        let test_str = "Hello, Minecraft!";
        let mut buf = BytesMut::new();
        write_string(&mut buf, test_str);
        let result = read_string(&mut buf, 32767).unwrap();
        assert_eq!(result, test_str);
    }

    #[test]
    fn test_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let mut buf = BytesMut::new();
        write_uuid(&mut buf, &uuid);
        let result = read_uuid(&mut buf).unwrap();
        assert_eq!(result, uuid);
    }

    #[test]
    fn test_position_roundtrip_via_databuffer() {
        let pos = BlockPos::new(-12345, 70, 678);
        let mut db = DataBuffer::new();
        db.write_position(&pos);
        assert_eq!(db.read_position().unwrap(), pos);
    }

    #[test]
    fn test_databuffer_observables() {
        let mut db = DataBuffer::new();
        assert!(db.is_finished());
        db.write_varint(300);
        db.write_string("hi");
        assert_eq!(db.size(), 5);
        db.read_varint().unwrap();
        assert!(!db.is_finished());
        db.read_string(16).unwrap();
        assert!(db.is_finished());
    }

    #[test]
    fn test_databuffer_underflow_does_not_panic() {
        let mut db = DataBuffer::new();
        db.write_u8(1);
        assert!(db.read_i64().is_err());
    }
}
