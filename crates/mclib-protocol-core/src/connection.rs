use crate::codec::{read_varint, varint_len, write_varint};
use crate::error::{ConnectionError, FrameError};
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;
use bytes::{Buf, BytesMut};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read as _, Write as _};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::trace;

/// AES-128-CFB8, maintaining cipher state (the IV register) across calls so
/// a multi-byte payload can be fed in incrementally. Both directions share
/// this shape — CFB8 keystream generation is the same operation whichever
/// way the bytes are flowing, only which byte is XORed in (plaintext vs.
/// ciphertext) before the IV shift differs (§4.4).
struct Cfb8Cipher {
    cipher: Aes128,
    iv: [u8; 16],
}

impl Cfb8Cipher {
    fn new(key: &[u8; 16], iv: &[u8; 16]) -> Self {
        let cipher = Aes128::new(key.into());
        Self { cipher, iv: *iv }
    }

    fn encrypt(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            let mut block = aes::Block::from(self.iv);
            self.cipher.encrypt_block(&mut block);
            *byte ^= block[0];
            self.iv.copy_within(1.., 0);
            self.iv[15] = *byte;
        }
    }

    fn decrypt(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            let mut block = aes::Block::from(self.iv);
            self.cipher.encrypt_block(&mut block);
            let ciphertext = *byte;
            *byte ^= block[0];
            self.iv.copy_within(1.., 0);
            self.iv[15] = ciphertext;
        }
    }
}

/// A framed Minecraft protocol connection: owns the socket, the rolling
/// read buffer, and the mutable frame parameters (§3, §4.3, §4.6). Cipher
/// state transitions and compression-threshold changes only ever happen
/// between frames, never mid-frame.
pub struct Connection {
    stream: Option<TcpStream>,
    read_buf: BytesMut,
    compression_threshold: Option<i32>,
    encryptor: Option<Cfb8Cipher>,
    decryptor: Option<Cfb8Cipher>,
}

impl Connection {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream: Some(stream),
            read_buf: BytesMut::with_capacity(4096),
            compression_threshold: None,
            encryptor: None,
            decryptor: None,
        }
    }

    /// Create a dummy connection (used as a placeholder after `into_split`).
    pub fn new_dummy() -> Self {
        Self {
            stream: None,
            read_buf: BytesMut::new(),
            compression_threshold: None,
            encryptor: None,
            decryptor: None,
        }
    }

    /// Enable AES-CFB8 encryption with the given shared secret. Per the
    /// Notchian protocol, key == IV == shared secret for both the read and
    /// write registers, each then advancing independently (§4.6 step 3).
    pub fn enable_encryption(&mut self, shared_secret: &[u8]) {
        let key: [u8; 16] = shared_secret
            .try_into()
            .expect("shared secret must be 16 bytes");
        self.encryptor = Some(Cfb8Cipher::new(&key, &key));
        self.decryptor = Some(Cfb8Cipher::new(&key, &key));
    }

    /// Enable zlib compression above `threshold` bytes. A negative
    /// threshold disables compression again (§3: "`< 0` means no
    /// compression layer").
    pub fn enable_compression(&mut self, threshold: i32) {
        self.compression_threshold = if threshold < 0 { None } else { Some(threshold) };
    }

    pub fn compression_threshold(&self) -> Option<i32> {
        self.compression_threshold
    }

    pub fn is_encrypted(&self) -> bool {
        self.encryptor.is_some()
    }

    /// Read a single packet frame, returning `(packet_id, payload)`.
    pub async fn read_packet(&mut self) -> Result<(i32, BytesMut), ConnectionError> {
        loop {
            if let Some(result) = try_parse_packet(&mut self.read_buf, self.compression_threshold)?
            {
                return Ok(result);
            }
            let stream = self
                .stream
                .as_mut()
                .ok_or(ConnectionError::Frame(FrameError::ConnectionClosed))?;
            let mut tmp = [0u8; 4096];
            let n = stream.read(&mut tmp).await?;
            if n == 0 {
                return Err(FrameError::ConnectionClosed.into());
            }
            let data = &mut tmp[..n];
            if let Some(ref mut decryptor) = self.decryptor {
                decryptor.decrypt(data);
            }
            self.read_buf.extend_from_slice(data);
        }
    }

    /// Write a packet with the given id and payload.
    pub async fn write_packet(&mut self, packet_id: i32, payload: &[u8]) -> Result<(), ConnectionError> {
        let frame = build_frame(
            packet_id,
            payload,
            self.compression_threshold,
            &mut self.encryptor,
        );
        let stream = self
            .stream
            .as_mut()
            .ok_or(ConnectionError::Frame(FrameError::ConnectionClosed))?;
        stream.write_all(&frame).await?;
        Ok(())
    }

    pub fn peer_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.stream
            .as_ref()
            .map(|s| s.peer_addr())
            .unwrap_or(Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "dummy connection",
            )))
    }

    /// Split the connection into read and write halves for concurrent I/O.
    /// Compression and encryption state is transferred to each half.
    pub fn into_split(mut self) -> (ConnectionReader, ConnectionWriter) {
        let stream = self.stream.take().expect("cannot split a dummy connection");
        let (read_half, write_half) = stream.into_split();
        (
            ConnectionReader {
                stream: read_half,
                read_buf: self.read_buf,
                compression_threshold: self.compression_threshold,
                decryptor: self.decryptor,
            },
            ConnectionWriter {
                stream: write_half,
                compression_threshold: self.compression_threshold,
                encryptor: self.encryptor,
            },
        )
    }
}

/// Read half of a split connection.
pub struct ConnectionReader {
    stream: OwnedReadHalf,
    read_buf: BytesMut,
    compression_threshold: Option<i32>,
    decryptor: Option<Cfb8Cipher>,
}

impl ConnectionReader {
    pub async fn read_packet(&mut self) -> Result<(i32, BytesMut), ConnectionError> {
        loop {
            if let Some(result) =
                try_parse_packet(&mut self.read_buf, self.compression_threshold)?
            {
                return Ok(result);
            }
            let mut tmp = [0u8; 4096];
            let n = self.stream.read(&mut tmp).await?;
            if n == 0 {
                return Err(FrameError::ConnectionClosed.into());
            }
            let data = &mut tmp[..n];
            if let Some(ref mut decryptor) = self.decryptor {
                decryptor.decrypt(data);
            }
            self.read_buf.extend_from_slice(data);
        }
    }
}

/// Write half of a split connection.
pub struct ConnectionWriter {
    stream: OwnedWriteHalf,
    compression_threshold: Option<i32>,
    encryptor: Option<Cfb8Cipher>,
}

impl ConnectionWriter {
    pub async fn write_packet(&mut self, packet_id: i32, payload: &[u8]) -> Result<(), ConnectionError> {
        let frame = build_frame(
            packet_id,
            payload,
            self.compression_threshold,
            &mut self.encryptor,
        );
        self.stream.write_all(&frame).await?;
        Ok(())
    }
}

// === Shared helpers ===

fn try_parse_packet(
    read_buf: &mut BytesMut,
    compression_threshold: Option<i32>,
) -> Result<Option<(i32, BytesMut)>, FrameError> {
    if read_buf.is_empty() {
        return Ok(None);
    }

    let mut peek = read_buf.clone();
    let length = match read_varint(&mut peek) {
        Ok(len) => len as usize,
        Err(_) => return Ok(None),
    };

    let varint_bytes = read_buf.len() - peek.len();

    if peek.remaining() < length {
        return Ok(None);
    }

    read_buf.advance(varint_bytes);
    let mut packet_data = read_buf.split_to(length);

    if compression_threshold.is_some() {
        let data_length = read_varint(&mut packet_data)? as usize;
        if data_length > 0 {
            let mut decompressed = vec![0u8; data_length];
            let mut decoder = ZlibDecoder::new(&packet_data[..]);
            decoder.read_exact(&mut decompressed)?;
            if decoder.total_out() != data_length as u64 {
                return Err(FrameError::DecompressionMismatch {
                    expected: data_length,
                    actual: decoder.total_out() as usize,
                });
            }
            packet_data = BytesMut::from(&decompressed[..]);
        }
    }

    let packet_id = read_varint(&mut packet_data)?;
    trace!(
        "read packet id=0x{:02X} len={}",
        packet_id,
        packet_data.len()
    );

    Ok(Some((packet_id, packet_data)))
}

fn build_frame(
    packet_id: i32,
    payload: &[u8],
    compression_threshold: Option<i32>,
    encryptor: &mut Option<Cfb8Cipher>,
) -> BytesMut {
    let mut packet_buf = BytesMut::new();
    write_varint(&mut packet_buf, packet_id);
    packet_buf.extend_from_slice(payload);

    let mut frame = BytesMut::new();

    if let Some(threshold) = compression_threshold {
        let uncompressed_len = packet_buf.len() as i32;
        if uncompressed_len >= threshold {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            let _ = encoder.write_all(&packet_buf);
            let compressed = encoder.finish().unwrap_or_default();

            let data_length_size = varint_len(uncompressed_len);
            let total_length = data_length_size + compressed.len();
            write_varint(&mut frame, total_length as i32);
            write_varint(&mut frame, uncompressed_len);
            frame.extend_from_slice(&compressed);
        } else {
            let total_length = 1 + packet_buf.len();
            write_varint(&mut frame, total_length as i32);
            write_varint(&mut frame, 0);
            frame.extend_from_slice(&packet_buf);
        }
    } else {
        write_varint(&mut frame, packet_buf.len() as i32);
        frame.extend_from_slice(&packet_buf);
    }

    if let Some(ref mut enc) = encryptor {
        enc.encrypt(&mut frame);
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncompressed_frame_matches_spec_example() {
        let frame = build_frame(0x00, &[], None, &mut None);
        assert_eq!(frame.to_vec(), vec![0x01, 0x00]);
    }

    #[test]
    fn test_frame_roundtrip_no_compression() {
        let frame = build_frame(0x05, b"hello", None, &mut None);
        let mut buf = BytesMut::from(&frame[..]);
        let (id, payload) = try_parse_packet(&mut buf, None).unwrap().unwrap();
        assert_eq!(id, 0x05);
        assert_eq!(&payload[..], b"hello");
    }

    #[test]
    fn test_frame_roundtrip_under_threshold_not_compressed() {
        let frame = build_frame(0x01, &[0u8; 50], Some(256), &mut None);
        let mut buf = BytesMut::from(&frame[..]);
        let (id, payload) = try_parse_packet(&mut buf, Some(256)).unwrap().unwrap();
        assert_eq!(id, 0x01);
        assert_eq!(payload.len(), 50);
    }

    #[test]
    fn test_frame_roundtrip_over_threshold_compressed() {
        let big_payload = vec![7u8; 400];
        let frame = build_frame(0x02, &big_payload, Some(64), &mut None);
        let mut buf = BytesMut::from(&frame[..]);
        let (id, payload) = try_parse_packet(&mut buf, Some(64)).unwrap().unwrap();
        assert_eq!(id, 0x02);
        assert_eq!(payload.len(), 400);
        assert!(payload.iter().all(|&b| b == 7));
    }

    #[test]
    fn test_negative_threshold_disables_compression() {
        let mut conn = Connection::new_dummy();
        conn.enable_compression(-1);
        assert_eq!(conn.compression_threshold(), None);
        conn.enable_compression(256);
        assert_eq!(conn.compression_threshold(), Some(256));
    }

    #[test]
    fn test_cfb8_is_self_inverse() {
        let key = [1u8; 16];
        let mut enc = Cfb8Cipher::new(&key, &key);
        let mut dec = Cfb8Cipher::new(&key, &key);
        let mut data = b"encrypt me please".to_vec();
        let original = data.clone();
        enc.encrypt(&mut data);
        assert_ne!(data, original);
        dec.decrypt(&mut data);
        assert_eq!(data, original);
    }
}
