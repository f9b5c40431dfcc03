//! Line-based codec for tokio.
//!
//! Reads newline-terminated lines with the terminator stripped and writes
//! lines terminated with CRLF. Inbound framing never fails on content: bytes
//! that are not UTF-8 are replaced, and oversized lines are skipped up to
//! their terminator.

use bytes::{Buf, BytesMut};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

/// Default inbound line limit. Tagged Twitch lines run well past the classic
/// 512 byte IRC limit.
pub const DEFAULT_MAX_LINE_LEN: usize = 8191;

/// Framing errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Codec for the chat connection.
pub struct ChatCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    max_len: usize,
    /// Set while skipping the rest of an oversized line.
    discarding: bool,
}

impl ChatCodec {
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// Cut an outgoing line at its first line break so one write is one line.
    fn sanitize(line: &str) -> &str {
        match line.find(['\r', '\n']) {
            Some(pos) => &line[..pos],
            None => line,
        }
    }
}

impl Default for ChatCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ChatCodec {
    type Item = String;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, CodecError> {
        loop {
            let newline = src[self.next_index..]
                .iter()
                .position(|b| *b == b'\n')
                .map(|offset| self.next_index + offset);

            match (self.discarding, newline) {
                (true, Some(pos)) => {
                    src.advance(pos + 1);
                    self.next_index = 0;
                    self.discarding = false;
                }
                (true, None) => {
                    src.clear();
                    self.next_index = 0;
                    return Ok(None);
                }
                (false, Some(pos)) => {
                    let line = src.split_to(pos + 1);
                    self.next_index = 0;

                    if line.len() > self.max_len {
                        warn!(len = line.len(), limit = self.max_len, "Skipping oversized line");
                        continue;
                    }

                    let mut end = line.len() - 1;
                    if end > 0 && line[end - 1] == b'\r' {
                        end -= 1;
                    }

                    return Ok(Some(String::from_utf8_lossy(&line[..end]).into_owned()));
                }
                (false, None) if src.len() > self.max_len => {
                    warn!(len = src.len(), limit = self.max_len, "Skipping oversized line");
                    self.discarding = true;
                }
                (false, None) => {
                    self.next_index = src.len();
                    return Ok(None);
                }
            }
        }
    }
}

impl Encoder<String> for ChatCodec {
    type Error = CodecError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), CodecError> {
        let line = Self::sanitize(&line);
        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}
