//! Wire protocol shared by the relay server and the terminal client.
//!
//! The protocol is a raw byte stream over plain TCP with no length prefix:
//!
//! 1. The client connects and sends one chunk holding its display name.
//! 2. The server answers with [`WELCOME`].
//! 3. Both sides then exchange text chunks of at most [`MAX_CHUNK_SIZE`] bytes.
//!
//! Every payload the server writes ends with [`LINE_TERMINATOR`], so a reader
//! can split payloads that the transport coalesced into one read.

/// Upper bound of a single read on either side.
pub const MAX_CHUNK_SIZE: usize = 2048;

/// Acknowledgement sent to a client once its display name is accepted.
pub const WELCOME: &str = "welcome";

/// Terminates every payload written by the server and every line typed by a user.
pub const LINE_TERMINATOR: char = '\n';

/// Decode a received chunk into text.
///
/// Invalid UTF-8 (for example a multi-byte character cut at a chunk boundary)
/// is replaced rather than rejected. Surrounding whitespace, including the
/// newline added by the sender's input routine, is trimmed.
pub fn decode_chunk(chunk: &[u8]) -> String {
    String::from_utf8_lossy(chunk).trim().to_string()
}

/// Append the line terminator to a payload.
pub fn frame_line(text: &str) -> String {
    let mut line = String::with_capacity(text.len() + 1);
    line.push_str(text);
    line.push(LINE_TERMINATOR);
    line
}

/// Reassembles newline-terminated payloads from arbitrary chunks.
///
/// Bytes are buffered raw and decoded one completed line at a time, so a
/// multi-byte character split across reads survives intact.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every line it completed, without terminators.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Take whatever is buffered without a terminator yet.
    pub fn take_partial(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            let rest = std::mem::take(&mut self.pending);
            Some(String::from_utf8_lossy(&rest).into_owned())
        }
    }
}
