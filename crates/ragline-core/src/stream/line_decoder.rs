//! Incremental byte-to-line decoder
//!
//! Network reads split the body at arbitrary byte offsets, including in the
//! middle of a multi-byte UTF-8 character or in the middle of a line. The
//! decoder keeps both kinds of remainder and only ever hands out whole lines.

/// Buffered decoder that turns raw body chunks into `\n`-terminated lines
#[derive(Debug, Default)]
pub struct LineDecoder {
    /// Decoded text after the last emitted line terminator
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence
    incomplete_utf8: Vec<u8>,
}

impl LineDecoder {
    /// Create a new line decoder
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            incomplete_utf8: Vec::new(),
        }
    }

    /// Feed raw bytes and return every line completed by them.
    ///
    /// Lines are returned without their terminator; a trailing `\r` is
    /// stripped as well.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.incomplete_utf8.is_empty() {
            self.decode_into_buffer(chunk);
        } else {
            let mut combined = std::mem::take(&mut self.incomplete_utf8);
            combined.extend_from_slice(chunk);
            self.decode_into_buffer(&combined);
        }

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        lines
    }

    /// Signal end of stream.
    ///
    /// An unterminated tail can never form a valid frame, so it is dropped.
    /// Returns the number of bytes that were discarded.
    pub fn finish(&mut self) -> usize {
        let discarded = self.buffer.len() + self.incomplete_utf8.len();
        if discarded > 0 {
            tracing::debug!(
                "Discarding {} bytes of unterminated input at end of stream",
                discarded
            );
        }
        self.clear();
        discarded
    }

    /// Decode as much of `bytes` as possible, substituting U+FFFD for invalid
    /// sequences and keeping an incomplete trailing sequence for later.
    fn decode_into_buffer(&mut self, mut bytes: &[u8]) {
        loop {
            match std::str::from_utf8(bytes) {
                Ok(valid) => {
                    self.buffer.push_str(valid);
                    return;
                }
                Err(e) => {
                    let (valid, rest) = bytes.split_at(e.valid_up_to());
                    self.buffer
                        .push_str(std::str::from_utf8(valid).unwrap_or_default());

                    match e.error_len() {
                        Some(invalid_len) => {
                            tracing::warn!(
                                "Replacing {} invalid UTF-8 byte(s) in stream",
                                invalid_len
                            );
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            bytes = &rest[invalid_len..];
                        }
                        None => {
                            // The chunk ends inside a character.
                            self.incomplete_utf8 = rest.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Clear all buffered state
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.incomplete_utf8.clear();
    }

    /// Check if there's remaining data in the buffer
    pub fn has_remaining(&self) -> bool {
        !self.buffer.is_empty() || !self.incomplete_utf8.is_empty()
    }

    /// Get the buffered partial line (for debugging)
    pub fn remaining(&self) -> &str {
        &self.buffer
    }

    /// Get the number of incomplete UTF-8 bytes buffered
    pub fn incomplete_utf8_len(&self) -> usize {
        self.incomplete_utf8.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_lines() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.feed(b"data: one\ndata: two\n");
        assert_eq!(lines, vec!["data: one", "data: two"]);
        assert!(!decoder.has_remaining());
    }

    #[test]
    fn test_partial_line_is_retained() {
        let mut decoder = LineDecoder::new();
        assert!(decoder.feed(b"data: {\"ty").is_empty());
        assert_eq!(decoder.remaining(), "data: {\"ty");

        let lines = decoder.feed(b"pe\":\"chunk\"}\n");
        assert_eq!(lines, vec!["data: {\"type\":\"chunk\"}"]);
    }

    #[test]
    fn test_empty_lines_are_emitted() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.feed(b"data: a\n\ndata: b\n\n");
        assert_eq!(lines, vec!["data: a", "", "data: b", ""]);
    }

    #[test]
    fn test_crlf_terminators() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.feed(b"data: a\r\ndata: b\r\n");
        assert_eq!(lines, vec!["data: a", "data: b"]);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        // "é" = C3 A9, "中" = E4 B8 AD
        let mut decoder = LineDecoder::new();
        assert!(decoder.feed(b"caf\xC3").is_empty());
        assert_eq!(decoder.incomplete_utf8_len(), 1);
        assert!(decoder.feed(b"\xA9 \xE4\xB8").is_empty());
        assert_eq!(decoder.incomplete_utf8_len(), 2);
        let lines = decoder.feed(b"\xAD\n");
        assert_eq!(lines, vec!["café 中"]);
        assert_eq!(decoder.incomplete_utf8_len(), 0);
    }

    #[test]
    fn test_four_byte_char_fed_byte_by_byte() {
        let bytes = "🦀\n".as_bytes();
        let mut decoder = LineDecoder::new();
        let mut lines = Vec::new();
        for b in bytes {
            lines.extend(decoder.feed(std::slice::from_ref(b)));
        }
        assert_eq!(lines, vec!["🦀"]);
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.feed(b"ok\xFF\xFEok\n");
        assert_eq!(lines, vec!["ok\u{FFFD}\u{FFFD}ok"]);
    }

    #[test]
    fn test_finish_discards_tail() {
        let mut decoder = LineDecoder::new();
        decoder.feed(b"data: [DONE]\ndata: {\"type\":\"chunk\"");
        assert_eq!(decoder.finish(), "data: {\"type\":\"chunk\"".len());
        assert!(!decoder.has_remaining());
        assert_eq!(decoder.finish(), 0);
    }

    #[test]
    fn test_finish_discards_incomplete_utf8() {
        let mut decoder = LineDecoder::new();
        decoder.feed(b"\xE4\xB8");
        assert_eq!(decoder.finish(), 2);
    }
}
