/// Incremental UTF-8 decoding for chunked response bodies.
///
/// A network chunk may end in the middle of a multi-byte character. The
/// incomplete tail is held back and prepended to the next chunk instead of
/// being emitted as U+FFFD. Bytes that can never form a valid sequence are
/// replaced immediately.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = &bytes[..];
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let valid_len = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid_len]));
                    match e.error_len() {
                        Some(bad_len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid_len + bad_len..];
                        }
                        None => {
                            self.pending = rest[valid_len..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flushes whatever is still buffered once the stream has ended.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let tail = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&tail).into_owned()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"Hel"), "Hel");
        assert_eq!(decoder.decode(b"lo"), "lo");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn split_multibyte_character_is_buffered() {
        let bytes = "café • 日本".as_bytes();
        // "é" is two bytes at offset 3; split inside it.
        let (first, second) = bytes.split_at(4);
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(first), "caf");
        assert!(decoder.has_pending());
        assert_eq!(decoder.decode(second), "é • 日本");
        assert!(!decoder.has_pending());
    }

    #[test]
    fn every_split_point_reassembles() {
        let text = "naïve → 日本語 🚀 done";
        let bytes = text.as_bytes();
        for split in 0..=bytes.len() {
            let mut decoder = Utf8StreamDecoder::new();
            let mut out = decoder.decode(&bytes[..split]);
            out.push_str(&decoder.decode(&bytes[split..]));
            out.push_str(&decoder.finish());
            assert_eq!(out, text, "split at {}", split);
        }
    }

    #[test]
    fn byte_at_a_time() {
        let text = "🚀🚀";
        let mut decoder = Utf8StreamDecoder::new();
        let out: String = text
            .as_bytes()
            .iter()
            .map(|b| decoder.decode(std::slice::from_ref(b)))
            .collect();
        assert_eq!(out, text);
    }

    #[test]
    fn invalid_bytes_become_replacement() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"a\xffb"), "a\u{FFFD}b");
    }

    #[test]
    fn truncated_tail_is_flushed_on_finish() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(&[b'x', 0xE6, 0x97]), "x");
        assert_eq!(decoder.finish(), "\u{FFFD}");
        assert_eq!(decoder.finish(), "");
    }
}
