use encoding_rs::{Decoder, DecoderResult, UTF_8};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    /// `decoded` holds the text that preceded the bad sequence in the same
    /// call.
    #[error("invalid {encoding} sequence after {offset} bytes")]
    Malformed {
        encoding: String,
        offset: u64,
        decoded: String,
    },
}

impl DecodeError {
    /// Text decoded before the failure.
    pub fn into_decoded(self) -> String {
        match self {
            DecodeError::Malformed { decoded, .. } => decoded,
        }
    }
}

/// Stateful UTF-8 decoder for job output.
///
/// Bytes of a character split across chunks are held back until the rest
/// arrives, so feeding chunks one by one yields the same text as decoding the
/// concatenation at once.
pub struct StreamDecoder {
    decoder: Decoder,
    consumed: u64,
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self {
            decoder: UTF_8.new_decoder_with_bom_removal(),
            consumed: 0,
        }
    }

    /// Decodes one chunk. May return an empty string if the chunk only held
    /// the start of a character.
    pub fn push(&mut self, chunk: &[u8]) -> Result<String, DecodeError> {
        self.decode(chunk, false)
    }

    /// Flushes the decoder at end of stream; a dangling partial character is
    /// an error.
    pub fn finish(&mut self) -> Result<String, DecodeError> {
        self.decode(&[], true)
    }

    fn decode(&mut self, mut src: &[u8], last: bool) -> Result<String, DecodeError> {
        let mut out = String::new();
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length_without_replacement(src.len())
                .unwrap_or(src.len() * 3 + 4);
            out.reserve(needed);
            let (result, read) = self
                .decoder
                .decode_to_string_without_replacement(src, &mut out, last);
            self.consumed += read as u64;
            src = &src[read..];
            match result {
                DecoderResult::InputEmpty => return Ok(out),
                DecoderResult::OutputFull => continue,
                DecoderResult::Malformed(_, _) => {
                    return Err(DecodeError::Malformed {
                        encoding: UTF_8.name().to_string(),
                        offset: self.consumed,
                        decoded: out,
                    })
                }
            }
        }
    }
}
