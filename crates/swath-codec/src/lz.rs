//! A dictionary (LZW-family) compressor between 16-bit symbol streams and
//! printable strings.
//!
//! Output is packed 15 bits per char, each offset by 32, so every char is
//! printable and below the surrogate range. Codes start at 2 bits wide and
//! widen as the dictionary grows. Codes 0 and 1 introduce an 8-bit or
//! 16-bit literal symbol, and code 2 ends the stream.

use std::collections::{HashMap, HashSet};

use crate::error::CodecError;

const BITS_PER_CHAR: u32 = 15;
const CHAR_OFFSET: u32 = 32;
/// Highest bit of a packed char, where reading starts.
const RESET_VALUE: u32 = 1 << (BITS_PER_CHAR - 1);

const LITERAL_8: u32 = 0;
const LITERAL_16: u32 = 1;
const END: u32 = 2;

// ── Compression ─────────────────────────────────────────────────

struct BitWriter {
    out: String,
    value: u32,
    position: u32,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            value: 0,
            position: 0,
        }
    }

    fn push_char(&mut self) {
        // Values are below 2^15, so the offset char is never a surrogate.
        if let Some(c) = char::from_u32(self.value + CHAR_OFFSET) {
            self.out.push(c);
        }
        self.value = 0;
        self.position = 0;
    }

    /// Write the low `bits` bits of `code`, least significant first.
    fn write(&mut self, mut code: u32, bits: u32) {
        for _ in 0..bits {
            self.value = (self.value << 1) | (code & 1);
            if self.position == BITS_PER_CHAR - 1 {
                self.push_char();
            } else {
                self.position += 1;
            }
            code >>= 1;
        }
    }

    fn finish(mut self) -> String {
        loop {
            self.value <<= 1;
            if self.position == BITS_PER_CHAR - 1 {
                self.push_char();
                break;
            }
            self.position += 1;
        }
        self.out
    }
}

/// The phrase being extended: its code, and the symbol itself when the
/// phrase is a single symbol.
#[derive(Clone, Copy)]
struct Phrase {
    code: u32,
    single: Option<u16>,
}

struct Encoder {
    writer: BitWriter,
    symbols: HashMap<u16, u32>,
    phrases: HashMap<(u32, u16), u32>,
    pending_literals: HashSet<u16>,
    dict_size: u32,
    num_bits: u32,
    enlarge_in: u32,
}

impl Encoder {
    fn new() -> Self {
        Self {
            writer: BitWriter::new(),
            symbols: HashMap::new(),
            phrases: HashMap::new(),
            pending_literals: HashSet::new(),
            dict_size: 3,
            num_bits: 2,
            enlarge_in: 2,
        }
    }

    fn count_code(&mut self) {
        self.enlarge_in -= 1;
        if self.enlarge_in == 0 {
            self.enlarge_in = 1 << self.num_bits;
            self.num_bits += 1;
        }
    }

    fn emit(&mut self, phrase: Phrase) {
        match phrase.single.filter(|s| self.pending_literals.contains(s)) {
            Some(symbol) => {
                if symbol < 256 {
                    self.writer.write(LITERAL_8, self.num_bits);
                    self.writer.write(u32::from(symbol), 8);
                } else {
                    self.writer.write(LITERAL_16, self.num_bits);
                    self.writer.write(u32::from(symbol), 16);
                }
                self.count_code();
                self.pending_literals.remove(&symbol);
            }
            None => self.writer.write(phrase.code, self.num_bits),
        }
        self.count_code();
    }

    fn single(&mut self, symbol: u16) -> Phrase {
        let code = match self.symbols.get(&symbol) {
            Some(&code) => code,
            None => {
                let code = self.dict_size;
                self.symbols.insert(symbol, code);
                self.pending_literals.insert(symbol);
                self.dict_size += 1;
                code
            }
        };
        Phrase {
            code,
            single: Some(symbol),
        }
    }
}

/// Compress a symbol stream into a printable string.
pub fn compress(input: &[u16]) -> String {
    let mut enc = Encoder::new();
    let mut current: Option<Phrase> = None;
    for &symbol in input {
        let next = enc.single(symbol);
        current = Some(match current {
            None => next,
            Some(phrase) => match enc.phrases.get(&(phrase.code, symbol)) {
                Some(&code) => Phrase { code, single: None },
                None => {
                    enc.emit(phrase);
                    enc.phrases.insert((phrase.code, symbol), enc.dict_size);
                    enc.dict_size += 1;
                    next
                }
            },
        });
    }
    if let Some(phrase) = current {
        enc.emit(phrase);
    }
    let bits = enc.num_bits;
    enc.writer.write(END, bits);
    enc.writer.finish()
}

// ── Decompression ───────────────────────────────────────────────

struct BitReader {
    values: Vec<u32>,
    index: usize,
    value: Option<u32>,
    position: u32,
}

impl BitReader {
    fn new(input: &str) -> Result<Self, CodecError> {
        let values = input
            .chars()
            .map(|c| {
                (c as u32)
                    .checked_sub(CHAR_OFFSET)
                    .filter(|&v| v < 1 << BITS_PER_CHAR)
                    .ok_or_else(|| CodecError::Corrupt {
                        reason: format!("char {c:?} outside the packed range"),
                    })
            })
            .collect::<Result<Vec<u32>, _>>()?;
        let value = values.first().copied();
        Ok(Self {
            values,
            index: 1,
            value,
            position: RESET_VALUE,
        })
    }

    /// Read `bits` bits, least significant first.
    fn read(&mut self, bits: u32) -> Result<u32, CodecError> {
        let mut out = 0;
        for i in 0..bits {
            let value = self.value.ok_or(CodecError::Truncated)?;
            if value & self.position != 0 {
                out |= 1 << i;
            }
            self.position >>= 1;
            if self.position == 0 {
                self.position = RESET_VALUE;
                self.value = self.values.get(self.index).copied();
                self.index += 1;
            }
        }
        Ok(out)
    }
}

/// Inverse of [`compress`].
///
/// # Errors
///
/// [`CodecError::Truncated`] if the input stops before the end code, and
/// [`CodecError::Corrupt`] for chars outside the packed range or codes
/// that refer to dictionary entries that do not exist yet.
pub fn decompress(input: &str) -> Result<Vec<u16>, CodecError> {
    if input.is_empty() {
        return Err(CodecError::Truncated);
    }
    let mut reader = BitReader::new(input)?;
    // Codes 0..=2 are control codes and never looked up.
    let mut dictionary: Vec<Vec<u16>> = vec![Vec::new(); 3];
    let mut num_bits = 3;
    let mut enlarge_in: u32 = 4;

    let first = match reader.read(2)? {
        LITERAL_8 => reader.read(8)? as u16,
        LITERAL_16 => reader.read(16)? as u16,
        END => return Ok(Vec::new()),
        other => {
            return Err(CodecError::Corrupt {
                reason: format!("stream opens with code {other}"),
            })
        }
    };
    dictionary.push(vec![first]);
    let mut previous = vec![first];
    let mut out = vec![first];

    loop {
        let mut code = reader.read(num_bits)? as usize;
        match code as u32 {
            LITERAL_8 | LITERAL_16 => {
                let width = if code as u32 == LITERAL_8 { 8 } else { 16 };
                let symbol = reader.read(width)? as u16;
                dictionary.push(vec![symbol]);
                code = dictionary.len() - 1;
                enlarge_in -= 1;
            }
            END => return Ok(out),
            _ => {}
        }
        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }

        let entry = if code < dictionary.len() {
            dictionary[code].clone()
        } else if code == dictionary.len() {
            let mut e = previous.clone();
            e.push(previous[0]);
            e
        } else {
            return Err(CodecError::Corrupt {
                reason: format!("code {code} past dictionary size {}", dictionary.len()),
            });
        };
        out.extend_from_slice(&entry);

        let mut grown = previous;
        grown.push(entry[0]);
        dictionary.push(grown);
        enlarge_in -= 1;
        previous = entry;

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }
        if num_bits > 31 {
            return Err(CodecError::Corrupt {
                reason: "dictionary grew past 31-bit codes".into(),
            });
        }
    }
}
