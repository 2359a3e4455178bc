use std::fmt;
use std::str::FromStr;

/// Single-byte legacy code pages used for client data files.
///
/// Every byte maps to exactly one `char` and back, so a decode followed by an
/// encode reproduces the input bytes exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Codepage {
    /// IBM PC / OEM United States.
    #[default]
    Cp437,
    /// ISO-8859-1, where every byte is the code point of the same value.
    Latin1,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown codepage '{0}' (expected 437 or latin1)")]
pub struct UnknownCodepage(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("character {ch:?} at offset {offset} has no {codepage} encoding")]
pub struct EncodeError {
    pub ch: char,
    pub offset: usize,
    pub codepage: Codepage,
}

const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', //
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', //
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', //
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', //
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', //
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', //
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', //
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

impl Codepage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Cp437 => "cp437",
            Self::Latin1 => "latin1",
        }
    }

    pub fn decode_byte(self, byte: u8) -> char {
        match self {
            Self::Cp437 if byte >= 0x80 => CP437_HIGH[usize::from(byte - 0x80)],
            _ => char::from(byte),
        }
    }

    pub fn encode_char(self, ch: char) -> Option<u8> {
        if ch.is_ascii() {
            return u8::try_from(ch).ok();
        }
        match self {
            Self::Cp437 => CP437_HIGH
                .iter()
                .position(|&c| c == ch)
                .and_then(|i| u8::try_from(i + 0x80).ok()),
            Self::Latin1 => u8::try_from(ch).ok(),
        }
    }

    pub fn decode(self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.decode_byte(b)).collect()
    }

    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(text.len());
        for (offset, ch) in text.char_indices() {
            let byte = self.encode_char(ch).ok_or(EncodeError {
                ch,
                offset,
                codepage: self,
            })?;
            out.push(byte);
        }
        Ok(out)
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codepage {
    type Err = UnknownCodepage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "437" | "cp437" | "ibm437" => Ok(Self::Cp437),
            "latin1" | "latin-1" | "iso-8859-1" | "28591" => Ok(Self::Latin1),
            _ => Err(UnknownCodepage(s.to_string())),
        }
    }
}
