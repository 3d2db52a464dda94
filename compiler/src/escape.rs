//! Escaping of arbitrary bytes into the body of a C string literal.

use serde::{Deserialize, Serialize};

use crate::error::CodegenError;

/// How bytes without a short escape are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeStyle {
    /// `\xHH`. A C compiler keeps reading hex digits after `\x`, so a raw hex
    /// digit right after one of these is escaped as well.
    #[default]
    Hex,
    /// `\OOO`. Octal escapes stop after three digits and never need that.
    Octal,
}

/// Worst case output size for `len` input bytes, including the NUL.
pub fn max_escaped_len(len: usize) -> usize {
    len * 4 + 1
}

fn is_print(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

/// Escapes `src` into `dest` and NUL-terminates it. Returns the number of
/// bytes written, not counting the terminator.
pub fn escape_into(src: &[u8], dest: &mut [u8], style: EscapeStyle) -> Result<usize, CodegenError> {
    let available = dest.len();
    let capacity = |needed: usize| CodegenError::Capacity { needed, available };
    let mut used = 0;
    let mut last_hex_escape = false;

    for &b in src {
        if available - used < 2 {
            return Err(capacity(max_escaped_len(src.len())));
        }

        let mut is_hex_escape = false;
        let short = match b {
            b'\n' => Some(b'n'),
            b'\r' => Some(b'r'),
            b'\t' => Some(b't'),
            b'"'  => Some(b'"'),
            b'\'' => Some(b'\''),
            b'\\' => Some(b'\\'),
            _ => None,
        };

        match short {
            Some(letter) => {
                dest[used] = b'\\';
                dest[used + 1] = letter;
                used += 2;
            }
            None if !is_print(b) || (last_hex_escape && b.is_ascii_hexdigit()) => {
                if available - used < 4 {
                    return Err(capacity(max_escaped_len(src.len())));
                }
                let unit = match style {
                    EscapeStyle::Hex => format!("\\x{:02x}", b),
                    EscapeStyle::Octal => format!("\\{:03o}", b),
                };
                dest[used..used + 4].copy_from_slice(unit.as_bytes());
                is_hex_escape = style == EscapeStyle::Hex;
                used += 4;
            }
            None => {
                dest[used] = b;
                used += 1;
            }
        }
        last_hex_escape = is_hex_escape;
    }

    if available - used < 1 {
        return Err(capacity(used + 1));
    }
    dest[used] = 0;
    Ok(used)
}

/// Escapes `src` with `\xHH` escapes.
pub fn escape_bytes(src: &[u8]) -> String {
    escape_bytes_with(src, EscapeStyle::Hex)
}

pub fn escape_bytes_with(src: &[u8], style: EscapeStyle) -> String {
    let mut dest = vec![0u8; max_escaped_len(src.len())];
    let len = match escape_into(src, &mut dest, style) {
        Ok(len) => len,
        Err(err) => panic!("escape buffer sized for the worst case overflowed: {}", err),
    };
    dest.truncate(len);
    // Every emitted unit is printable ASCII.
    dest.into_iter().map(char::from).collect()
}
