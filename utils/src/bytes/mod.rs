use crate::traits::writer::WriteTo;
use std::fmt::{self, Write};

const HEX_DUMP_ROW_SIZE: usize = 16;

/// Parse hex text into bytes, ascii whitespace between digits is ignored.
pub fn hex_to_bytes(s: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if !digits.len().is_multiple_of(2) {
        return None;
    }
    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|sub| u8::from_str_radix(sub, 16).ok())
        })
        .collect()
}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // writing into a String never fails
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

pub fn writable_to_bytes<E, T: WriteTo<Vec<u8>, Error = E>>(writable: &T) -> Result<Vec<u8>, E> {
    let mut bytes = vec![];
    writable.write_to(&mut bytes)?;
    Ok(bytes)
}

/// Write `bytes` as rows of 16: `offset` in hex, the hex columns split in two
/// halves of 8, then the printable ascii column.
///
/// ```text
/// 00000000h: 01 02 03 04 05 06 07 00                          ; ........
/// ```
pub fn write_hex_dump<W: Write>(writer: &mut W, bytes: &[u8]) -> fmt::Result {
    for (row, chunk) in bytes.chunks(HEX_DUMP_ROW_SIZE).enumerate() {
        write!(writer, "{:08x}h: ", row * HEX_DUMP_ROW_SIZE)?;
        for column in 0..HEX_DUMP_ROW_SIZE {
            if column == HEX_DUMP_ROW_SIZE / 2 {
                writer.write_char(' ')?;
            }
            match chunk.get(column) {
                Some(b) => write!(writer, "{:02x} ", b)?,
                None => writer.write_str("   ")?,
            }
        }
        writer.write_str("; ")?;
        for b in chunk {
            let c = if b.is_ascii_graphic() || *b == b' ' {
                *b as char
            } else {
                '.'
            };
            writer.write_char(c)?;
        }
        writer.write_char('\n')?;
    }
    Ok(())
}
