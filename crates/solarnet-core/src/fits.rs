//! # Minimal FITS Header I/O
//!
//! Reads the header of every HDU in a FITS file, and writes header-only
//! HDUs for tests and tooling. This is deliberately not a general FITS
//! library: data units are sized (from `BITPIX`/`NAXIS*`/`PCOUNT`/`GCOUNT`)
//! and skipped, never decoded.
//!
//! FITS layout:
//! - 2880-byte blocks.
//! - Headers are 80-character cards, terminated by an `END` card and
//!   padded with spaces to a block boundary.
//! - Card syntax: keyword in columns 1-8, value indicator `= ` in columns
//!   9-10, then value, `/`, and an inline comment.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::SolarnetError;
use crate::header::{Card, Header};
use crate::value::render_card_value;

/// One card is a fixed-width 80-character record.
pub const CARD_SIZE: usize = 80;
/// Headers and data units are padded to 2880-byte blocks.
pub const BLOCK_SIZE: usize = 2880;
/// Cards per block.
pub const CARDS_PER_BLOCK: usize = BLOCK_SIZE / CARD_SIZE;

/// Read the header of every HDU in the file, in order. The first header
/// is the primary header.
///
/// # Errors
///
/// Fails with `SolarnetError::Io` if the file cannot be opened and with
/// `SolarnetError::Parse` if it is not a structurally valid FITS file
/// (truncated block, missing `END`, no header at all).
pub fn read_headers(path: &Path) -> Result<Vec<Header>, SolarnetError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut headers = Vec::new();
    while let Some(header) = read_header_unit(&mut reader, path)? {
        skip_data_unit(&mut reader, &header, path)?;
        headers.push(header);
    }
    if headers.is_empty() {
        return Err(parse_error(path, "file contains no FITS header"));
    }
    Ok(headers)
}

/// Write each header as a header-only HDU (no data units are emitted).
pub fn write_headers(path: &Path, headers: &[Header]) -> Result<(), SolarnetError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for header in headers {
        write_header_unit(&mut writer, header)?;
    }
    writer.flush()?;
    Ok(())
}

enum BlockRead {
    Full,
    Eof,
    Short,
}

fn fill_block<R: Read>(reader: &mut R, block: &mut [u8]) -> Result<BlockRead, SolarnetError> {
    let mut filled = 0;
    while filled < block.len() {
        let n = reader.read(&mut block[filled..])?;
        if n == 0 {
            return Ok(if filled == 0 {
                BlockRead::Eof
            } else {
                BlockRead::Short
            });
        }
        filled += n;
    }
    Ok(BlockRead::Full)
}

/// Read one header: cards until `END`, consuming whole blocks. Returns
/// `None` on a clean end-of-file at a block boundary.
fn read_header_unit<R: Read>(
    reader: &mut R,
    path: &Path,
) -> Result<Option<Header>, SolarnetError> {
    let mut header = Header::new();
    let mut block = [0u8; BLOCK_SIZE];
    let mut read_any = false;
    loop {
        match fill_block(reader, &mut block)? {
            BlockRead::Full => {}
            BlockRead::Eof if !read_any => return Ok(None),
            BlockRead::Eof => {
                return Err(parse_error(path, "unexpected end of file inside header"))
            }
            BlockRead::Short => return Err(parse_error(path, "truncated header block")),
        }
        read_any = true;
        for chunk in block.chunks(CARD_SIZE) {
            let keyword = String::from_utf8_lossy(&chunk[..8]).trim().to_string();
            if keyword == "END" {
                return Ok(Some(header));
            }
            if keyword.is_empty() {
                continue;
            }
            let rest = String::from_utf8_lossy(&chunk[8..]).into_owned();
            parse_card(&keyword, &rest, &mut header);
        }
    }
}

fn parse_card(keyword: &str, rest: &str, header: &mut Header) {
    // COMMENT and HISTORY cards carry free text, no value indicator.
    if keyword == "COMMENT" || keyword == "HISTORY" {
        header.set(keyword, rest.trim(), None);
        return;
    }
    if let Some(body) = rest.strip_prefix("= ") {
        let (value, comment) = parse_value_and_comment(body);
        header.push(Card {
            keyword: keyword.to_string(),
            value,
            comment,
        });
    } else {
        // Keyword without a value indicator: keep it as a valueless card.
        header.set(keyword, Value::Null, None);
    }
}

fn parse_value_and_comment(body: &str) -> (Value, Value) {
    let trimmed = body.trim_start();
    if trimmed.starts_with('\'') {
        let (text, remainder) = parse_quoted(trimmed);
        let comment = remainder
            .find('/')
            .map(|i| Value::String(remainder[i + 1..].trim().to_string()))
            .unwrap_or(Value::Null);
        return (Value::String(text), comment);
    }
    let (value_part, comment) = match trimmed.find('/') {
        Some(i) => (
            trimmed[..i].trim(),
            Value::String(trimmed[i + 1..].trim().to_string()),
        ),
        None => (trimmed.trim(), Value::Null),
    };
    (parse_scalar(value_part), comment)
}

/// Parse a quoted FITS string, where `''` is an escaped single quote.
/// Returns the text and the remainder after the closing quote.
fn parse_quoted(s: &str) -> (String, &str) {
    let bytes = s.as_bytes();
    let mut out = String::new();
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if i + 1 < bytes.len() && bytes[i + 1] == b'\'' {
                out.push('\'');
                i += 2;
            } else {
                i += 1;
                break;
            }
        } else {
            out.push(bytes[i] as char);
            i += 1;
        }
    }
    // FITS pads string values with trailing spaces inside the quotes.
    (out.trim_end().to_string(), &s[i..])
}

fn parse_scalar(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if s == "T" {
        return Value::Bool(true);
    }
    if s == "F" {
        return Value::Bool(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::from(i);
    }
    // FITS real values may use a Fortran 'D' exponent.
    if let Ok(f) = s.replace(['D', 'd'], "E").parse::<f64>() {
        return Value::from(f);
    }
    Value::String(s.to_string())
}

/// Size in bytes of the data unit following `header`, before padding.
fn data_size_bytes(header: &Header) -> u64 {
    let bitpix = header.get_int("BITPIX").unwrap_or(0).unsigned_abs();
    let naxis = header.get_int("NAXIS").unwrap_or(0);
    if bitpix == 0 || naxis <= 0 {
        return 0;
    }
    let mut elements: u64 = 1;
    for i in 1..=naxis {
        let n = header.get_int(&format!("NAXIS{i}")).unwrap_or(0).max(0) as u64;
        elements = elements.saturating_mul(n);
    }
    let pcount = header.get_int("PCOUNT").unwrap_or(0).max(0) as u64;
    let gcount = header.get_int("GCOUNT").unwrap_or(1).max(1) as u64;
    gcount
        .saturating_mul(pcount.saturating_add(elements))
        .saturating_mul(bitpix / 8)
}

fn skip_data_unit<R: Read>(
    reader: &mut R,
    header: &Header,
    path: &Path,
) -> Result<(), SolarnetError> {
    let size = data_size_bytes(header);
    if size == 0 {
        return Ok(());
    }
    let padded = size.div_ceil(BLOCK_SIZE as u64) * BLOCK_SIZE as u64;
    let copied = std::io::copy(&mut reader.by_ref().take(padded), &mut std::io::sink())?;
    if copied < padded {
        return Err(parse_error(path, "truncated data unit"));
    }
    Ok(())
}

fn write_header_unit<W: Write>(writer: &mut W, header: &Header) -> Result<(), SolarnetError> {
    let mut cards_written = 0;
    for card in header {
        writer.write_all(render_card_line(card).as_bytes())?;
        cards_written += 1;
    }
    writer.write_all(format!("{:<CARD_SIZE$}", "END").as_bytes())?;
    cards_written += 1;
    let rem = cards_written % CARDS_PER_BLOCK;
    if rem != 0 {
        let pad = [b' '; CARD_SIZE];
        for _ in rem..CARDS_PER_BLOCK {
            writer.write_all(&pad)?;
        }
    }
    Ok(())
}

fn render_card_line(card: &Card) -> String {
    let mut line = if card.keyword == "COMMENT" || card.keyword == "HISTORY" {
        format!(
            "{:<8}{}",
            card.keyword,
            crate::value::display_value(&card.value)
        )
    } else {
        let value_text = match &card.value {
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            other => render_card_value(other).unwrap_or_default(),
        };
        let mut line = format!("{:<8}= {}", card.keyword, value_text);
        if let Value::String(comment) = &card.comment {
            line.push_str(" / ");
            line.push_str(comment);
        }
        line
    };
    truncate_at_boundary(&mut line, CARD_SIZE);
    format!("{line:<CARD_SIZE$}")
}

fn truncate_at_boundary(line: &mut String, max: usize) {
    if line.len() > max {
        let mut end = max;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        line.truncate(end);
    }
}

fn parse_error(path: &Path, reason: &str) -> SolarnetError {
    SolarnetError::Parse {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn primary_header() -> Header {
        let mut h = Header::new();
        h.set("SIMPLE", true, Some("conforms to FITS standard"));
        h.set("BITPIX", 8, Some("array data type"));
        h.set("NAXIS", 0, Some("number of array dimensions"));
        h.set("AUTHOR", "J. Doe", Some("Author of the data"));
        h
    }

    #[test]
    fn test_round_trip_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("single.fits");
        write_headers(&path, &[primary_header()]).unwrap();

        let headers = read_headers(&path).unwrap();
        assert_eq!(headers.len(), 1);
        let h = &headers[0];
        assert_eq!(h.get("SIMPLE"), Some(&json!(true)));
        assert_eq!(h.get("BITPIX"), Some(&json!(8)));
        assert_eq!(h.get("AUTHOR"), Some(&json!("J. Doe")));
        let author = h.cards().iter().find(|c| c.keyword == "AUTHOR").unwrap();
        assert_eq!(author.comment, json!("Author of the data"));
    }

    #[test]
    fn test_round_trip_multiple_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multi.fits");

        let mut ext = Header::new();
        ext.set("XTENSION", "IMAGE", Some("Image extension"));
        ext.set("OBS_HDU", 1, Some("Observation HDU flag"));
        ext.set("WAVELNTH", 530.3, Some("Characteristic wavelength"));
        write_headers(&path, &[primary_header(), ext]).unwrap();

        let headers = read_headers(&path).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].get_int("OBS_HDU"), Some(1));
        assert_eq!(headers[1].get("WAVELNTH"), Some(&json!(530.3)));
    }

    #[test]
    fn test_quoted_string_with_apostrophe() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.fits");
        let mut h = primary_header();
        h.set("OBSERVER", "O'Neil", None);
        write_headers(&path, &[h]).unwrap();

        let headers = read_headers(&path).unwrap();
        assert_eq!(headers[0].get("OBSERVER"), Some(&json!("O'Neil")));
    }

    #[test]
    fn test_comment_and_history_cards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comment.fits");
        let mut h = primary_header();
        h.set("COMMENT", "free-form narrative text", None);
        h.set("HISTORY", "processed with pipeline v2", None);
        write_headers(&path, &[h]).unwrap();

        let headers = read_headers(&path).unwrap();
        assert_eq!(
            headers[0].get("COMMENT"),
            Some(&json!("free-form narrative text"))
        );
        assert_eq!(
            headers[0].get("HISTORY"),
            Some(&json!("processed with pipeline v2"))
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_headers(Path::new("/nonexistent/file.fits")).unwrap_err();
        assert!(matches!(err, SolarnetError::Io(_)));
    }

    #[test]
    fn test_truncated_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trunc.fits");
        std::fs::write(&path, b"SIMPLE  =                    T").unwrap();
        let err = read_headers(&path).unwrap_err();
        assert!(matches!(err, SolarnetError::Parse { .. }));
    }

    #[test]
    fn test_fortran_double_exponent() {
        assert_eq!(parse_scalar("1.5D3"), json!(1500.0));
    }

    #[test]
    fn test_data_size_uses_naxis_keywords() {
        let mut h = Header::new();
        h.set("BITPIX", 16, None);
        h.set("NAXIS", 2, None);
        h.set("NAXIS1", 100, None);
        h.set("NAXIS2", 50, None);
        assert_eq!(data_size_bytes(&h), 2 * 100 * 50);
    }

    #[test]
    fn test_data_size_zero_without_axes() {
        let mut h = Header::new();
        h.set("BITPIX", 16, None);
        h.set("NAXIS", 0, None);
        assert_eq!(data_size_bytes(&h), 0);
    }
}
