use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// A decoded RLE pattern.
#[derive(Debug, Default)]
pub struct Rle<'a> {
    pub name: Option<&'a [u8]>,
    pub width: usize,
    pub height: usize,

    /// Live cells, relative to the top left corner
    pub cells: Vec<(usize, usize)>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RleError {
    #[error("Missing header line")]
    NoHeader,

    #[error("Expected '{exp}' in header")]
    Header { exp: char },

    #[error("Failed to convert \"{str}\"")]
    Number { str: String },

    #[error("Unexpected end of input, expected '!'")]
    UnexpectedEof,

    #[error("Unrecognized byte: 0x{got:0X}")]
    UnrecognizedByte { got: u8 },

    #[error("Cell ({x}, {y}) lies outside the {width}x{height} header size")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// Split off the first byte.
fn take_1(bytes: &[u8]) -> (Option<u8>, &[u8]) {
    match bytes.split_first() {
        Some((&b, rest)) => (Some(b), rest),
        None => (None, bytes),
    }
}

/// Consume leading spaces and tabs, but not line breaks.
fn take_blank(bytes: &[u8]) -> &[u8] {
    let i = bytes
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(bytes.len());

    &bytes[i..]
}

/// Consume the rest of the line, including the line break.
fn take_line(bytes: &[u8]) -> (&[u8], &[u8]) {
    match bytes.iter().position(|&b| b == b'\n') {
        Some(i) => (&bytes[..i], &bytes[i + 1..]),
        None => (bytes, &bytes[bytes.len()..]),
    }
}

fn expect(exp: u8, bytes: &[u8]) -> Result<&[u8], RleError> {
    match take_1(take_blank(bytes)) {
        (Some(b), rest) if b == exp => Ok(take_blank(rest)),
        _ => Err(RleError::Header { exp: exp as char }),
    }
}

/// Take the leading digits and convert them.
fn take_number<T: FromStr>(bytes: &[u8]) -> Result<(T, &[u8]), RleError> {
    let i = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());
    let (digits, rest) = bytes.split_at(i);

    let str = String::from_utf8_lossy(digits);
    let n = str.parse().map_err(|_| RleError::Number {
        str: str.to_string(),
    })?;

    Ok((n, rest))
}

/// Decode a pattern in the RLE format.
///
/// Comment lines are skipped, except `#N` which names the pattern. The header line gives the
/// size of the pattern, and any rule it mentions is ignored.
///
/// See: https://conwaylife.com/wiki/Run_Length_Encoded
pub fn decode(mut bytes: &[u8]) -> Result<Rle<'_>, RleError> {
    let mut rle = Rle::default();

    // Comment lines
    while let (Some(b'#'), rest) = take_1(take_blank(bytes)) {
        let (line, rest) = take_line(rest);

        if let (Some(b'N'), name) = take_1(line) {
            if rle.name.is_some() {
                warn!("RLE name already defined. Using latest");
            }

            rle.name = Some(name.trim_ascii());
        }

        bytes = rest;
    }

    // Header line: x = <w>, y = <h>[, rule = ...]
    let (header, mut body) = take_line(bytes);
    if header.trim_ascii().is_empty() {
        return Err(RleError::NoHeader);
    }

    let header = expect(b'x', header)?;
    let header = expect(b'=', header)?;
    let (width, header) = take_number(header)?;
    let header = expect(b',', header)?;
    let header = expect(b'y', header)?;
    let header = expect(b'=', header)?;
    let (height, _) = take_number(header)?;

    rle.width = width;
    rle.height = height;

    let mut rep: usize = 1;
    let (mut x, mut y) = (0, 0);

    loop {
        let (Some(b), rest) = take_1(body) else {
            return Err(RleError::UnexpectedEof);
        };

        match b {
            b'!' => break,

            b' ' | b'\t' | b'\r' | b'\n' => {
                body = rest;
                continue;
            }

            // Dead cells
            b'b' => x += rep,

            // Live cells
            b'o' => {
                for i in 0..rep {
                    if x + i >= width || y >= height {
                        return Err(RleError::OutOfBounds {
                            x: x + i,
                            y,
                            width,
                            height,
                        });
                    }

                    rle.cells.push((x + i, y));
                }

                x += rep;
            }

            // End of line, possibly skipping blank ones
            b'$' => {
                y += rep;
                x = 0;
            }

            n if n.is_ascii_digit() => {
                let (n, rest) = take_number(body)?;
                rep = n;
                body = rest;
                continue;
            }

            b => return Err(RleError::UnrecognizedByte { got: b }),
        }

        rep = 1;
        body = rest;
    }

    Ok(rle)
}
