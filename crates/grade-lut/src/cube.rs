//! `.cube` text codec.
//!
//! The format emitted and accepted here is the Adobe/Resolve subset used
//! for portable looks:
//!
//! ```text
//! TITLE "Name"
//! LUT_3D_SIZE 16
//!
//! 0.000000 0.000000 0.000000
//! ...
//! ```
//!
//! Data rows are in b-outer, g-middle, r-inner order (r varies fastest).
//! On parse, the body row count must be a perfect cube; anything else is a
//! hard [`LutError::Malformed`], never a silently truncated table.

use crate::{Lut3D, LutError, LutResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Reads a 3D LUT from a `.cube` file.
pub fn read_path<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    let file = File::open(path.as_ref())?;
    parse(BufReader::new(file))
}

/// Writes a 3D LUT to a `.cube` file.
pub fn write_path<P: AsRef<Path>>(path: P, lut: &Lut3D, title: &str) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(&mut writer, lut, title)
}

/// Parses a 3D LUT from a reader.
///
/// Blank lines, comments, and the `TITLE`/`LUT_3D_SIZE`/`DOMAIN_*` header
/// keywords are skipped; every remaining line must be three floats. The
/// declared header size is informational - the table's real size comes
/// from the (perfect-cube) row count.
pub fn parse<R: BufRead>(reader: R) -> LutResult<Lut3D> {
    let mut data: Vec<[f32; 3]> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty()
            || line.starts_with('#')
            || line.starts_with("TITLE")
            || line.starts_with("LUT_3D_SIZE")
            || line.starts_with("DOMAIN_MIN")
            || line.starts_with("DOMAIN_MAX")
        {
            continue;
        }

        data.push(parse_rgb(line)?);
    }

    Lut3D::from_rows(data)
}

/// Writes a 3D LUT in `.cube` text form.
pub fn write<W: Write>(writer: &mut W, lut: &Lut3D, title: &str) -> LutResult<()> {
    writeln!(writer, "TITLE \"{title}\"")?;
    writeln!(writer, "LUT_3D_SIZE {}", lut.size())?;
    writeln!(writer)?;

    for rgb in lut.rows() {
        writeln!(writer, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}

/// Serializes a 3D LUT to a `.cube` string.
pub fn to_cube_string(lut: &Lut3D, title: &str) -> String {
    let mut out = Vec::new();
    // Writing to a Vec<u8> cannot fail.
    let _ = write(&mut out, lut, title);
    String::from_utf8(out).unwrap_or_default()
}

fn parse_rgb(line: &str) -> LutResult<[f32; 3]> {
    let mut parts = line.split_whitespace();
    let mut rgb = [0.0f32; 3];
    for v in &mut rgb {
        let token = parts
            .next()
            .ok_or_else(|| LutError::Malformed(format!("short data row: {line}")))?;
        *v = token
            .parse()
            .map_err(|_| LutError::Malformed(format!("bad numeric token: {token}")))?;
    }
    Ok(rgb)
}
