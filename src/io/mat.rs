use std::path::Path;

use crate::error::{LabError, Result};

/*
MAT v5 Reader (minimal)
=======================

Just enough of the MATLAB Level 5 MAT-file format to read PhysioNet-style
ECG records: a 128-byte header followed by tagged data elements, of which
we care only about uncompressed numeric matrices (miMATRIX). Layout of one
matrix element:

  [tag: type=miMATRIX, size]
    [array flags   : miUINT32 × 2, class in the low byte of word 1]
    [dimensions    : miINT32 × ndims]
    [name          : miINT8 bytes]
    [real data     : one numeric element, column-major]

Every sub-element is padded to an 8-byte boundary, and any tag whose first
word has a nonzero high half is a "small data element" (type in the low 16
bits, byte count in the high 16, payload in the same 8-byte slot).

Deliberately unsupported, each rejected with a clear decode message rather
than a guess: big-endian files, compressed (miCOMPRESSED) elements,
complex/sparse/cell/struct arrays. The lab's bundled records need none of
them.
*/

// MAT data type tags
const MI_INT8: u32 = 1;
const MI_UINT8: u32 = 2;
const MI_INT16: u32 = 3;
const MI_UINT16: u32 = 4;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_SINGLE: u32 = 7;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;
const MI_COMPRESSED: u32 = 15;

/// A numeric matrix read from a MAT file, flattened column-major.
#[derive(Debug, Clone)]
pub struct MatMatrix {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    /// Column-major: element (r, c) is `data[c * rows + r]`.
    pub data: Vec<f64>,
}

impl MatMatrix {
    /// Extract one row (e.g. one ECG lead) as a contiguous signal.
    pub fn row(&self, r: usize) -> Vec<f64> {
        (0..self.cols).map(|c| self.data[c * self.rows + r]).collect()
    }
}

/// Load the first channel of an ECG record stored as a MAT v5 matrix.
///
/// PhysioNet exports name the matrix `val` with one row per lead; we take
/// the `val` matrix if present, otherwise the first numeric matrix in the
/// file.
pub fn load_ecg_record(path: &Path) -> Result<Vec<f64>> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| LabError::Io {
        path: display.clone(),
        source,
    })?;

    let matrices = parse_mat(&bytes).map_err(|reason| LabError::Decode {
        path: display.clone(),
        reason,
    })?;

    let matrix = matrices
        .iter()
        .find(|m| m.name == "val")
        .or_else(|| matrices.first())
        .ok_or_else(|| LabError::Decode {
            path: display.clone(),
            reason: "no numeric matrix found".into(),
        })?;

    if matrix.rows == 0 || matrix.cols == 0 {
        return Err(LabError::Decode {
            path: display,
            reason: format!("matrix '{}' is empty", matrix.name),
        });
    }

    log::debug!(
        "{display}: matrix '{}' ({} lead(s) × {} samples), using lead 0",
        matrix.name,
        matrix.rows,
        matrix.cols
    );
    Ok(matrix.row(0))
}

/// Parse all uncompressed numeric matrices out of a MAT v5 byte stream.
pub fn parse_mat(bytes: &[u8]) -> std::result::Result<Vec<MatMatrix>, String> {
    if bytes.len() < 128 {
        return Err("file shorter than the 128-byte MAT header".into());
    }
    // Endian indicator: bytes "IM" mean the file was written little-endian
    match &bytes[126..128] {
        b"IM" => {}
        b"MI" => return Err("big-endian MAT files are not supported".into()),
        _ => return Err("not a MAT v5 file (bad endian indicator)".into()),
    }

    let mut matrices = Vec::new();
    let mut cursor = Cursor::new(&bytes[128..]);

    while cursor.remaining() >= 8 {
        let (data_type, size, payload_in_tag) = cursor.tag()?;
        if data_type == MI_COMPRESSED {
            return Err("compressed MAT elements are not supported".into());
        }

        if payload_in_tag {
            cursor.skip(4)?; // small element payload shares the tag slot
            continue;
        }

        let payload = cursor.take(size)?;
        cursor.align8();

        if data_type == MI_MATRIX {
            if let Some(matrix) = parse_matrix(payload)? {
                matrices.push(matrix);
            }
        }
    }

    Ok(matrices)
}

/// Parse one miMATRIX payload. Returns Ok(None) for non-numeric classes.
fn parse_matrix(payload: &[u8]) -> std::result::Result<Option<MatMatrix>, String> {
    let mut cursor = Cursor::new(payload);

    // Array flags
    let (flags_type, flags_size, small) = cursor.tag()?;
    if flags_type != MI_UINT32 || flags_size != 8 || small {
        return Err("malformed array flags".into());
    }
    let flags_word = cursor.u32()?;
    cursor.skip(4)?;
    let class = flags_word & 0xff;
    // Numeric classes: double(6), single(7), int8..uint32 (8..=13)
    if !(6..=13).contains(&class) {
        return Ok(None);
    }
    let is_complex = flags_word & 0x0800 != 0;
    if is_complex {
        return Err("complex matrices are not supported".into());
    }

    // Dimensions
    let (dims_type, dims_size, small) = cursor.tag()?;
    if dims_type != MI_INT32 || small {
        return Err("malformed dimensions element".into());
    }
    let ndims = (dims_size / 4) as usize;
    if ndims != 2 {
        return Err(format!("expected a 2-D matrix, got {ndims} dimensions"));
    }
    let rows = cursor.u32()? as usize;
    let cols = cursor.u32()? as usize;
    let count = rows
        .checked_mul(cols)
        .ok_or_else(|| "declared matrix dimensions overflow".to_string())?;
    cursor.align8();

    // Name (often a small element)
    let (name_type, name_size, small) = cursor.tag()?;
    if name_type != MI_INT8 {
        return Err("malformed name element".into());
    }
    let name_bytes = if small {
        let b = cursor.take(4)?;
        b[..(name_size as usize).min(4)].to_vec()
    } else {
        let b = cursor.take(name_size)?.to_vec();
        cursor.align8();
        b
    };
    let name = String::from_utf8_lossy(&name_bytes).into_owned();

    // Real data
    let (data_type, data_size, small) = cursor.tag()?;
    let raw = if small {
        cursor.take(4)?
    } else {
        cursor.take(data_size)?
    };
    let data = decode_numeric(data_type, &raw[..(data_size as usize).min(raw.len())], count)?;

    Ok(Some(MatMatrix {
        name,
        rows,
        cols,
        data,
    }))
}

fn decode_numeric(
    data_type: u32,
    raw: &[u8],
    count: usize,
) -> std::result::Result<Vec<f64>, String> {
    fn read<const W: usize>(
        raw: &[u8],
        count: usize,
        convert: impl Fn([u8; W]) -> f64,
    ) -> std::result::Result<Vec<f64>, String> {
        // Bound the element count by the bytes actually present before any
        // allocation happens; a hostile header can declare dimensions far
        // beyond the payload (or beyond usize)
        if count > raw.len() / W {
            return Err("numeric data shorter than the declared dimensions".into());
        }
        Ok(raw
            .chunks_exact(W)
            .take(count)
            .map(|chunk| {
                let mut bytes = [0u8; W];
                bytes.copy_from_slice(chunk);
                convert(bytes)
            })
            .collect())
    }

    match data_type {
        MI_INT8 => read::<1>(raw, count, |b| i8::from_le_bytes(b) as f64),
        MI_UINT8 => read::<1>(raw, count, |b| u8::from_le_bytes(b) as f64),
        MI_INT16 => read::<2>(raw, count, |b| i16::from_le_bytes(b) as f64),
        MI_UINT16 => read::<2>(raw, count, |b| u16::from_le_bytes(b) as f64),
        MI_INT32 => read::<4>(raw, count, |b| i32::from_le_bytes(b) as f64),
        MI_UINT32 => read::<4>(raw, count, |b| u32::from_le_bytes(b) as f64),
        MI_SINGLE => read::<4>(raw, count, |b| f32::from_le_bytes(b) as f64),
        MI_DOUBLE => read::<8>(raw, count, f64::from_le_bytes),
        other => Err(format!("unsupported numeric data type {other}")),
    }
}

/// Little-endian byte cursor over a MAT element stream.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn u32(&mut self) -> std::result::Result<u32, String> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn take(&mut self, n: u32) -> std::result::Result<&'a [u8], String> {
        let n = n as usize;
        if self.remaining() < n {
            return Err("unexpected end of MAT data".into());
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn skip(&mut self, n: u32) -> std::result::Result<(), String> {
        self.take(n).map(|_| ())
    }

    /// Advance to the next 8-byte boundary.
    fn align8(&mut self) {
        let rem = self.pos % 8;
        if rem != 0 {
            self.pos = (self.pos + 8 - rem).min(self.bytes.len());
        }
    }

    /// Read an element tag. Returns (type, byte count, is_small_element).
    fn tag(&mut self) -> std::result::Result<(u32, u32, bool), String> {
        let word = self.u32()?;
        if word >> 16 != 0 {
            // Small data element: payload lives in the next 4 bytes
            Ok((word & 0xffff, word >> 16, true))
        } else {
            let size = self.u32()?;
            Ok((word, size, false))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal little-endian MAT v5 file holding one int16 matrix
    /// named `val`, stored column-major.
    fn build_mat(rows: u32, cols: u32, values: &[i16]) -> Vec<u8> {
        let mut out = vec![0u8; 128];
        out[..4].copy_from_slice(b"MATL"); // header text, content irrelevant
        out[124..126].copy_from_slice(&0x0100u16.to_le_bytes());
        out[126..128].copy_from_slice(b"IM");

        let mut body = Vec::new();
        // Array flags: miUINT32, 8 bytes, class int16 (10)
        body.extend(MI_UINT32.to_le_bytes());
        body.extend(8u32.to_le_bytes());
        body.extend(10u32.to_le_bytes());
        body.extend(0u32.to_le_bytes());
        // Dimensions: miINT32, 8 bytes
        body.extend(MI_INT32.to_le_bytes());
        body.extend(8u32.to_le_bytes());
        body.extend(rows.to_le_bytes());
        body.extend(cols.to_le_bytes());
        // Name "val" as a small element: type 1, size 3
        body.extend(((3u32 << 16) | MI_INT8).to_le_bytes());
        body.extend(b"val\0");
        // Real data: miINT16
        let data_bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        body.extend(MI_INT16.to_le_bytes());
        body.extend((data_bytes.len() as u32).to_le_bytes());
        body.extend(&data_bytes);
        while body.len() % 8 != 0 {
            body.push(0);
        }

        out.extend(MI_MATRIX.to_le_bytes());
        out.extend((body.len() as u32).to_le_bytes());
        out.extend(body);
        out
    }

    #[test]
    fn reads_the_val_matrix_column_major() {
        // 2 leads × 3 samples, column-major: columns are (r0,r1) pairs
        let bytes = build_mat(2, 3, &[10, -20, 11, -21, 12, -22]);
        let matrices = parse_mat(&bytes).unwrap();
        assert_eq!(matrices.len(), 1);

        let m = &matrices[0];
        assert_eq!(m.name, "val");
        assert_eq!((m.rows, m.cols), (2, 3));
        assert_eq!(m.row(0), vec![10.0, 11.0, 12.0]);
        assert_eq!(m.row(1), vec![-20.0, -21.0, -22.0]);
    }

    #[test]
    fn load_ecg_record_returns_the_first_lead() {
        let bytes = build_mat(1, 4, &[1, 2, 3, 4]);
        let dir = std::env::temp_dir().join("siglab_mat_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("record.mat");
        std::fs::write(&path, bytes).unwrap();

        let lead = load_ecg_record(&path).unwrap();
        assert_eq!(lead, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn truncated_file_is_rejected() {
        assert!(parse_mat(&[0u8; 64]).is_err());
    }

    #[test]
    fn absurd_declared_dimensions_are_rejected_without_allocating() {
        // Claim a 2^31 x 2^31 matrix while carrying only 8 data bytes; the
        // decoder must report the mismatch, not size a buffer from the header
        let mut bytes = build_mat(1, 4, &[1, 2, 3, 4]);
        let huge = (1u32 << 31).to_le_bytes();
        // Dimensions sit right after the 128-byte header, the matrix tag,
        // the 16-byte array flags element, and the dimensions tag
        bytes[160..164].copy_from_slice(&huge);
        bytes[164..168].copy_from_slice(&huge);

        let err = parse_mat(&bytes).unwrap_err();
        assert!(
            err.contains("dimension"),
            "expected a dimensions error, got: {err}"
        );
    }

    #[test]
    fn compressed_elements_are_rejected_with_a_clear_message() {
        let mut bytes = build_mat(1, 1, &[5]);
        // Overwrite the matrix tag with miCOMPRESSED
        bytes[128..132].copy_from_slice(&MI_COMPRESSED.to_le_bytes());
        let err = parse_mat(&bytes).unwrap_err();
        assert!(err.contains("compressed"), "got: {err}");
    }

    #[test]
    fn big_endian_files_are_rejected() {
        let mut bytes = build_mat(1, 1, &[5]);
        bytes[126..128].copy_from_slice(b"MI");
        assert!(parse_mat(&bytes).unwrap_err().contains("big-endian"));
    }
}
