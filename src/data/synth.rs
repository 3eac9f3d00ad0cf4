//! Writer for tiny synthetic RAW files.
//!
//! The output is a little-endian TIFF (the container NEF uses) with an IFD0
//! holding the camera make and a pointer to an Exif sub-IFD carrying the
//! exposure tags. No image data is written.

use std::io;
use std::path::Path;

const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

const TAG_MAKE: u16 = 0x010F;
const TAG_EXIF_POINTER: u16 = 0x8769;
const TAG_EXPOSURE_TIME: u16 = 0x829A;
const TAG_F_NUMBER: u16 = 0x829D;
const TAG_ISO: u16 = 0x8827;
const TAG_FOCAL_LENGTH: u16 = 0x920A;

/// Tags to embed. Ratios are stored as given, unreduced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticExif {
    pub make: Option<String>,
    pub exposure_time: Option<(u32, u32)>,
    pub iso: Option<u16>,
    pub focal_length: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
}

impl SyntheticExif {
    pub fn new() -> Self {
        Self {
            make: Some("NIKON CORPORATION".to_string()),
            ..Self::default()
        }
    }

    pub fn exposure(mut self, num: u32, den: u32) -> Self {
        self.exposure_time = Some((num, den));
        self
    }

    pub fn iso(mut self, iso: u16) -> Self {
        self.iso = Some(iso);
        self
    }

    pub fn focal(mut self, num: u32, den: u32) -> Self {
        self.focal_length = Some((num, den));
        self
    }

    pub fn aperture(mut self, num: u32, den: u32) -> Self {
        self.f_number = Some((num, den));
        self
    }
}

struct Entry {
    tag: u16,
    kind: u16,
    count: u32,
    data: Vec<u8>,
}

impl Entry {
    fn rational(tag: u16, (num, den): (u32, u32)) -> Self {
        let mut data = num.to_le_bytes().to_vec();
        data.extend(den.to_le_bytes());
        Entry { tag, kind: TYPE_RATIONAL, count: 1, data }
    }

    fn short(tag: u16, value: u16) -> Self {
        Entry { tag, kind: TYPE_SHORT, count: 1, data: value.to_le_bytes().to_vec() }
    }

    fn long(tag: u16, value: u32) -> Self {
        Entry { tag, kind: TYPE_LONG, count: 1, data: value.to_le_bytes().to_vec() }
    }

    fn ascii(tag: u16, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        Entry { tag, kind: TYPE_ASCII, count: data.len() as u32, data }
    }
}

/// Serialize one IFD that starts at absolute offset `start`; values that do
/// not fit the 4-byte slot follow the table.
fn encode_ifd(entries: &[Entry], start: u32) -> Vec<u8> {
    let table_len = 2 + 12 * entries.len() + 4;
    let mut table = Vec::with_capacity(table_len);
    let mut data: Vec<u8> = Vec::new();

    table.extend((entries.len() as u16).to_le_bytes());
    for e in entries {
        table.extend(e.tag.to_le_bytes());
        table.extend(e.kind.to_le_bytes());
        table.extend(e.count.to_le_bytes());
        if e.data.len() <= 4 {
            let mut inline = e.data.clone();
            inline.resize(4, 0);
            table.extend(inline);
        } else {
            let offset = start + table_len as u32 + data.len() as u32;
            table.extend(offset.to_le_bytes());
            data.extend(&e.data);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    table.extend(0u32.to_le_bytes());
    table.extend(data);
    table
}

/// Encode `exif` as a complete TIFF file.
pub fn encode_tiff(exif: &SyntheticExif) -> Vec<u8> {
    let mut exif_entries = Vec::new();
    if let Some(r) = exif.exposure_time {
        exif_entries.push(Entry::rational(TAG_EXPOSURE_TIME, r));
    }
    if let Some(r) = exif.f_number {
        exif_entries.push(Entry::rational(TAG_F_NUMBER, r));
    }
    if let Some(iso) = exif.iso {
        exif_entries.push(Entry::short(TAG_ISO, iso));
    }
    if let Some(r) = exif.focal_length {
        exif_entries.push(Entry::rational(TAG_FOCAL_LENGTH, r));
    }

    let ifd0_entries = |exif_offset: u32| {
        let mut entries = Vec::new();
        if let Some(make) = &exif.make {
            entries.push(Entry::ascii(TAG_MAKE, make));
        }
        entries.push(Entry::long(TAG_EXIF_POINTER, exif_offset));
        entries
    };

    let ifd0_len = encode_ifd(&ifd0_entries(0), 8).len() as u32;
    let exif_start = (8 + ifd0_len + 1) & !1;

    let mut out = b"II".to_vec();
    out.extend(42u16.to_le_bytes());
    out.extend(8u32.to_le_bytes());
    out.extend(encode_ifd(&ifd0_entries(exif_start), 8));
    out.resize(exif_start as usize, 0);
    out.extend(encode_ifd(&exif_entries, exif_start));
    out
}

pub fn write_raw_file(path: &Path, exif: &SyntheticExif) -> io::Result<()> {
    std::fs::write(path, encode_tiff(exif))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_exif_pointer_line_up() {
        let bytes = encode_tiff(&SyntheticExif::new().exposure(1, 250).iso(200));
        assert_eq!(&bytes[..4], b"II*\0");

        // IFD0: Make, ExifIFD pointer
        assert_eq!(u16::from_le_bytes([bytes[8], bytes[9]]), 2);
        let pointer_entry = 10 + 12;
        assert_eq!(
            u16::from_le_bytes([bytes[pointer_entry], bytes[pointer_entry + 1]]),
            TAG_EXIF_POINTER
        );
        let v = &bytes[pointer_entry + 8..pointer_entry + 12];
        let exif_start = u32::from_le_bytes([v[0], v[1], v[2], v[3]]) as usize;
        assert_eq!(exif_start % 2, 0);
        assert_eq!(
            u16::from_le_bytes([bytes[exif_start], bytes[exif_start + 1]]),
            2
        );
    }
}
