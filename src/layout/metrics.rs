//! Glyph widths for the two standard PDF fonts used on stickers.
//!
//! Values are the Adobe AFM advance widths in 1/1000 em for the printable
//! ASCII range and the Windows-1252 block at 0x80-0x9F. Characters are first
//! mapped to their WinAnsiEncoding byte, the same byte the content stream
//! carries, so measurement and output never disagree.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    pub const fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    /// Name under the page's `/Font` resources.
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for WinAnsi bytes without a table entry (mostly Latin-1).
const FALLBACK_WIDTH: u16 = 556;

/// WinAnsiEncoding byte for `c`, or `?` when the font cannot show it.
pub fn winansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => b'?',
    }
}

/// True when `c` prints as itself rather than as a substituted `?`.
pub fn is_encodable(c: char) -> bool {
    c == '?' || winansi_byte(c) != b'?'
}

/// Upper-case `text` for printing.
///
/// Characters whose upper-case form the font cannot show are kept as they
/// are, so `µ` stays `µ` instead of becoming Greek capital mu.
pub fn printable_uppercase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let upper = c.to_uppercase();
        if upper.clone().all(is_encodable) {
            out.extend(upper);
        } else {
            out.push(c);
        }
    }
    out
}

/// Advance width of one encoded byte in 1/1000 em.
pub fn byte_width(face: FontFace, byte: u8) -> u16 {
    let table = match face {
        FontFace::Regular => &HELVETICA,
        FontFace::Bold => &HELVETICA_BOLD,
    };
    let bold = face == FontFace::Bold;
    match byte {
        0x20..=0x7e => table[usize::from(byte - 0x20)],
        0x85 | 0x89 | 0x8c | 0x97 | 0x99 => 1000,
        0x95 => 350,
        0x88 | 0x8b | 0x98 | 0x9b => 333,
        0x82 | 0x91 | 0x92 => if bold { 278 } else { 222 },
        0x84 | 0x93 | 0x94 => if bold { 500 } else { 333 },
        0x8a | 0x9f => 667,
        0x8e => 611,
        0x9a => if bold { 556 } else { 500 },
        0x9c => 944,
        0x9e => 500,
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` in points.
///
/// Units are summed in 64 bits, so arbitrarily long values measure without
/// overflow.
pub fn string_width(face: FontFace, size: f32, text: &str) -> f32 {
    let units: u64 = text
        .chars()
        .map(|c| u64::from(byte_width(face, winansi_byte(c))))
        .sum();
    (units as f64 * f64::from(size) / 1000.0) as f32
}
