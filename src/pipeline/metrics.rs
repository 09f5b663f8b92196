//! Font metrics for the standard Helvetica face.
//!
//! Generated PDFs use the non-embedded base-14 Helvetica with
//! `WinAnsiEncoding`, so every character must map to a single Windows-1252
//! byte and its advance width comes from the Adobe AFM table below.
//! Measured widths include the AFM kerning pairs between unaccented
//! glyphs; the drawn text is not kerned.

/// Advance widths (1/1000 em) for WinAnsi bytes 32..=255.
///
/// Index is `byte - 32`. Unassigned code points have width 0.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    // 32
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 64
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 80
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 96
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 112
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    // 128
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    // 144
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    // 160
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 176
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 208
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 240
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Helvetica `KPX` pairs as `(left, right, adjustment)` over WinAnsi bytes,
/// sorted by `(left, right)`.
#[rustfmt::skip]
const HELVETICA_KERNING: &[(u8, u8, i16)] = &[
    (0x20, b'T', -50), (0x20, b'V', -50), (0x20, b'W', -40), (0x20, b'Y', -90),
    (0x20, 0x91, -60), (0x20, 0x93, -30),
    (0x2C, 0x92, -100), (0x2C, 0x94, -100),
    (0x2E, 0x20, -60), (0x2E, 0x92, -100), (0x2E, 0x94, -100),
    (0x3A, 0x20, -50),
    (0x3B, 0x20, -50),
    (b'A', b'C', -30), (b'A', b'G', -30), (b'A', b'O', -30), (b'A', b'Q', -30),
    (b'A', b'T', -120), (b'A', b'U', -50), (b'A', b'V', -70), (b'A', b'W', -50),
    (b'A', b'Y', -100), (b'A', b'u', -30), (b'A', b'v', -40), (b'A', b'w', -40),
    (b'A', b'y', -40),
    (b'B', 0x2C, -20), (b'B', 0x2E, -20), (b'B', b'U', -10),
    (b'C', 0x2C, -30), (b'C', 0x2E, -30),
    (b'D', 0x2C, -70), (b'D', 0x2E, -70), (b'D', b'A', -40), (b'D', b'V', -70),
    (b'D', b'W', -40), (b'D', b'Y', -90),
    (b'F', 0x2C, -150), (b'F', 0x2E, -150), (b'F', b'A', -80), (b'F', b'a', -50),
    (b'F', b'e', -30), (b'F', b'o', -30), (b'F', b'r', -45),
    (b'J', 0x2C, -30), (b'J', 0x2E, -30), (b'J', b'A', -20), (b'J', b'a', -20),
    (b'J', b'u', -20),
    (b'K', b'O', -50), (b'K', b'e', -40), (b'K', b'o', -40), (b'K', b'u', -30),
    (b'K', b'y', -50),
    (b'L', b'T', -110), (b'L', b'V', -110), (b'L', b'W', -70), (b'L', b'Y', -140),
    (b'L', b'y', -30), (b'L', 0x92, -160), (b'L', 0x94, -140),
    (b'O', 0x2C, -40), (b'O', 0x2E, -40), (b'O', b'A', -20), (b'O', b'T', -40),
    (b'O', b'V', -50), (b'O', b'W', -30), (b'O', b'X', -60), (b'O', b'Y', -70),
    (b'P', 0x2C, -180), (b'P', 0x2E, -180), (b'P', b'A', -120), (b'P', b'a', -40),
    (b'P', b'e', -50), (b'P', b'o', -50),
    (b'Q', b'U', -10),
    (b'R', b'O', -20), (b'R', b'T', -30), (b'R', b'U', -40), (b'R', b'V', -50),
    (b'R', b'W', -30), (b'R', b'Y', -50),
    (b'S', 0x2C, -20), (b'S', 0x2E, -20),
    (b'T', 0x2C, -120), (b'T', 0x2D, -140), (b'T', 0x2E, -120), (b'T', 0x3A, -20),
    (b'T', 0x3B, -20), (b'T', b'A', -120), (b'T', b'O', -40), (b'T', b'a', -120),
    (b'T', b'e', -120), (b'T', b'o', -120), (b'T', b'r', -120), (b'T', b'u', -120),
    (b'T', b'w', -120), (b'T', b'y', -120),
    (b'U', 0x2C, -40), (b'U', 0x2E, -40), (b'U', b'A', -40),
    (b'V', 0x2C, -125), (b'V', 0x2D, -80), (b'V', 0x2E, -125), (b'V', 0x3A, -40),
    (b'V', 0x3B, -40), (b'V', b'A', -80), (b'V', b'G', -40), (b'V', b'O', -40),
    (b'V', b'a', -70), (b'V', b'e', -80), (b'V', b'o', -80), (b'V', b'u', -70),
    (b'W', 0x2C, -80), (b'W', 0x2D, -40), (b'W', 0x2E, -80), (b'W', b'A', -50),
    (b'W', b'O', -20), (b'W', b'a', -40), (b'W', b'e', -30), (b'W', b'o', -30),
    (b'W', b'u', -30), (b'W', b'y', -20),
    (b'Y', 0x2C, -140), (b'Y', 0x2D, -140), (b'Y', 0x2E, -140), (b'Y', 0x3A, -60),
    (b'Y', 0x3B, -60), (b'Y', b'A', -110), (b'Y', b'O', -85), (b'Y', b'a', -140),
    (b'Y', b'e', -140), (b'Y', b'i', -20), (b'Y', b'o', -140), (b'Y', b'u', -110),
    (b'Y', b'v', -110),
    (b'a', b'v', -20), (b'a', b'w', -20), (b'a', b'y', -30),
    (b'b', 0x2C, -40), (b'b', 0x2E, -40), (b'b', b'b', -10), (b'b', b'l', -20),
    (b'b', b'u', -20), (b'b', b'v', -20), (b'b', b'y', -20),
    (b'c', 0x2C, -15), (b'c', b'k', -20),
    (b'e', 0x2C, -15), (b'e', 0x2E, -15), (b'e', b'v', -30), (b'e', b'w', -20),
    (b'e', b'x', -30), (b'e', b'y', -20),
    (b'f', 0x2C, -30), (b'f', 0x2E, -30), (b'f', b'a', -30), (b'f', b'e', -30),
    (b'f', b'o', -30), (b'f', 0x92, 50), (b'f', 0x94, 60),
    (b'g', b'r', -10),
    (b'h', b'y', -30),
    (b'k', b'e', -20), (b'k', b'o', -20),
    (b'm', b'u', -10), (b'm', b'y', -15),
    (b'n', b'u', -10), (b'n', b'v', -20), (b'n', b'y', -15),
    (b'o', 0x2C, -40), (b'o', 0x2E, -40), (b'o', b'v', -15), (b'o', b'w', -15),
    (b'o', b'x', -30), (b'o', b'y', -30),
    (b'p', 0x2C, -35), (b'p', 0x2E, -35), (b'p', b'y', -30),
    (b'r', 0x2C, -50), (b'r', 0x2D, -20), (b'r', 0x2E, -50), (b'r', 0x3A, 30), (b'r', 0x3B, 30),
    (b'r', b'a', -10),
    (b's', 0x2C, -15), (b's', 0x2E, -15), (b's', b'w', -30),
    (b'v', 0x2C, -80), (b'v', 0x2E, -80), (b'v', b'a', -25), (b'v', b'e', -25),
    (b'v', b'o', -25),
    (b'w', 0x2C, -60), (b'w', 0x2E, -60), (b'w', b'a', -15), (b'w', b'e', -10),
    (b'w', b'o', -10),
    (b'x', b'e', -30),
    (b'y', 0x2C, -100), (b'y', 0x2E, -100), (b'y', b'a', -20), (b'y', b'e', -20),
    (b'y', b'o', -20),
    (b'z', b'e', -15), (b'z', b'o', -15),
    (0x91, 0x91, -57),
    (0x92, 0x20, -70), (0x92, b'd', -50), (0x92, b'r', -50), (0x92, b's', -50),
    (0x92, 0x92, -57),
    (0x94, 0x20, -40),
];

/// Map one character to its Windows-1252 byte.
///
/// Returns `None` for control characters and anything outside the code
/// page, including most non-Latin scripts.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Encode a string as WinAnsi bytes, or return the first character that has
/// no encoding.
pub fn encode_win_ansi(text: &str) -> Result<Vec<u8>, char> {
    text.chars()
        .map(|c| win_ansi_byte(c).ok_or(c))
        .collect()
}

fn advance(b: u8) -> i32 {
    if b < 32 {
        0
    } else {
        i32::from(HELVETICA_WIDTHS[usize::from(b - 32)])
    }
}

/// Kerning adjustment between two adjacent bytes, in 1/1000 em.
pub fn kerning(left: u8, right: u8) -> i32 {
    HELVETICA_KERNING
        .binary_search_by(|&(l, r, _)| (l, r).cmp(&(left, right)))
        .map(|i| i32::from(HELVETICA_KERNING[i].2))
        .unwrap_or(0)
}

/// Width of already-encoded bytes at `font_size`, in points, kerning
/// included.
pub fn encoded_width(bytes: &[u8], font_size: f32) -> f32 {
    let advances: i32 = bytes.iter().map(|&b| advance(b)).sum();
    let kerns: i32 = bytes.windows(2).map(|w| kerning(w[0], w[1])).sum();
    (advances + kerns) as f32 * font_size / 1000.0
}

/// Width of `text` at `font_size`, or the first unencodable character.
pub fn text_width(text: &str, font_size: f32) -> Result<f32, char> {
    Ok(encoded_width(&encode_win_ansi(text)?, font_size))
}
