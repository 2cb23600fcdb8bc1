/// Number of PDF points in one millimetre.
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Advance widths of Helvetica for the printable ASCII range, in 1/1000 em.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const FALLBACK_WIDTH: u16 = 556;

/// Text measurement for the standard Helvetica face used in reports.
pub struct FontMetrics;

impl FontMetrics {
    pub fn char_width(c: char) -> u16 {
        let code = c as u32;
        if (32..=126).contains(&code) {
            HELVETICA_ASCII[(code - 32) as usize]
        } else {
            FALLBACK_WIDTH
        }
    }

    /// Width of `text` set at `size_pt`, in millimetres.
    pub fn text_width_mm(text: &str, size_pt: f64) -> f64 {
        let units: u32 = text.chars().map(|c| Self::char_width(c) as u32).sum();
        units as f64 / 1000.0 * size_pt / POINTS_PER_MM
    }
}
