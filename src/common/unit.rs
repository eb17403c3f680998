//! Unit conversion utilities.
//!
//! DrawingML positions and extents are expressed in English Metric Units (EMU);
//! font sizes are stored in hundredths of a point.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

/// Convert inches to EMU, rounding to the nearest unit.
///
/// ```
/// use slidepack::common::unit::inches_to_emu;
/// assert_eq!(inches_to_emu(1.0), 914_400);
/// assert_eq!(inches_to_emu(13.33), 12_188_952);
/// ```
#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

/// Font size in points to the `sz` attribute value (centipoints).
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round() as u32
}
