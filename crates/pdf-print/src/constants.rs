//! Shared constants for print layout
//!
//! Layout math is carried out in hundredths of an inch. Points only appear
//! at the document boundary and device pixels only at render time, so every
//! conversion between the three goes through this module.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Inches per PDF point (1 inch = 72 points)
pub const INCHES_PER_POINT: f64 = 0.013888888888889;

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Layout units per inch (layout geometry is in hundredths of an inch)
pub const HUNDREDTHS_PER_INCH: f64 = 100.0;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Convert points to inches
#[inline]
pub fn pt_to_inches(pt: f64) -> f64 {
    pt * INCHES_PER_POINT
}

/// Convert points to hundredths of an inch
#[inline]
pub fn pt_to_hundredths(pt: f64) -> f64 {
    pt_to_inches(pt) * HUNDREDTHS_PER_INCH
}

/// Convert hundredths of an inch to points
#[inline]
pub fn hundredths_to_pt(hundredths: f64) -> f64 {
    hundredths / HUNDREDTHS_PER_INCH * POINTS_PER_INCH
}

/// Convert millimeters to hundredths of an inch
#[inline]
pub fn mm_to_hundredths(mm: f64) -> f64 {
    mm / MM_PER_INCH * HUNDREDTHS_PER_INCH
}

/// Convert hundredths of an inch to device pixels at `dpi`, rounding to the
/// nearest pixel.
#[inline]
pub fn hundredths_to_pixels(hundredths: f64, dpi: f64) -> i32 {
    (hundredths / HUNDREDTHS_PER_INCH * dpi).round() as i32
}

/// Convert device pixels at `dpi` back to points
#[inline]
pub fn pixels_to_pt(pixels: i32, dpi: f64) -> f64 {
    pixels as f64 / dpi * POINTS_PER_INCH
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f64 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f64 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f64, f64) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Device Defaults
// =============================================================================

/// Resolution used when a device does not report one
pub const DEFAULT_DPI: f64 = 600.0;
