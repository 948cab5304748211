//! Geometry types for print layout
//!
//! Sizes coming from the document are in points. Everything the resolver
//! produces is in hundredths of an inch, until the destination is converted
//! to device pixels for the render call.

use crate::constants::{hundredths_to_pixels, pt_to_hundredths};
use crate::types::Orientation;
use thiserror::Error;

/// Intrinsic size of a document page in points (1/72")
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Natural orientation derived from the aspect ratio
    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width, self.height)
    }

    /// Page size converted to hundredths of an inch, as (width, height)
    pub fn to_hundredths(&self) -> (f64, f64) {
        (pt_to_hundredths(self.width), pt_to_hundredths(self.height))
    }
}

/// Sheet bounds reported by the driver, in hundredths of an inch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PrintableArea {
    pub width: f64,
    pub height: f64,
}

impl PrintableArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width, self.height)
    }
}

/// Non-printable border per axis, in hundredths of an inch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HardMargins {
    pub x: f64,
    pub y: f64,
}

impl HardMargins {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Device resolution per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dpi {
    pub x: f64,
    pub y: f64,
}

impl Dpi {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn uniform(dpi: f64) -> Self {
        Self { x: dpi, y: dpi }
    }

    /// Both axes finite and greater than zero
    pub fn is_valid(&self) -> bool {
        [self.x, self.y].iter().all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Where page content is drawn, in hundredths of an inch relative to the
/// device origin (the top-left corner of the printable region).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DestinationRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DestinationRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn has_positive_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Swap the axes of the box: width with height, left with top
    pub fn transposed(self) -> Self {
        Self {
            left: self.top,
            top: self.left,
            width: self.height,
            height: self.width,
        }
    }

    /// Convert to device pixels. Each axis uses its own resolution.
    pub fn to_device_pixels(&self, dpi: Dpi) -> PixelRect {
        PixelRect {
            x: hundredths_to_pixels(self.left, dpi.x),
            y: hundredths_to_pixels(self.top, dpi.y),
            width: hundredths_to_pixels(self.width, dpi.x),
            height: hundredths_to_pixels(self.height, dpi.y),
        }
    }
}

/// Destination rectangle in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Geometry the resolver refuses to compute
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("page size {width}x{height}pt is not positive")]
    DegeneratePage { width: f64, height: f64 },
    #[error("writable area {width}x{height} is not positive (hard margins exceed the sheet?)")]
    DegenerateWritableArea { width: f64, height: f64 },
    #[error("resolved destination {width}x{height} is not positive")]
    DegenerateResult { width: f64, height: f64 },
    #[error("device resolution {x}x{y} dpi is not positive")]
    DegenerateResolution { x: f64, y: f64 },
    #[error("destination covers {width}x{height} device pixels")]
    EmptyPixelRect { width: i32, height: i32 },
}
