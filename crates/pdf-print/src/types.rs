use crate::constants::mm_to_hundredths;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Print job has no document")]
    MissingDocument,
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to print")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, PrintError>;

/// Paper or page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width >= height
    Landscape,
}

impl Orientation {
    /// Orientation of a `width` × `height` box. Square boxes are landscape.
    pub fn of(width: f64, height: f64) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// The other orientation
    pub fn inverted(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }

    pub fn is_landscape(self) -> bool {
        self == Orientation::Landscape
    }

    pub fn from_landscape(landscape: bool) -> Self {
        if landscape {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    #[default]
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Base dimensions in hundredths of an inch
    pub fn dimensions_hundredths(self) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        (mm_to_hundredths(w), mm_to_hundredths(h))
    }

    /// Dimensions in hundredths of an inch with orientation applied
    pub fn hundredths_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_hundredths();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// How a source page is scaled onto the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingMode {
    /// Scale the page to fit the writable area, preserving aspect ratio
    #[default]
    FitSize,
    /// Print at the page's intrinsic size; the driver crops any overflow
    ActualSize,
    /// Print at intrinsic size, shrinking only pages that do not fit
    ShrinkOversized,
    /// Print at a fixed percentage of the intrinsic size
    CustomScale(u32),
}

/// Whether layout stays inside the printer's hard margins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarginMode {
    /// Shrink the layout box by the hard margins on every side
    #[default]
    ShrinkToMargin,
    /// Lay out over the full sheet; content may bleed into the hard margins
    UseHardMargin,
}
