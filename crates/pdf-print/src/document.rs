//! Document side of a print job

use crate::layout::{Dpi, PageSize, PixelRect};
use std::fmt;
use std::ops::BitOr;

/// Flags passed through to the document's render call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderFlags(u32);

impl RenderFlags {
    /// Render for a printer rather than a screen
    pub const FOR_PRINTING: RenderFlags = RenderFlags(1 << 0);
    /// Include annotations in the output
    pub const ANNOTATIONS: RenderFlags = RenderFlags(1 << 1);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: RenderFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for RenderFlags {
    type Output = RenderFlags;

    fn bitor(self, rhs: RenderFlags) -> RenderFlags {
        RenderFlags(self.0 | rhs.0)
    }
}

/// A paginated document that can be printed.
///
/// The document outlives the print job; the sequencer only borrows it.
pub trait PrintableDocument {
    /// What pages are drawn onto
    type Surface;
    type Error: fmt::Display;

    fn page_count(&self) -> usize;

    /// Intrinsic page size in points. Only called for `index < page_count()`.
    fn page_size(&self, index: usize) -> PageSize;

    /// Draw page `index` into `rect` (device pixels) on `surface`.
    fn render(
        &self,
        index: usize,
        surface: &mut Self::Surface,
        dpi: Dpi,
        rect: PixelRect,
        flags: RenderFlags,
    ) -> Result<(), Self::Error>;
}
