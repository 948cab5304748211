//! Orientation requested from the driver for each page

use crate::types::Orientation;

use super::PageSize;

/// Decide which orientation to request for a page.
///
/// With `auto_detect` off the driver's `current` orientation is kept. With it
/// on, the page's natural orientation is used, inverted when the driver
/// reports its paper bounds on the opposite axis from its landscape flag.
/// Such drivers hand back pre-rotated sheet dimensions, so asking them for
/// the natural orientation would print the page on the wrong axis.
pub fn resolve_orientation(
    page_size: PageSize,
    auto_detect: bool,
    driver_reports_swapped_axes: bool,
    current: Orientation,
) -> Orientation {
    if !auto_detect {
        return current;
    }

    let natural = page_size.orientation();
    if driver_reports_swapped_axes {
        natural.inverted()
    } else {
        natural
    }
}

/// True when a driver's paper bounds disagree with its landscape flag
pub fn bounds_disagree_with_flag(bounds_width: f64, bounds_height: f64, landscape: bool) -> bool {
    (bounds_width > bounds_height) != landscape
}
