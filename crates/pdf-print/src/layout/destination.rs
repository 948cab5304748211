//! Destination rectangle for a page on the sheet
//!
//! Resolution runs in three passes over one rectangle:
//! 1. the margin mode picks the base box (inside the hard margins, or the
//!    whole sheet offset by them);
//! 2. an orientation mismatch between page and device transposes the box;
//! 3. the scaling mode replaces the box with the page's final placement.

use crate::types::{MarginMode, Orientation, ScalingMode};

use super::{DestinationRect, GeometryError, HardMargins, PageSize, PrintableArea};

/// Compute where a page is drawn on the sheet, in hundredths of an inch.
///
/// `page_orientation` is the page's natural orientation and
/// `print_orientation` the orientation the device prints in. Fit-based
/// scaling needs a positive writable box and reports
/// [`GeometryError::DegenerateWritableArea`] instead of dividing by it.
#[allow(clippy::too_many_arguments)]
pub fn resolve_destination(
    page_size: PageSize,
    printable_area: PrintableArea,
    hard_margin: HardMargins,
    margin_mode: MarginMode,
    scaling_mode: ScalingMode,
    page_orientation: Orientation,
    print_orientation: Orientation,
) -> Result<DestinationRect, GeometryError> {
    if !(page_size.width > 0.0 && page_size.height > 0.0)
        || !page_size.width.is_finite()
        || !page_size.height.is_finite()
    {
        return Err(GeometryError::DegeneratePage {
            width: page_size.width,
            height: page_size.height,
        });
    }

    let (page_width, page_height) = page_size.to_hundredths();

    let mut writable = base_rect(printable_area, hard_margin, margin_mode);
    if page_orientation != print_orientation {
        writable = writable.transposed();
    }

    let rect = match scaling_mode {
        ScalingMode::ActualSize => DestinationRect::new(0.0, 0.0, page_width, page_height),
        ScalingMode::CustomScale(percent) => {
            let factor = f64::from(percent) / 100.0;
            DestinationRect::new(0.0, 0.0, page_width * factor, page_height * factor)
        }
        ScalingMode::FitSize => fit_to_writable(
            page_width,
            page_height,
            &writable,
            printable_area,
            hard_margin,
        )?,
        ScalingMode::ShrinkOversized => {
            if page_width <= writable.width && page_height <= writable.height {
                DestinationRect::new(0.0, 0.0, page_width, page_height)
            } else {
                fit_to_writable(
                    page_width,
                    page_height,
                    &writable,
                    printable_area,
                    hard_margin,
                )?
            }
        }
    };

    if !rect.has_positive_area() {
        return Err(GeometryError::DegenerateResult {
            width: rect.width,
            height: rect.height,
        });
    }

    Ok(rect)
}

/// The whole sheet, offset so that it starts at the physical paper corner.
///
/// Used when resolution fails; always as large as the sheet the driver
/// reported.
pub fn full_printable_area(
    printable_area: PrintableArea,
    hard_margin: HardMargins,
) -> DestinationRect {
    DestinationRect::new(
        -hard_margin.x,
        -hard_margin.y,
        printable_area.width,
        printable_area.height,
    )
}

fn base_rect(
    printable_area: PrintableArea,
    hard_margin: HardMargins,
    margin_mode: MarginMode,
) -> DestinationRect {
    match margin_mode {
        MarginMode::ShrinkToMargin => DestinationRect::new(
            0.0,
            0.0,
            printable_area.width - hard_margin.x * 2.0,
            printable_area.height - hard_margin.y * 2.0,
        ),
        MarginMode::UseHardMargin => full_printable_area(printable_area, hard_margin),
    }
}

/// Scale the page into the writable box, preserving aspect ratio.
///
/// Ties in the aspect comparison take the width-bound branch.
fn fit_to_writable(
    page_width: f64,
    page_height: f64,
    writable: &DestinationRect,
    printable_area: PrintableArea,
    hard_margin: HardMargins,
) -> Result<DestinationRect, GeometryError> {
    if !writable.has_positive_area() {
        return Err(GeometryError::DegenerateWritableArea {
            width: writable.width,
            height: writable.height,
        });
    }

    if writable.height / writable.width >= page_height / page_width {
        // Extra writable space in height: center vertically
        let width = writable.width;
        let height = writable.width / page_width * page_height;
        let top = (printable_area.height - height) / 2.0 - hard_margin.y;
        Ok(DestinationRect::new(0.0, top, width, height))
    } else {
        // Extra writable space in width: center horizontally
        let height = writable.height;
        let width = writable.height / page_height * page_width;
        let left = (printable_area.width - width) / 2.0 - hard_margin.x;
        Ok(DestinationRect::new(left, 0.0, width, height))
    }
}
