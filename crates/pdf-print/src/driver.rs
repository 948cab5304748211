//! Printer side of a print job
//!
//! A driver reports the currently selected paper before each page, accepts
//! the settings the sequencer asks for, and then reports the device
//! geometry the page will actually be rendered with.

use crate::constants::DEFAULT_DPI;
use crate::layout::{Dpi, HardMargins, PrintableArea, bounds_disagree_with_flag};
use crate::types::{Orientation, PaperSize};

/// Paper selection as reported by the driver before a page is laid out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverPageSettings {
    /// Bounds of the selected paper, in hundredths of an inch
    pub bounds: PrintableArea,
    /// The driver's own landscape flag
    pub landscape: bool,
}

impl DriverPageSettings {
    pub fn orientation(&self) -> Orientation {
        Orientation::from_landscape(self.landscape)
    }

    /// True when the bounds are wider-than-tall but the driver is not in
    /// landscape, or the other way around.
    pub fn reports_swapped_axes(&self) -> bool {
        bounds_disagree_with_flag(self.bounds.width, self.bounds.height, self.landscape)
    }
}

/// Settings the sequencer asks the driver to use for the next page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettingsRequest {
    pub orientation: Orientation,
    /// Replace any paper left over from an earlier job with the default
    pub use_default_paper: bool,
}

/// Device geometry a page is rendered with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSettings {
    /// Sheet bounds in hundredths of an inch, as the device prints them
    pub page_bounds: PrintableArea,
    pub hard_margins: HardMargins,
    pub dpi: Dpi,
}

/// Abstraction over a printer driver.
pub trait PrintDriver {
    fn page_settings(&self) -> DriverPageSettings;
    fn apply(&mut self, request: PageSettingsRequest);
    fn device_settings(&self) -> DeviceSettings;
}

/// In-process printer with a fixed paper stock.
///
/// Hard margins are configured for portrait paper and follow the sheet
/// when it turns to landscape. With `misreports_landscape` set, the sheet
/// comes out in the opposite orientation from the landscape flag, and the
/// reported bounds follow the sheet rather than the flag.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualPrinter {
    pub default_paper: PaperSize,
    pub paper: PaperSize,
    pub landscape: bool,
    pub hard_margins: HardMargins,
    pub dpi: Dpi,
    pub misreports_landscape: bool,
}

impl Default for VirtualPrinter {
    fn default() -> Self {
        Self::new(PaperSize::Letter)
    }
}

impl VirtualPrinter {
    pub fn new(default_paper: PaperSize) -> Self {
        Self {
            default_paper,
            paper: default_paper,
            landscape: false,
            hard_margins: HardMargins::zero(),
            dpi: Dpi::uniform(DEFAULT_DPI),
            misreports_landscape: false,
        }
    }

    pub fn with_hard_margins(mut self, hard_margins: HardMargins) -> Self {
        self.hard_margins = hard_margins;
        self
    }

    pub fn with_dpi(mut self, dpi: Dpi) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_landscape(mut self, landscape: bool) -> Self {
        self.landscape = landscape;
        self
    }

    /// Select a paper other than the default, as a previous job might have
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    pub fn with_misreported_landscape(mut self, misreports: bool) -> Self {
        self.misreports_landscape = misreports;
        self
    }

    /// Orientation the sheet actually comes out in
    pub fn physical_orientation(&self) -> Orientation {
        Orientation::from_landscape(self.landscape != self.misreports_landscape)
    }

    fn sheet_bounds(&self) -> PrintableArea {
        let (width, height) = self
            .paper
            .hundredths_with_orientation(self.physical_orientation());
        PrintableArea::new(width, height)
    }
}

impl PrintDriver for VirtualPrinter {
    fn page_settings(&self) -> DriverPageSettings {
        DriverPageSettings {
            bounds: self.sheet_bounds(),
            landscape: self.landscape,
        }
    }

    fn apply(&mut self, request: PageSettingsRequest) {
        self.landscape = request.orientation.is_landscape();
        if request.use_default_paper {
            self.paper = self.default_paper;
        }
    }

    fn device_settings(&self) -> DeviceSettings {
        let hard_margins = match self.physical_orientation() {
            Orientation::Portrait => self.hard_margins,
            Orientation::Landscape => HardMargins::new(self.hard_margins.y, self.hard_margins.x),
        };
        DeviceSettings {
            page_bounds: self.sheet_bounds(),
            hard_margins,
            dpi: self.dpi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_honest_printer_reports_consistent_axes() {
        let printer = VirtualPrinter::new(PaperSize::Letter).with_landscape(true);
        let settings = printer.page_settings();
        assert!(settings.landscape);
        assert!(settings.bounds.width > settings.bounds.height);
        assert!(!settings.reports_swapped_axes());
    }

    #[test]
    fn test_misreporting_printer_reports_swapped_axes() {
        let printer = VirtualPrinter::new(PaperSize::Letter)
            .with_landscape(true)
            .with_misreported_landscape(true);
        let settings = printer.page_settings();
        assert!(settings.reports_swapped_axes());
        assert_eq!(printer.physical_orientation(), Orientation::Portrait);
    }

    #[test]
    fn test_apply_resets_paper_to_default() {
        let mut printer = VirtualPrinter::new(PaperSize::Letter).with_paper(PaperSize::A3);
        printer.apply(PageSettingsRequest {
            orientation: Orientation::Portrait,
            use_default_paper: false,
        });
        assert_eq!(printer.paper, PaperSize::A3);

        printer.apply(PageSettingsRequest {
            orientation: Orientation::Landscape,
            use_default_paper: true,
        });
        assert_eq!(printer.paper, PaperSize::Letter);
        assert!(printer.landscape);
    }

    #[test]
    fn test_hard_margins_follow_landscape_sheet() {
        let printer = VirtualPrinter::new(PaperSize::Letter)
            .with_hard_margins(HardMargins::new(25.0, 40.0))
            .with_landscape(true);
        let device = printer.device_settings();
        assert_eq!(device.hard_margins, HardMargins::new(40.0, 25.0));
        assert!((device.page_bounds.width - 1100.0).abs() < 1e-9);
        assert!((device.page_bounds.height - 850.0).abs() < 1e-9);
    }
}
