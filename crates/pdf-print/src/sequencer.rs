//! Page-by-page print sequencing
//!
//! [`PrintSequencer`] is a state machine with two entry points that a host
//! loop calls alternately for every page: [`PrintSequencer::query_page_settings`]
//! before the driver configures the sheet, and [`PrintSequencer::render_page`]
//! once the device geometry is known. Nothing that goes wrong inside a
//! running job is returned as an error; each call reports what happened and
//! the cursor always moves on, so the host loop terminates.

use crate::document::{PrintableDocument, RenderFlags};
use crate::driver::{DeviceSettings, DriverPageSettings, PageSettingsRequest};
use crate::layout::{
    DestinationRect, GeometryError, PixelRect, full_printable_area, resolve_destination,
    resolve_orientation,
};
use crate::options::PrintOptions;
use crate::types::{PrintError, Result, ScalingMode};
use log::{debug, error, info, warn};

/// Lifecycle of one print job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    NotStarted,
    InProgress,
    Complete,
}

/// Position of a job within its page range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintCursor {
    /// 0-based index of the next page to render
    pub current_page_index: usize,
    /// 1-based first page, 0 for the start of the document
    pub from_page: u32,
    /// 1-based last page, 0 for the end of the document
    pub to_page: u32,
}

/// What happened to one page
#[derive(Debug, Clone, PartialEq)]
pub enum PageStatus {
    /// The document was asked to draw the page
    Rendered {
        destination: DestinationRect,
        pixels: PixelRect,
        /// The layout could not be resolved and the full sheet was used
        fallback: bool,
    },
    /// The cursor pointed past the end of the document
    OutOfRange,
    /// Nothing could be drawn: an empty page, an unusable device
    /// resolution, or no positive size from either the layout or the
    /// full-sheet fallback
    Degenerate(GeometryError),
    /// The document failed to draw the page
    RenderFailed(String),
    /// The job was not in progress
    Inactive,
}

/// Result of a render call
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub page_index: usize,
    pub status: PageStatus,
    pub has_more_pages: bool,
}

/// Builder for [`PrintSequencer`]
pub struct PrintSequencerBuilder<'d, D> {
    document: Option<&'d D>,
    options: PrintOptions,
}

impl<'d, D: PrintableDocument> PrintSequencerBuilder<'d, D> {
    pub fn document(mut self, document: &'d D) -> Self {
        self.document = Some(document);
        self
    }

    pub fn options(mut self, options: PrintOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<PrintSequencer<'d, D>> {
        let document = self.document.ok_or(PrintError::MissingDocument)?;
        self.options.validate()?;

        Ok(PrintSequencer {
            document,
            cursor: PrintCursor {
                current_page_index: 0,
                from_page: self.options.from_page,
                to_page: self.options.to_page,
            },
            options: self.options,
            state: SequencerState::NotStarted,
        })
    }
}

/// Drives one print job over a borrowed document
pub struct PrintSequencer<'d, D> {
    document: &'d D,
    options: PrintOptions,
    cursor: PrintCursor,
    state: SequencerState,
}

impl<'d, D: PrintableDocument> PrintSequencer<'d, D> {
    pub fn builder() -> PrintSequencerBuilder<'d, D> {
        PrintSequencerBuilder {
            document: None,
            options: PrintOptions::default(),
        }
    }

    pub fn new(document: &'d D, options: PrintOptions) -> Result<Self> {
        Self::builder().document(document).options(options).build()
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn cursor(&self) -> PrintCursor {
        self.cursor
    }

    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    /// One past the last page index this job prints
    pub fn effective_to_page(&self) -> usize {
        self.options.effective_to_page(self.document.page_count())
    }

    pub fn has_more_pages(&self) -> bool {
        self.cursor.current_page_index < self.effective_to_page()
    }

    /// Start the job and position the cursor on the first requested page.
    pub fn begin(&mut self) {
        if self.state != SequencerState::NotStarted {
            warn!("Print job already started; ignoring begin");
            return;
        }

        self.cursor.current_page_index = self.options.first_page_index();
        self.state = SequencerState::InProgress;
        info!(
            "Print job started at page index {} of {} (stopping before {})",
            self.cursor.current_page_index,
            self.document.page_count(),
            self.effective_to_page()
        );
    }

    /// Settings to request from the driver for the current page.
    ///
    /// Returns `None` when the job is not in progress or the cursor is past
    /// the last page to print.
    pub fn query_page_settings(
        &self,
        current: &DriverPageSettings,
    ) -> Option<PageSettingsRequest> {
        if self.state != SequencerState::InProgress || !self.has_more_pages() {
            return None;
        }

        let page_size = self.document.page_size(self.cursor.current_page_index);
        let orientation = resolve_orientation(
            page_size,
            self.options.auto_orientation,
            current.reports_swapped_axes(),
            current.orientation(),
        );

        Some(PageSettingsRequest {
            orientation,
            use_default_paper: self.options.scaling != ScalingMode::ActualSize,
        })
    }

    /// Render the current page with the geometry the device reported, then
    /// advance the cursor.
    pub fn render_page(
        &mut self,
        device: &DeviceSettings,
        surface: &mut D::Surface,
    ) -> PageReport {
        let page_index = self.cursor.current_page_index;

        if self.state != SequencerState::InProgress {
            warn!("Render requested while print job is {:?}", self.state);
            return PageReport {
                page_index,
                status: PageStatus::Inactive,
                has_more_pages: false,
            };
        }

        let status = if page_index < self.document.page_count() {
            self.render_at(page_index, device, surface)
        } else {
            warn!(
                "Page index {} is outside the document ({} pages); skipping",
                page_index,
                self.document.page_count()
            );
            PageStatus::OutOfRange
        };

        self.cursor.current_page_index += 1;

        let has_more_pages = self.has_more_pages();
        if !has_more_pages {
            self.state = SequencerState::Complete;
            info!("Print job complete");
        }

        PageReport {
            page_index,
            status,
            has_more_pages,
        }
    }

    fn render_at(
        &self,
        page_index: usize,
        device: &DeviceSettings,
        surface: &mut D::Surface,
    ) -> PageStatus {
        let page_size = self.document.page_size(page_index);

        if !device.dpi.is_valid() {
            warn!(
                "Page {}: device reports {}x{} dpi; skipping",
                page_index, device.dpi.x, device.dpi.y
            );
            return PageStatus::Degenerate(GeometryError::DegenerateResolution {
                x: device.dpi.x,
                y: device.dpi.y,
            });
        }

        let (destination, fallback) = match resolve_destination(
            page_size,
            device.page_bounds,
            device.hard_margins,
            self.options.margin_mode,
            self.options.scaling,
            page_size.orientation(),
            device.page_bounds.orientation(),
        ) {
            Ok(rect) => (rect, false),
            // A page with no extent has nothing to place on the full sheet either
            Err(e @ GeometryError::DegeneratePage { .. }) => {
                warn!("Page {}: {}; skipping", page_index, e);
                return PageStatus::Degenerate(e);
            }
            Err(e) => {
                let rect = full_printable_area(device.page_bounds, device.hard_margins);
                if !rect.has_positive_area() {
                    warn!("Page {}: {}; sheet has no printable area", page_index, e);
                    return PageStatus::Degenerate(e);
                }
                warn!("Page {}: {}; using the full sheet", page_index, e);
                (rect, true)
            }
        };

        let pixels = destination.to_device_pixels(device.dpi);
        if pixels.is_empty() {
            warn!(
                "Page {}: {:?} rounds to {:?}; skipping",
                page_index, destination, pixels
            );
            return PageStatus::Degenerate(GeometryError::EmptyPixelRect {
                width: pixels.width,
                height: pixels.height,
            });
        }

        debug!(
            "Page {}: {:.1}x{:.1}pt -> {:?} ({:?} at {}x{} dpi)",
            page_index,
            page_size.width,
            page_size.height,
            destination,
            pixels,
            device.dpi.x,
            device.dpi.y
        );

        match self.document.render(
            page_index,
            surface,
            device.dpi,
            pixels,
            RenderFlags::FOR_PRINTING | RenderFlags::ANNOTATIONS,
        ) {
            Ok(()) => PageStatus::Rendered {
                destination,
                pixels,
                fallback,
            },
            Err(e) => {
                error!("Page {}: render failed: {}", page_index, e);
                PageStatus::RenderFailed(e.to_string())
            }
        }
    }
}
