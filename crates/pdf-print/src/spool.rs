//! Host loop that drives a sequencer against a driver

use crate::document::PrintableDocument;
use crate::driver::{DeviceSettings, PrintDriver};
use crate::sequencer::{PageReport, PageStatus, PrintSequencer};

/// Something a printer draws sheets onto.
pub trait PrintSurface {
    /// Called before each render with the geometry of the sheet
    fn start_sheet(&mut self, device: &DeviceSettings) {
        let _ = device;
    }

    /// Called after each render
    fn end_sheet(&mut self) {}
}

/// Per-page reports for a finished job
#[derive(Debug, Clone, Default)]
pub struct JobSummary {
    pub pages: Vec<PageReport>,
}

impl JobSummary {
    pub fn rendered_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|report| matches!(report.status, PageStatus::Rendered { .. }))
            .count()
    }

    pub fn fallback_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|report| matches!(report.status, PageStatus::Rendered { fallback: true, .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|report| {
                matches!(
                    report.status,
                    PageStatus::RenderFailed(_) | PageStatus::Degenerate(_)
                )
            })
            .count()
    }
}

/// Run a whole job: settings query, driver update and render for each page
/// until the sequencer reports no more pages.
pub fn run_print_job<D, P>(
    sequencer: &mut PrintSequencer<'_, D>,
    driver: &mut P,
    surface: &mut D::Surface,
) -> JobSummary
where
    D: PrintableDocument,
    D::Surface: PrintSurface,
    P: PrintDriver,
{
    sequencer.begin();

    let mut summary = JobSummary::default();
    loop {
        let current = driver.page_settings();
        if let Some(request) = sequencer.query_page_settings(&current) {
            driver.apply(request);
        }

        let device = driver.device_settings();
        surface.start_sheet(&device);
        let report = sequencer.render_page(&device, surface);
        surface.end_sheet();

        let has_more_pages = report.has_more_pages;
        summary.pages.push(report);
        if !has_more_pages {
            break;
        }
    }

    summary
}
