pub mod constants;
mod document;
mod driver;
mod io;
pub mod layout;
mod options;
pub mod render;
mod sequencer;
mod spool;
mod types;

pub use document::{PrintableDocument, RenderFlags};
pub use driver::{
    DeviceSettings, DriverPageSettings, PageSettingsRequest, PrintDriver, VirtualPrinter,
};
pub use io::{load_pdf, save_pdf};
pub use layout::{
    DestinationRect, Dpi, GeometryError, HardMargins, PageSize, PixelRect, PrintableArea,
    full_printable_area, resolve_destination, resolve_orientation,
};
pub use options::*;
pub use render::{SheetWriter, SpoolDocument};
pub use sequencer::{
    PageReport, PageStatus, PrintCursor, PrintSequencer, PrintSequencerBuilder, SequencerState,
};
pub use spool::{JobSummary, PrintSurface, run_print_job};
pub use types::*;
