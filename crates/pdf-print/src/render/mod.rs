//! Print-to-PDF rendering
//!
//! This module provides the lopdf-backed side of a print job:
//! - Reading page sizes from source MediaBoxes
//! - Creating XObjects from source pages
//! - Writing printed sheets to an output PDF

mod document;
mod sheet;
mod xobject;

pub use document::SpoolDocument;
pub use sheet::SheetWriter;
pub use xobject::{MediaBox, copy_object_deep, create_page_xobject, get_media_box};
