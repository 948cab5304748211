//! Page geometry resolution
//!
//! Pure functions that decide, per page:
//! - which orientation to request from the driver
//! - where on the sheet the page content is drawn, and at what size

mod destination;
mod orientation;
mod types;

pub use destination::*;
pub use orientation::*;
pub use types::*;
