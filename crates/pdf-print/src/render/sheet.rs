//! Print-to-PDF surface
//!
//! [`SheetWriter`] stands in for a printer's graphics context: each sheet
//! becomes one output page sized to the paper the device reported, and
//! rendered pages are drawn onto it in device coordinates (origin at the
//! hard margin corner, y growing downward).

use crate::constants::{hundredths_to_pt, pixels_to_pt};
use crate::driver::DeviceSettings;
use crate::layout::{Dpi, PixelRect};
use crate::spool::PrintSurface;
use crate::types::{PrintError, Result};
use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::{MediaBox, create_page_xobject};

struct Sheet {
    width_pt: f64,
    height_pt: f64,
    /// Device origin offset from the paper's top-left corner, in points
    origin_x_pt: f64,
    origin_y_pt: f64,
    content: String,
    xobjects: Dictionary,
    placed: usize,
}

/// Collects rendered sheets into an output PDF.
///
/// One writer is meant to be fed pages from a single source document;
/// XObjects are cached by source page id.
pub struct SheetWriter {
    output: Document,
    pages_id: ObjectId,
    page_refs: Vec<Object>,
    resource_cache: HashMap<ObjectId, ObjectId>,
    xobject_cache: HashMap<ObjectId, ObjectId>,
    current: Option<Sheet>,
}

impl Default for SheetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetWriter {
    pub fn new() -> Self {
        let mut output = Document::with_version("1.7");
        let pages_id = output.new_object_id();
        Self {
            output,
            pages_id,
            page_refs: Vec::new(),
            resource_cache: HashMap::new(),
            xobject_cache: HashMap::new(),
            current: None,
        }
    }

    /// Number of sheets written so far
    pub fn sheet_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Draw a source page into `rect` (device pixels at `dpi`) on the
    /// current sheet, stretching its MediaBox to fill the rectangle.
    pub fn place_page(
        &mut self,
        source: &Document,
        page_id: ObjectId,
        media_box: MediaBox,
        rect: PixelRect,
        dpi: Dpi,
    ) -> Result<()> {
        let [llx, lly, urx, ury] = media_box;
        if !(urx - llx > 0.0 && ury - lly > 0.0) {
            return Err(PrintError::Config(format!(
                "Page MediaBox {:?} has no area",
                media_box
            )));
        }
        if !dpi.is_valid() || rect.is_empty() {
            return Err(PrintError::Config(format!(
                "Cannot place page into {:?} at {}x{} dpi",
                rect, dpi.x, dpi.y
            )));
        }

        let Some(sheet) = self.current.as_mut() else {
            return Err(PrintError::Config(
                "No sheet started on the print surface".to_string(),
            ));
        };

        let xobject_id = match self.xobject_cache.get(&page_id) {
            Some(&id) => id,
            None => {
                let id = create_page_xobject(
                    &mut self.output,
                    source,
                    page_id,
                    media_box,
                    &mut self.resource_cache,
                )?;
                self.xobject_cache.insert(page_id, id);
                id
            }
        };

        let name = format!("P{}", sheet.placed);
        sheet
            .xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));

        let x_pt = sheet.origin_x_pt + pixels_to_pt(rect.x, dpi.x);
        let top_pt = sheet.origin_y_pt + pixels_to_pt(rect.y, dpi.y);
        let width_pt = pixels_to_pt(rect.width, dpi.x);
        let height_pt = pixels_to_pt(rect.height, dpi.y);
        let y_pt = sheet.height_pt - top_pt - height_pt;

        sheet
            .content
            .push_str(&placement_command(&name, media_box, x_pt, y_pt, width_pt, height_pt));
        sheet.placed += 1;
        Ok(())
    }

    /// Finish the output document.
    pub fn finish(mut self) -> Document {
        self.close_sheet();

        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        self.output
    }

    fn close_sheet(&mut self) {
        let Some(sheet) = self.current.take() else {
            return;
        };

        if sheet.placed == 0 {
            debug!("Dropping blank sheet");
            return;
        }

        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), sheet.content.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(sheet.xobjects));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(sheet.width_pt as f32),
                Object::Real(sheet.height_pt as f32),
            ]),
        );
        page_dict.set("Resources", Object::Dictionary(resources));
        page_dict.set("Contents", Object::Reference(content_id));

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
    }
}

impl PrintSurface for SheetWriter {
    fn start_sheet(&mut self, device: &DeviceSettings) {
        self.close_sheet();
        self.current = Some(Sheet {
            width_pt: hundredths_to_pt(device.page_bounds.width),
            height_pt: hundredths_to_pt(device.page_bounds.height),
            origin_x_pt: hundredths_to_pt(device.hard_margins.x),
            origin_y_pt: hundredths_to_pt(device.hard_margins.y),
            content: String::new(),
            xobjects: Dictionary::new(),
            placed: 0,
        });
    }

    fn end_sheet(&mut self) {
        self.close_sheet();
    }
}

/// PDF operators drawing an XObject so that its MediaBox fills the box at
/// (`x`, `y`) with the given size, in sheet points.
fn placement_command(
    xobject_name: &str,
    media_box: MediaBox,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> String {
    let [llx, lly, urx, ury] = media_box;
    let scale_x = width / (urx - llx);
    let scale_y = height / (ury - lly);
    let translate_x = x - llx * scale_x;
    let translate_y = y - lly * scale_y;
    format!(
        "q {:.6} 0 0 {:.6} {:.4} {:.4} cm /{} Do Q\n",
        scale_x, scale_y, translate_x, translate_y, xobject_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_command_maps_media_box() {
        let cmd = placement_command("P0", [0.0, 0.0, 612.0, 792.0], 10.0, 20.0, 306.0, 396.0);
        assert_eq!(cmd, "q 0.500000 0 0 0.500000 10.0000 20.0000 cm /P0 Do Q\n");
    }

    #[test]
    fn test_placement_command_offsets_media_box_origin() {
        let cmd = placement_command("P1", [100.0, 50.0, 200.0, 150.0], 0.0, 0.0, 200.0, 200.0);
        assert_eq!(cmd, "q 2.000000 0 0 2.000000 -200.0000 -100.0000 cm /P1 Do Q\n");
    }
}
