use crate::document::{PrintableDocument, RenderFlags};
use crate::layout::{Dpi, PageSize, PixelRect};
use crate::types::{PrintError, Result};
use lopdf::{Document, ObjectId};

use super::sheet::SheetWriter;
use super::xobject::{MediaBox, get_media_box};

/// A loaded PDF, printable onto a [`SheetWriter`]
pub struct SpoolDocument {
    source: Document,
    page_ids: Vec<ObjectId>,
    media_boxes: Vec<MediaBox>,
}

impl SpoolDocument {
    pub fn new(source: Document) -> Result<Self> {
        let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
        let media_boxes = page_ids
            .iter()
            .map(|&id| get_media_box(&source, id))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source,
            page_ids,
            media_boxes,
        })
    }
}

impl PrintableDocument for SpoolDocument {
    type Surface = SheetWriter;
    type Error = PrintError;

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_size(&self, index: usize) -> PageSize {
        let [llx, lly, urx, ury] = self.media_boxes[index];
        PageSize::new(urx - llx, ury - lly)
    }

    // Annotations are not flattened onto the sheet; only page content is
    // drawn, so the flags are accepted as given.
    fn render(
        &self,
        index: usize,
        surface: &mut SheetWriter,
        dpi: Dpi,
        rect: PixelRect,
        _flags: RenderFlags,
    ) -> Result<()> {
        let page_id = *self
            .page_ids
            .get(index)
            .ok_or_else(|| PrintError::Config(format!("Page {} does not exist", index)))?;
        surface.place_page(&self.source, page_id, self.media_boxes[index], rect, dpi)
    }
}
