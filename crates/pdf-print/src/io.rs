//! Reading source PDFs and writing printed sheets

use crate::types::*;
use log::debug;
use lopdf::Document;
use std::path::Path;

/// Load the document to print. Parsing runs on the blocking pool.
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Serialize the printed sheets and write them to `path`.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let encoded = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    })
    .await??;

    let path = path.as_ref();
    debug!("Writing {} bytes to {}", encoded.len(), path.display());
    tokio::fs::write(path, encoded).await?;
    Ok(())
}
