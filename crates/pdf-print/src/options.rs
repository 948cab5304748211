use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Print job configuration, fixed for the lifetime of one job
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrintOptions {
    // Placement
    pub scaling: ScalingMode,
    pub margin_mode: MarginMode,

    // Orientation
    pub auto_orientation: bool,

    // Page range, 1-based inclusive; 0 leaves that end open
    pub from_page: u32,
    pub to_page: u32,
}

impl PrintOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PrintError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PrintError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if let ScalingMode::CustomScale(0) = self.scaling {
            return Err(PrintError::Config(
                "Custom scale must be at least 1 percent".to_string(),
            ));
        }

        if self.from_page != 0 && self.to_page != 0 && self.from_page > self.to_page {
            return Err(PrintError::Config(format!(
                "Page range {}-{} is reversed",
                self.from_page, self.to_page
            )));
        }

        Ok(())
    }

    /// Index of the first page to print
    pub fn first_page_index(&self) -> usize {
        self.from_page.saturating_sub(1) as usize
    }

    /// One past the index of the last page to print, for a document of
    /// `page_count` pages
    pub fn effective_to_page(&self, page_count: usize) -> usize {
        if self.to_page == 0 {
            page_count
        } else {
            (self.to_page as usize).min(page_count)
        }
    }
}
