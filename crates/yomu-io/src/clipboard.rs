use anyhow::Context;
use arboard::Clipboard;

/// Destination of "copy text" from the result panel
pub trait TextSink: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<(), anyhow::Error>;
}

/// System clipboard; a new handle per copy since copies are rare
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl TextSink for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), anyhow::Error> {
        let mut clipboard = Clipboard::new().context("Failed to open clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to write clipboard")?;
        Ok(())
    }
}
