use crate::errors::SpoonError;
use arboard::Clipboard;
use tracing::debug;

/// Where rendered exports are delivered.
pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<(), SpoonError>;
}

/// The system clipboard, opened on first write.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
    last_text: Option<String>,
}

impl SystemClipboard {
    /// On X11 and Wayland the text is only served while this process owns the
    /// clipboard, so block until another application (or a clipboard manager)
    /// takes it over. Returns immediately when nothing was copied, and on
    /// other platforms.
    pub fn hold(&mut self) -> Result<(), SpoonError> {
        let Some(text) = self.last_text.take() else {
            debug!("Nothing copied, not holding the clipboard");
            return Ok(());
        };
        self.hold_text(text)
    }

    #[cfg(target_os = "linux")]
    fn hold_text(&mut self, text: String) -> Result<(), SpoonError> {
        use arboard::SetExtLinux;

        let Some(clipboard) = self.clipboard.as_mut() else {
            return Ok(());
        };
        tracing::info!("Keeping the clipboard alive until it is taken over (Ctrl+C to stop)");
        clipboard
            .set()
            .wait()
            .text(text)
            .map_err(|e| SpoonError::ClipboardWriteError(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn hold_text(&mut self, _text: String) -> Result<(), SpoonError> {
        Ok(())
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<(), SpoonError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => {
                debug!("Initializing clipboard");
                Clipboard::new().map_err(|e| SpoonError::ClipboardInitError(e.to_string()))?
            }
        };
        let clipboard = self.clipboard.insert(clipboard);
        clipboard
            .set_text(text.clone())
            .map_err(|e| SpoonError::ClipboardWriteError(e.to_string()))?;
        self.last_text = Some(text);
        Ok(())
    }
}

/// Keeps the last delivered text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: String) -> Result<(), SpoonError> {
        self.contents = Some(text);
        Ok(())
    }
}
