use anyhow::{Context, Result, bail};
use arboard::Clipboard;

/// Largest output we hand to the system clipboard (10MB)
const MAX_CLIPBOARD_BYTES: usize = 10 * 1024 * 1024;

/// Destination for copied output (the system clipboard, or a test double)
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard; opened on every copy so a session never holds it
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        clipboard.set_text(text).context("Failed to set clipboard contents")
    }
}

fn check_copyable(text: &str) -> Result<()> {
    if text.is_empty() {
        bail!("Nothing to copy: output is empty");
    }
    if text.len() > MAX_CLIPBOARD_BYTES {
        bail!("Output too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_BYTES);
    }
    Ok(())
}

/// Copy analysis output into `sink`
pub fn copy_output_to(text: &str, sink: &mut dyn ClipboardSink) -> Result<()> {
    check_copyable(text)?;
    sink.set_text(text)
}

/// Copy analysis output to the system clipboard.
///
/// Fails for empty or oversized text before the clipboard is opened, and when
/// no clipboard is available (headless sessions, missing X11/Wayland helpers).
pub fn copy_output(text: &str) -> Result<()> {
    copy_output_to(text, &mut SystemClipboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        copied: Vec<String>,
        fail: bool,
    }

    impl ClipboardSink for RecordingSink {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                bail!("clipboard locked");
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copies_html_output() {
        let mut sink = RecordingSink::default();
        copy_output_to("<b>No bugs found.</b>\n<ul><li>ok</li></ul>", &mut sink).unwrap();
        assert_eq!(sink.copied, vec!["<b>No bugs found.</b>\n<ul><li>ok</li></ul>"]);
    }

    #[test]
    fn test_empty_output_rejected() {
        let mut sink = RecordingSink::default();
        let err = copy_output_to("", &mut sink).unwrap_err();
        assert!(err.to_string().contains("empty"));
        assert!(sink.copied.is_empty());
    }

    #[test]
    fn test_size_limit_is_in_bytes() {
        let mut sink = RecordingSink::default();
        assert!(copy_output_to(&"a".repeat(MAX_CLIPBOARD_BYTES), &mut sink).is_ok());

        // 4-byte chars: fewer chars than the limit, more bytes
        let err = copy_output_to(&"🚀".repeat(MAX_CLIPBOARD_BYTES / 4 + 1), &mut sink).unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(err.to_string().contains("bytes"));
    }

    #[test]
    fn test_sink_failure_propagates() {
        let mut sink = RecordingSink { fail: true, ..Default::default() };
        let err = copy_output_to("text", &mut sink).unwrap_err();
        assert!(err.to_string().contains("clipboard locked"));
    }

    #[test]
    fn test_system_copy_validates_first() {
        // Validation errors come back without touching the system clipboard
        assert!(copy_output("").unwrap_err().to_string().contains("empty"));
    }
}
