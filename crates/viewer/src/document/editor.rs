//! Headless stand-in for the text-editor widget: a gettable/settable
//! document buffer with a scroll offset and line-addressable highlighting.

use std::time::{Duration, Instant};

/// How long a line highlight stays visible before it auto-clears.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq)]
struct LineHighlight {
    start: usize,
    end: usize,
    expires: Instant,
}

/// The text-document capability consumed by the viewer core.
///
/// The embedding shell mirrors this buffer into whatever editor widget it
/// uses; the engine only ever talks to this type.
#[derive(Debug, Default)]
pub struct EditorBuffer {
    text: String,
    scroll_line: usize,
    highlight: Option<LineHighlight>,
    changed: bool,
}

impl EditorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole buffer and reset the scroll position.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.scroll_line = 0;
        self.changed = true;
    }

    /// Replace the buffer without touching the scroll position. This is
    /// the patch-bridge path: mid-drag rewrites must not yank the view.
    pub fn set_text_preserving_scroll(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.scroll_line = self.scroll_line.min(self.line_count().saturating_sub(1));
        self.changed = true;
    }

    pub fn scroll_line(&self) -> usize {
        self.scroll_line
    }

    /// Scroll to a line, clamped to the buffer's extent.
    pub fn set_scroll_line(&mut self, line: usize) {
        self.scroll_line = line.min(self.line_count().saturating_sub(1));
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Consume the change-notification flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Highlight a line range (0-based, inclusive). The highlight clears
    /// itself [`HIGHLIGHT_DURATION`] after `now`.
    pub fn highlight_lines(&mut self, start: usize, end: usize, now: Instant) {
        self.highlight = Some(LineHighlight {
            start,
            end,
            expires: now + HIGHLIGHT_DURATION,
        });
    }

    /// The active highlight range, expiring it when its time is up.
    pub fn active_highlight(&mut self, now: Instant) -> Option<(usize, usize)> {
        match self.highlight {
            Some(h) if now < h.expires => Some((h.start, h.end)),
            Some(_) => {
                self.highlight = None;
                None
            }
            None => None,
        }
    }
}
