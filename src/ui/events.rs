//! Console rendering of batch progress.

use std::io::Write;

use dotship::domain::ports::{BatchEvent, BatchEventSink};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::terminal::TerminalCapabilities;

/// Prints one line per batch event to stdout.
pub struct ConsoleBatchSink {
    supports_color: bool,
    supports_unicode: bool,
}

impl ConsoleBatchSink {
    pub fn new(caps: &TerminalCapabilities) -> Self {
        Self {
            supports_color: caps.supports_color,
            supports_unicode: caps.supports_unicode,
        }
    }

    pub fn format(&self, event: &BatchEvent) -> String {
        let color = self.supports_color;
        let unicode = self.supports_unicode;
        match event {
            BatchEvent::Started {
                config,
                enabled,
                skipped,
            } => format!(
                "{} Batch {} ({} enabled, {} skipped)",
                Icon::Deploy.colored(color, unicode),
                ColoredText::info(config.display().to_string()).render(color),
                enabled,
                skipped
            ),
            BatchEvent::ProjectStarted { index, total, path } => format!(
                "{} [{}/{}] {}",
                Icon::Progress.colored(color, unicode),
                index,
                total,
                path.display()
            ),
            BatchEvent::ProjectSucceeded { index, path } => format!(
                "{} [{}] {}",
                Icon::Success.colored(color, unicode),
                index,
                path.display()
            ),
            BatchEvent::ProjectFailed { index, path, error } => format!(
                "{} [{}] {}: {}",
                Icon::Error.colored(color, unicode),
                index,
                path.display(),
                ColoredText::error(error.as_str()).render(color)
            ),
            BatchEvent::Completed { succeeded, failed } => format!(
                "{} {} succeeded, {} failed",
                Icon::Arrow.colored(color, unicode),
                succeeded,
                failed
            ),
        }
    }
}

impl BatchEventSink for ConsoleBatchSink {
    fn on_event(&self, event: BatchEvent) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", self.format(&event));
    }
}
