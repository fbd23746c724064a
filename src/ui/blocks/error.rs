use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// An error with optional remediation hints.
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    message: String,
    details: Vec<String>,
    fixes: Vec<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
            fixes: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fixes.push(fix.into());
        self
    }

    pub fn with_fixes<I, S>(mut self, fixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fixes.extend(fixes.into_iter().map(Into::into));
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut out = format!(
            "{} {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error("ERROR").bold().render(supports_color)
        );
        for line in self.message.lines() {
            out.push_str(&format!("  {}\n", line));
        }
        for detail in &self.details {
            out.push_str(&format!(
                "  {}\n",
                ColoredText::dim(detail.as_str()).render(supports_color)
            ));
        }

        if !self.fixes.is_empty() {
            out.push('\n');
            for fix in &self.fixes {
                out.push_str(&format!(
                    "  {} {}\n",
                    ColoredText::info("FIX:").render(supports_color),
                    fix
                ));
            }
        }

        out
    }
}
