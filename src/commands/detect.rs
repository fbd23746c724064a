//! Detect command - report the publish mode without publishing

use std::path::Path;

use anyhow::{Context, Result};

use dotship::application::detect;
use dotship::domain::entities::DetectionMode;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::terminal::detect_capabilities;

pub fn cmd_detect(working_dir: &Path) -> Result<i32> {
    let caps = detect_capabilities();
    let color = caps.supports_color;
    let unicode = caps.supports_unicode;

    let result = detect(working_dir)
        .with_context(|| format!("Failed to scan {}", working_dir.display()))?;

    let (icon, mode) = match result.mode {
        DetectionMode::Batch => (Icon::Success, ColoredText::success("batch")),
        DetectionMode::Single => (Icon::Success, ColoredText::success("single project")),
        DetectionMode::Ambiguous => (Icon::Warning, ColoredText::warning("ambiguous")),
        DetectionMode::NoConfiguration => {
            (Icon::Warning, ColoredText::warning("no configuration"))
        }
    };

    println!(
        "{} Mode: {}",
        icon.colored(color, unicode),
        mode.bold().render(color)
    );
    println!("  {}", result.message);
    if result.is_success() {
        for name in result.project_file_names() {
            println!("  {} {}", Icon::Pending.colored(color, unicode), name);
        }
    }
    for hint in &result.hints {
        println!(
            "  {} {}",
            Icon::Arrow.colored(color, unicode),
            ColoredText::dim(hint.as_str()).render(color)
        );
    }

    Ok(if result.is_success() { 0 } else { 1 })
}
