//! Init-batch command - write a sample `dotship-solution.json`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use dialoguer::Confirm;

use dotship::application::batch_config_path;
use dotship::domain::entities::BatchConfig;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::terminal::detect_capabilities;

pub fn cmd_init_batch(output: Option<&Path>, force: bool, working_dir: &Path) -> Result<i32> {
    let caps = detect_capabilities();
    let path = batch_config_path(output, None, working_dir);

    if path.exists() && !force {
        if !caps.can_prompt() {
            bail!(
                "{} already exists. Use --force to overwrite.",
                path.display()
            );
        }
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !overwrite {
            println!(
                "{} Kept existing {}",
                Icon::Warning.colored(caps.supports_color, caps.supports_unicode),
                path.display()
            );
            return Ok(0);
        }
    }

    write_sample(&path)?;

    println!(
        "{} Created {}",
        Icon::Success.colored(caps.supports_color, caps.supports_unicode),
        ColoredText::info(path.display().to_string()).render(caps.supports_color)
    );
    println!(
        "  {} Edit the project paths, then run: dotship --solution {}",
        Icon::Arrow.colored(caps.supports_color, caps.supports_unicode),
        solution_dir(&path).display()
    );
    Ok(0)
}

fn write_sample(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&BatchConfig::sample())
        .context("Failed to serialize sample batch config")?;
    fs::write(path, json + "\n").with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn solution_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
