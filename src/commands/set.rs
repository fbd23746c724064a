//! Set command - persist NuGet credentials in the global store

use anyhow::{bail, Context, Result};

use dotship::infrastructure::config::{KEY_LOCAL_DEBUG_STORAGE, KEY_NUGET_AUTH_TOKEN_PATH};
use dotship::infrastructure::StoreScope;
use dotship::presentation::factory;

use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::detect_capabilities;

pub fn cmd_set(
    nuget_debug_package_path: Option<&str>,
    nuget_key_path: Option<&str>,
    shared: bool,
) -> Result<i32> {
    let values = collect_values(nuget_debug_package_path, nuget_key_path);
    if values.is_empty() {
        bail!("Nothing to set. Pass --nuget-debug-package-path and/or --nuget-key-path.");
    }

    let scope = if shared {
        StoreScope::Shared
    } else {
        StoreScope::Local
    };
    let path = factory::create_global_store()
        .set(scope, &values)
        .context("Failed to update the global settings")?;

    let caps = detect_capabilities();
    for (key, value) in &values {
        println!(
            "{} {} = {}",
            Icon::Success.colored(caps.supports_color, caps.supports_unicode),
            key,
            value
        );
    }
    println!("  saved to {}", path.display());
    Ok(0)
}

fn collect_values(
    nuget_debug_package_path: Option<&str>,
    nuget_key_path: Option<&str>,
) -> Vec<(&'static str, String)> {
    [
        (KEY_LOCAL_DEBUG_STORAGE, nuget_debug_package_path),
        (KEY_NUGET_AUTH_TOKEN_PATH, nuget_key_path),
    ]
    .into_iter()
    .filter_map(|(key, value)| {
        let value = value?.trim();
        (!value.is_empty()).then(|| (key, value.to_string()))
    })
    .collect()
}
