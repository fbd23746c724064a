//! Project SDK classification

pub const SDK_WEB: &str = "Microsoft.NET.Sdk.Web";
pub const SDK_BLAZOR_WASM: &str = "Microsoft.NET.Sdk.BlazorWebAssembly";
pub const SDK_LIBRARY: &str = "Microsoft.NET.Sdk";
pub const SDK_RAZOR: &str = "Microsoft.NET.Sdk.Razor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkClass {
    /// Something that runs on the host (service or front-end)
    Executable,
    /// Something that ships as a package
    Library,
}

/// Classify a project by its `Sdk` attribute and `OutputType`.
///
/// Returns `None` for SDKs dotship does not know how to publish.
pub fn classify_sdk(sdk: &str, output_type: Option<&str>) -> Option<SdkClass> {
    let explicit_exe = output_type.is_some_and(|t| t.trim().eq_ignore_ascii_case("exe"));
    match sdk.trim() {
        SDK_WEB | SDK_BLAZOR_WASM => Some(SdkClass::Executable),
        SDK_LIBRARY | SDK_RAZOR if explicit_exe => Some(SdkClass::Executable),
        SDK_LIBRARY | SDK_RAZOR => Some(SdkClass::Library),
        _ => None,
    }
}
