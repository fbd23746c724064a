//! What a project produces, and therefore where it goes

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Class library, published as a NuGet package
    Library,
    /// Web host, deployed as a systemd service behind nginx
    Service,
    /// Static web root, copied into the publish folder
    FrontEnd,
}

impl OutputKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            OutputKind::Library => "library",
            OutputKind::Service => "service",
            OutputKind::FrontEnd => "front-end",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
