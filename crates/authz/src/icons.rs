//! Icon key resolution.
//!
//! The identity service tags modules with symbolic icon keys. Resolution is
//! a total function: unknown or missing keys fall back to the default icon,
//! so a menu never fails to render over an unresolvable key.

use serde::Serialize;

/// Renderable icon handle for the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    Dashboard,
    Calendar,
    Users,
    FileText,
    Award,
    Folder,
    Template,
    Signature,
    Settings,
    BarChart,
    #[default]
    Default,
}

impl IconKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKind::Dashboard => "dashboard",
            IconKind::Calendar => "calendar",
            IconKind::Users => "users",
            IconKind::FileText => "file-text",
            IconKind::Award => "award",
            IconKind::Folder => "folder",
            IconKind::Template => "template",
            IconKind::Signature => "signature",
            IconKind::Settings => "settings",
            IconKind::BarChart => "bar-chart",
            IconKind::Default => "circle",
        }
    }
}

/// Map a symbolic icon key to a renderable icon. Total: never fails.
pub fn resolve_icon(key: Option<&str>) -> IconKind {
    match key {
        Some("home") | Some("dashboard") => IconKind::Dashboard,
        Some("calendar") | Some("event") => IconKind::Calendar,
        Some("users") | Some("participants") => IconKind::Users,
        Some("file-text") | Some("document") => IconKind::FileText,
        Some("award") | Some("certificate") => IconKind::Award,
        Some("folder") | Some("category") => IconKind::Folder,
        Some("layout-template") | Some("template") => IconKind::Template,
        Some("pen-tool") | Some("signature") => IconKind::Signature,
        Some("settings") => IconKind::Settings,
        Some("bar-chart") | Some("report") => IconKind::BarChart,
        _ => IconKind::Default,
    }
}
