//! Hosted application panels.
//!
//! Every window hosts exactly one panel, picked by its [`AppKind`]. Panel
//! data is canned; anything that would come from a backend is served by a
//! [`DelayedFeed`] that resolves after a fixed delay.

mod catalog;
pub mod feed;
pub mod tabbed;
pub mod terminal;
pub mod wizard;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ratatui::style::Color;
use thiserror::Error;

use crate::components::Component;
use crate::tracing_sub::LogBuffer;
use crate::window::Size;

pub use feed::{DelayedFeed, FeedSource, FeedState};
pub use tabbed::{Tab, TabbedPanel};
pub use terminal::TerminalPanel;
pub use wizard::{WizardPanel, WizardStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppKind {
    AiStudio,
    RagConsole,
    EtlStudio,
    McpDashboard,
    VirtualCampus,
    ServerAdmin,
    Terminal,
}

impl AppKind {
    /// Launcher order.
    pub const ALL: [AppKind; 7] = [
        AppKind::AiStudio,
        AppKind::RagConsole,
        AppKind::EtlStudio,
        AppKind::McpDashboard,
        AppKind::VirtualCampus,
        AppKind::ServerAdmin,
        AppKind::Terminal,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            AppKind::AiStudio => "AI Studio",
            AppKind::RagConsole => "RAG Console",
            AppKind::EtlStudio => "ETL Studio",
            AppKind::McpDashboard => "MCP Dashboard",
            AppKind::VirtualCampus => "Virtual Campus",
            AppKind::ServerAdmin => "Server Admin",
            AppKind::Terminal => "Terminal",
        }
    }

    /// Short name used on the command line and by the terminal's `apps`.
    pub const fn slug(self) -> &'static str {
        match self {
            AppKind::AiStudio => "ai-studio",
            AppKind::RagConsole => "rag-console",
            AppKind::EtlStudio => "etl-studio",
            AppKind::McpDashboard => "mcp-dashboard",
            AppKind::VirtualCampus => "virtual-campus",
            AppKind::ServerAdmin => "server-admin",
            AppKind::Terminal => "terminal",
        }
    }

    pub const fn default_size(self) -> Size {
        match self {
            AppKind::AiStudio => Size::new(60, 18),
            AppKind::RagConsole => Size::new(64, 18),
            AppKind::EtlStudio => Size::new(62, 17),
            AppKind::McpDashboard => Size::new(58, 16),
            AppKind::VirtualCampus => Size::new(56, 16),
            AppKind::ServerAdmin => Size::new(70, 20),
            AppKind::Terminal => Size::new(64, 18),
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown app `{0}` (expected one of: {names})", names = slugs())]
pub struct UnknownApp(pub String);

fn slugs() -> String {
    AppKind::ALL
        .iter()
        .map(|app| app.slug())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for AppKind {
    type Err = UnknownApp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        AppKind::ALL
            .into_iter()
            .find(|app| app.slug() == wanted)
            .ok_or_else(|| UnknownApp(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub glyph: char,
    pub accent: (u8, u8, u8),
}

impl Icon {
    pub fn color(&self) -> Color {
        crate::theme::rgb_to_color(self.accent)
    }
}

/// Icon lookup table keyed by app kind.
pub fn icon_for(app: AppKind) -> Icon {
    let (glyph, accent) = match app {
        AppKind::AiStudio => ('✦', (186, 104, 255)),
        AppKind::RagConsole => ('⌕', (80, 200, 255)),
        AppKind::EtlStudio => ('⇄', (255, 170, 60)),
        AppKind::McpDashboard => ('⚙', (120, 220, 140)),
        AppKind::VirtualCampus => ('⌂', (255, 110, 140)),
        AppKind::ServerAdmin => ('▣', (230, 230, 90)),
        AppKind::Terminal => ('$', (200, 200, 200)),
    };
    Icon { glyph, accent }
}

/// Shared collaborators handed to every panel at construction.
#[derive(Debug, Clone)]
pub struct PanelDeps {
    pub feed_delay: Duration,
    pub logs: LogBuffer,
    pub hostname: String,
}

impl PanelDeps {
    pub fn new(feed_delay: Duration, logs: LogBuffer) -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string());
        Self {
            feed_delay,
            logs,
            hostname,
        }
    }
}

/// Build the panel hosted by a fresh `kind` window.
pub fn build_panel(kind: AppKind, deps: &PanelDeps) -> Box<dyn Component> {
    match kind {
        AppKind::AiStudio => Box::new(WizardPanel::new(deps.feed_delay)),
        AppKind::Terminal => Box::new(TerminalPanel::new(deps.hostname.clone())),
        tabbed => Box::new(catalog::tabbed_panel(tabbed, deps)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

    #[test]
    fn slugs_round_trip_through_from_str() {
        for app in AppKind::ALL {
            assert_eq!(app.slug().parse::<AppKind>(), Ok(app));
        }
        assert_eq!("Server_Admin".parse::<AppKind>(), Ok(AppKind::ServerAdmin));
    }

    #[test]
    fn unknown_app_lists_choices() {
        let err = "spreadsheet".parse::<AppKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("spreadsheet"));
        assert!(msg.contains("terminal"));
    }

    #[test]
    fn icons_are_distinct() {
        let mut glyphs: Vec<char> = AppKind::ALL.iter().map(|a| icon_for(*a).glyph).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), AppKind::ALL.len());
    }

    #[test]
    fn default_sizes_respect_minimums() {
        for app in AppKind::ALL {
            let size = app.default_size();
            assert!(size.width >= MIN_WINDOW_WIDTH);
            assert!(size.height >= MIN_WINDOW_HEIGHT);
        }
    }
}
