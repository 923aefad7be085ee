//! Launcher bar (top row) and taskbar (bottom row) around the desktop.
//!
//! Hit rectangles are recorded while rendering, so hit-tests answer against
//! what was last drawn.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
};

use crate::apps::{AppKind, icon_for};
use crate::ui::{UiFrame, rect_contains, truncate_to_width};
use crate::window::{TaskbarEntry, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarHit {
    /// The `≡` menu button.
    Menu,
    /// An item in the open launcher menu.
    MenuItem(AppKind),
    /// A quick-launch button on the top bar.
    Launcher(AppKind),
    /// A window entry on the bottom bar.
    Window(WindowId),
    MouseCapture,
}

#[derive(Debug)]
pub struct Taskbar {
    top: Rect,
    bottom: Rect,
    menu_rect: Option<Rect>,
    menu_bounds: Option<Rect>,
    menu_item_hits: Vec<(AppKind, Rect)>,
    launcher_hits: Vec<(AppKind, Rect)>,
    window_hits: Vec<(WindowId, Rect)>,
    mouse_capture_rect: Option<Rect>,
    hostname: String,
}

impl Taskbar {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            top: Rect::default(),
            bottom: Rect::default(),
            menu_rect: None,
            menu_bounds: None,
            menu_item_hits: Vec::new(),
            launcher_hits: Vec::new(),
            window_hits: Vec::new(),
            mouse_capture_rect: None,
            hostname: hostname.into(),
        }
    }

    /// Split `area` into the top bar, the bottom bar and the desktop between
    /// them.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect, Rect) {
        let top_h = 1u16.min(area.height);
        let bottom_h = 1u16.min(area.height.saturating_sub(top_h));
        let top = Rect {
            height: top_h,
            ..area
        };
        let bottom = Rect {
            x: area.x,
            y: area.bottom().saturating_sub(bottom_h),
            width: area.width,
            height: bottom_h,
        };
        let desktop = Rect {
            x: area.x,
            y: area.y.saturating_add(top_h),
            width: area.width,
            height: area.height.saturating_sub(top_h).saturating_sub(bottom_h),
        };
        self.top = top;
        self.bottom = bottom;
        (top, bottom, desktop)
    }

    pub fn begin_frame(&mut self) {
        self.menu_rect = None;
        self.menu_bounds = None;
        self.menu_item_hits.clear();
        self.launcher_hits.clear();
        self.window_hits.clear();
        self.mouse_capture_rect = None;
    }

    fn bar_style() -> Style {
        Style::default()
            .bg(crate::theme::panel_bg())
            .fg(crate::theme::menu_fg())
    }

    pub fn render_top(&mut self, frame: &mut UiFrame<'_>, menu_open: bool, mouse_capture: bool) {
        let area = self.top;
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.fill(area, Self::bar_style());
        let max_x = area.right();
        let y = area.y;
        let mut x = area.x;

        const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
        let menu_label = format!(" ≡ {CRATE_NAME} ");
        let menu_width = menu_label.chars().count() as u16;
        let menu_style = if menu_open {
            Style::default()
                .bg(crate::theme::menu_selected_bg())
                .fg(crate::theme::menu_selected_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Self::bar_style().add_modifier(Modifier::BOLD)
        };
        frame.set_string(x, y, &menu_label, menu_style);
        self.menu_rect = Some(Rect::new(x, y, menu_width.min(area.width), 1));
        x = x.saturating_add(menu_width + 1);

        let indicator = "[ mouse ]";
        let indicator_width = indicator.chars().count() as u16;
        let indicator_x = max_x.saturating_sub(indicator_width);

        for app in AppKind::ALL {
            let icon = icon_for(app);
            let chunk = format!(" {} {} ", icon.glyph, app.title());
            let width = chunk.chars().count() as u16;
            if x.saturating_add(width) > indicator_x {
                break;
            }
            frame.set_string(x, y, &chunk, Self::bar_style());
            frame.set_string(
                x + 1,
                y,
                &icon.glyph.to_string(),
                Self::bar_style().fg(icon.color()),
            );
            self.launcher_hits.push((app, Rect::new(x, y, width, 1)));
            x = x.saturating_add(width);
        }

        if indicator_x >= x {
            let style = if mouse_capture {
                Self::bar_style()
                    .fg(crate::theme::success_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Self::bar_style().fg(crate::theme::panel_inactive_fg())
            };
            frame.set_string(indicator_x, y, indicator, style);
            self.mouse_capture_rect = Some(Rect::new(indicator_x, y, indicator_width, 1));
        }
    }

    pub fn render_bottom(&mut self, frame: &mut UiFrame<'_>, entries: &[TaskbarEntry]) {
        let area = self.bottom;
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.fill(area, Self::bar_style());

        // Right-aligned host info; window entries stop short of it.
        const PKG_NAME: &str = env!("CARGO_PKG_NAME");
        const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
        let info = format!(
            " {PKG_NAME} {PKG_VERSION} · {} · {} ",
            std::env::consts::OS,
            self.hostname
        );
        let info = truncate_to_width(&info, area.width as usize / 2);
        let info_width = info.chars().count() as u16;
        let info_x = area.right().saturating_sub(info_width);
        frame.set_string(
            info_x,
            area.y,
            &info,
            Self::bar_style().fg(crate::theme::panel_inactive_fg()),
        );

        let mut x = area.x;
        for entry in entries {
            let max_label = info_x.saturating_sub(x).saturating_sub(4) as usize;
            if max_label == 0 {
                break;
            }
            let label = truncate_to_width(&entry.title, max_label.min(18));
            let chunk = format!(" {} {} ", entry.icon.glyph, label);
            let width = chunk.chars().count() as u16;
            if x.saturating_add(width) > info_x {
                break;
            }
            let style = if entry.focused {
                Style::default()
                    .bg(crate::theme::menu_selected_bg())
                    .fg(crate::theme::menu_selected_fg())
                    .add_modifier(Modifier::BOLD)
            } else if entry.minimized {
                Self::bar_style()
                    .fg(crate::theme::panel_inactive_fg())
                    .add_modifier(Modifier::ITALIC)
            } else {
                Self::bar_style()
            };
            frame.set_string(x, area.y, &chunk, style);
            self.window_hits.push((entry.id, Rect::new(x, area.y, width, 1)));
            x = x.saturating_add(width + 1);
        }
    }

    /// Drop-down launcher anchored under the menu button.
    pub fn render_menu(&mut self, frame: &mut UiFrame<'_>, bounds: Rect, selected: usize) {
        let Some(anchor) = self.menu_rect else {
            return;
        };
        let start_x = anchor.x;
        let start_y = anchor.y.saturating_add(1);
        let label_width = AppKind::ALL
            .iter()
            .map(|app| app.title().chars().count() as u16)
            .max()
            .unwrap_or(1);
        let width = (label_width + 6).min(bounds.right().saturating_sub(start_x));
        let height = (AppKind::ALL.len() as u16 + 2).min(bounds.bottom().saturating_sub(start_y));
        if width < 3 || height < 3 {
            return;
        }
        let menu = Rect::new(start_x, start_y, width, height);
        let menu_style = Style::default()
            .bg(crate::theme::menu_bg())
            .fg(crate::theme::menu_fg());
        let selected_style = Style::default()
            .bg(crate::theme::menu_selected_bg())
            .fg(crate::theme::menu_selected_fg())
            .add_modifier(Modifier::BOLD);
        frame.fill(menu, menu_style);
        self.menu_bounds = Some(menu);
        let inner_width = width.saturating_sub(2) as usize;
        for (idx, app) in AppKind::ALL.iter().enumerate() {
            let y = start_y.saturating_add(idx as u16 + 1);
            if y >= menu.bottom().saturating_sub(1) {
                break;
            }
            let marker = if idx == selected { ">" } else { " " };
            let line = format!("{marker} {} {}", icon_for(*app).glyph, app.title());
            let style = if idx == selected {
                selected_style
            } else {
                menu_style
            };
            frame.set_string(
                start_x + 1,
                y,
                &truncate_to_width(&line, inner_width),
                style,
            );
            self.menu_item_hits.push((*app, Rect::new(start_x, y, width, 1)));
        }
    }

    pub fn menu_contains_point(&self, column: u16, row: u16) -> bool {
        self.menu_bounds
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<TaskbarHit> {
        if let Some((app, _)) = self
            .menu_item_hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
        {
            return Some(TaskbarHit::MenuItem(*app));
        }
        if self
            .menu_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            return Some(TaskbarHit::Menu);
        }
        if self
            .mouse_capture_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            return Some(TaskbarHit::MouseCapture);
        }
        if let Some((app, _)) = self
            .launcher_hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
        {
            return Some(TaskbarHit::Launcher(*app));
        }
        self.window_hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(id, _)| TaskbarHit::Window(*id))
    }
}
