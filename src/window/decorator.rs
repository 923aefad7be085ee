use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::Icon;
use crate::ui::UiFrame;

const CLOSE_BUTTON: &str = "[x]";
const MAXIMIZE_BUTTON: &str = "[□]";
const RESTORE_BUTTON: &str = "[▫]";
const MINIMIZE_BUTTON: &str = "[_]";
const RESIZE_GRIP: &str = "◢";

/// Region of the window chrome under a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    None,
    Drag,
    Minimize,
    Maximize,
    Close,
    Resize,
}

/// What the decorator needs to know about a window to draw its frame.
#[derive(Debug, Clone, Copy)]
pub struct WindowChrome<'a> {
    pub title: &'a str,
    pub icon: Icon,
    pub focused: bool,
    pub maximized: bool,
}

/// Draws window frames and answers hit-tests against them.
///
/// `area` is the full window rectangle in whatever space the caller renders
/// into; `hit_test` takes coordinates in that same space.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, frame: &mut UiFrame<'_>, area: Rect, chrome: &WindowChrome<'_>);

    /// Rectangle left for hosted content once chrome is drawn.
    fn content_area(&self, area: Rect) -> Rect;

    fn hit_test(&self, area: Rect, column: u16, row: u16, maximized: bool) -> HeaderAction;
}

/// Box-drawn frame with a one-row header under the top border.
#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl DefaultDecorator {
    fn header_y(area: Rect) -> u16 {
        area.y.saturating_add(1)
    }

    fn right_edge(area: Rect) -> u16 {
        area.right().saturating_sub(1)
    }

    /// Starting columns of the (minimize, maximize, close) buttons.
    fn button_columns(area: Rect) -> Option<(u16, u16, u16)> {
        if area.width < 12 {
            return None;
        }
        let close = Self::right_edge(area).saturating_sub(3);
        let maximize = close.saturating_sub(3);
        let minimize = maximize.saturating_sub(3);
        Some((minimize, maximize, close))
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(&self, frame: &mut UiFrame<'_>, area: Rect, chrome: &WindowChrome<'_>) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let header_style = if chrome.focused {
            Style::default()
                .bg(crate::theme::decorator_header_bg())
                .fg(crate::theme::decorator_header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(crate::theme::decorator_inactive_header_bg())
                .fg(crate::theme::decorator_header_fg())
        };
        let border_style = Style::default()
            .fg(if chrome.focused {
                crate::theme::accent()
            } else {
                crate::theme::decorator_border()
            })
            .bg(crate::theme::window_bg());

        frame.fill(
            area,
            Style::default()
                .bg(crate::theme::window_bg())
                .fg(crate::theme::window_fg()),
        );

        let inner_width = area.width.saturating_sub(2) as usize;
        let left = area.x;
        let right = Self::right_edge(area);
        let bottom = area.bottom().saturating_sub(1);

        // Borders
        frame.set_string(
            left,
            area.y,
            &format!("┌{}┐", "─".repeat(inner_width)),
            border_style,
        );
        frame.set_string(
            left,
            bottom,
            &format!("└{}┘", "─".repeat(inner_width)),
            border_style,
        );
        for y in area.y.saturating_add(1)..bottom {
            frame.set_string(left, y, "│", border_style);
            frame.set_string(right, y, "│", border_style);
        }

        // Header
        let header_y = Self::header_y(area);
        if header_y < bottom {
            frame.fill(Rect::new(left + 1, header_y, area.width - 2, 1), header_style);
            frame.set_string(
                left + 1,
                header_y,
                &chrome.icon.glyph.to_string(),
                header_style.fg(chrome.icon.color()),
            );
            let buttons_x = Self::button_columns(area)
                .map(|(minimize, _, _)| minimize)
                .unwrap_or(right);
            let title_room = buttons_x.saturating_sub(left + 3) as usize;
            let title = crate::ui::truncate_to_width(chrome.title, title_room);
            frame.set_string(left + 3, header_y, &title, header_style);
            if let Some((minimize, maximize, close)) = Self::button_columns(area) {
                let maximize_label = if chrome.maximized {
                    RESTORE_BUTTON
                } else {
                    MAXIMIZE_BUTTON
                };
                frame.set_string(minimize, header_y, MINIMIZE_BUTTON, header_style);
                frame.set_string(maximize, header_y, maximize_label, header_style);
                frame.set_string(close, header_y, CLOSE_BUTTON, header_style);
            }
        }

        if !chrome.maximized {
            frame.set_string(right, bottom, RESIZE_GRIP, border_style);
        }
    }

    fn content_area(&self, area: Rect) -> Rect {
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(2),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(3),
        }
    }

    fn hit_test(&self, area: Rect, column: u16, row: u16, maximized: bool) -> HeaderAction {
        if !crate::ui::rect_contains(area, column, row) {
            return HeaderAction::None;
        }
        let right = Self::right_edge(area);
        let bottom = area.bottom().saturating_sub(1);
        if !maximized && column == right && row == bottom {
            return HeaderAction::Resize;
        }
        if row == Self::header_y(area) && column > area.x && column < right {
            if let Some((minimize, maximize, close)) = Self::button_columns(area) {
                let within = |start: u16| column >= start && column < start + 3;
                if within(close) {
                    return HeaderAction::Close;
                }
                if within(maximize) {
                    return HeaderAction::Maximize;
                }
                if within(minimize) {
                    return HeaderAction::Minimize;
                }
            }
            return HeaderAction::Drag;
        }
        if row == area.y {
            return HeaderAction::Drag;
        }
        HeaderAction::None
    }
}
