use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::feed::{DelayedFeed, FeedState};
use crate::components::{Component, ComponentContext};
use crate::ui::{UiFrame, rect_contains};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

#[derive(Debug, Clone)]
pub struct Tab {
    pub title: String,
    pub feed: DelayedFeed,
}

impl Tab {
    pub fn new(title: impl Into<String>, feed: DelayedFeed) -> Self {
        Self {
            title: title.into(),
            feed,
        }
    }
}

/// Tab strip over a body that shows the selected tab's feed.
///
/// A tab's feed is requested the first time the tab is shown and kept
/// afterwards; `r` refreshes the selected one.
#[derive(Debug)]
pub struct TabbedPanel {
    tabs: Vec<Tab>,
    selected: usize,
    tab_rects: Vec<Rect>,
}

impl TabbedPanel {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            tabs,
            selected: 0,
            tab_rects: Vec::new(),
        }
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.tabs.get(self.selected).map(|tab| tab.title.as_str())
    }

    pub fn selected_state(&self, now: Instant) -> FeedState {
        self.tabs
            .get(self.selected)
            .map(|tab| tab.feed.poll(now))
            .unwrap_or(FeedState::Idle)
    }

    /// Select tab `index` and request its feed. Out-of-range indices are
    /// ignored.
    pub fn select(&mut self, index: usize, now: Instant) -> bool {
        let Some(tab) = self.tabs.get_mut(index) else {
            return false;
        };
        tab.feed.request(now);
        self.selected = index;
        true
    }

    pub fn next_tab(&mut self, now: Instant) {
        if self.tabs.is_empty() {
            return;
        }
        let next = (self.selected + 1) % self.tabs.len();
        self.select(next, now);
    }

    pub fn prev_tab(&mut self, now: Instant) {
        if self.tabs.is_empty() {
            return;
        }
        let prev = (self.selected + self.tabs.len() - 1) % self.tabs.len();
        self.select(prev, now);
    }

    pub fn refresh(&mut self, now: Instant) {
        if let Some(tab) = self.tabs.get_mut(self.selected) {
            tab.feed.refresh(now);
        }
    }

    fn render_strip(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        self.tab_rects.clear();
        let mut x = area.x;
        for (idx, tab) in self.tabs.iter().enumerate() {
            let label = format!(" {} {} ", idx + 1, tab.title);
            let width = label.chars().count() as u16;
            let style = if idx == self.selected {
                Style::default()
                    .fg(crate::theme::panel_active_fg())
                    .bg(crate::theme::accent_alt())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(crate::theme::menu_fg())
                    .bg(crate::theme::panel_bg())
            };
            frame.set_string(x, area.y, &label, style);
            let visible = width.min(area.right().saturating_sub(x));
            self.tab_rects.push(Rect::new(x, area.y, visible, 1));
            x = x.saturating_add(width + 1);
            if x >= area.right() {
                break;
            }
        }
        if area.height > 1 {
            let rule = "─".repeat(area.width as usize);
            frame.set_string(
                area.x,
                area.y + 1,
                &rule,
                Style::default().fg(crate::theme::decorator_border()),
            );
        }
    }
}

/// Draw a feed's current state into `area`.
pub(crate) fn render_feed_state(frame: &mut UiFrame<'_>, area: Rect, state: &FeedState) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    match state {
        FeedState::Idle => {}
        FeedState::Pending { remaining } => {
            let frame_idx = (remaining.as_millis() / 120) as usize % SPINNER.len();
            let text = format!(
                "{} loading… {:.1}s",
                SPINNER[frame_idx],
                remaining.as_secs_f32()
            );
            frame.set_string(
                area.x,
                area.y,
                &text,
                Style::default().fg(crate::theme::pending_fg()),
            );
        }
        FeedState::Ready(lines) => {
            // Keep the newest lines when content overflows.
            let skip = lines.len().saturating_sub(area.height as usize);
            let text: Vec<Line<'_>> = lines
                .iter()
                .skip(skip)
                .map(|line| Line::raw(line.as_str()))
                .collect();
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(crate::theme::window_fg())),
                area,
            );
        }
    }
}

impl Component for TabbedPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if let Some(tab) = self.tabs.get_mut(self.selected) {
            tab.feed.request(ctx.now());
        }
        self.render_strip(frame, area);
        if area.height <= 2 {
            return;
        }
        let body = Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: area.height - 2,
        };
        let state = self.selected_state(ctx.now());
        render_feed_state(frame, body, &state);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        let now = ctx.now();
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Left => {
                    self.prev_tab(now);
                    true
                }
                KeyCode::Right => {
                    self.next_tab(now);
                    true
                }
                KeyCode::Char('r') => {
                    self.refresh(now);
                    true
                }
                KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                    let index = (c as u8 - b'1') as usize;
                    self.select(index, now)
                }
                _ => false,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .tab_rects
                    .iter()
                    .position(|rect| rect_contains(*rect, mouse.column, mouse.row));
                match hit {
                    Some(index) => self.select(index, now),
                    None => false,
                }
            }
            _ => false,
        }
    }
}
