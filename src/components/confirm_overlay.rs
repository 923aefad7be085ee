use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::keybindings::{Action, KeyBindings};
use crate::ui::{UiFrame, rect_contains};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Confirm,
    Cancel,
}

/// Centered yes / no dialog drawn above everything else.
#[derive(Debug)]
pub struct ConfirmOverlayComponent {
    keys: KeyBindings,
    visible: bool,
    title: String,
    body: String,
    confirm_label: String,
    selected_confirm: bool,
    cancel_rect: Option<Rect>,
    confirm_rect: Option<Rect>,
    width: u16,
    height: u16,
}

impl Default for ConfirmOverlayComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmOverlayComponent {
    pub fn new() -> Self {
        Self {
            keys: KeyBindings::default(),
            visible: false,
            title: String::new(),
            body: String::new(),
            confirm_label: "Exit".to_string(),
            selected_confirm: false,
            cancel_rect: None,
            confirm_rect: None,
            width: 48,
            height: 8,
        }
    }

    pub fn open(&mut self, title: &str, body: &str) {
        self.visible = true;
        self.title = title.to_string();
        self.body = body.to_string();
        self.selected_confirm = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.cancel_rect = None;
        self.confirm_rect = None;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_confirm_label(&mut self, label: impl Into<String>) {
        self.confirm_label = label.into();
    }

    /// Clamp dialog size to the available area.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let width = area.width.min(self.width);
        let height = area.height.min(self.height);
        Rect {
            x: area.x.saturating_add(area.width.saturating_sub(width) / 2),
            y: area.y.saturating_add(area.height.saturating_sub(height) / 2),
            width,
            height,
        }
    }

    /// Resolve an event into a decision. Keys that only move the selection
    /// return `None`.
    pub fn handle_confirm_event(&mut self, event: &Event) -> Option<ConfirmAction> {
        match event {
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                if self
                    .confirm_rect
                    .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
                {
                    return Some(ConfirmAction::Confirm);
                }
                if self
                    .cancel_rect
                    .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
                {
                    return Some(ConfirmAction::Cancel);
                }
                None
            }
            Event::Key(key) => {
                let candidates = [
                    Action::ConfirmToggle,
                    Action::ConfirmLeft,
                    Action::ConfirmRight,
                    Action::ConfirmAccept,
                    Action::ConfirmCancel,
                ];
                match self.keys.first_match(&candidates, key)? {
                    Action::ConfirmToggle => {
                        self.selected_confirm = !self.selected_confirm;
                        None
                    }
                    Action::ConfirmLeft => {
                        self.selected_confirm = false;
                        None
                    }
                    Action::ConfirmRight => {
                        self.selected_confirm = true;
                        None
                    }
                    Action::ConfirmAccept if self.selected_confirm => Some(ConfirmAction::Confirm),
                    _ => Some(ConfirmAction::Cancel),
                }
            }
            _ => None,
        }
    }
}

impl Component for ConfirmOverlayComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if !self.visible || area.width == 0 || area.height == 0 {
            return;
        }
        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(crate::theme::dialog_separator()))
            .style(
                Style::default()
                    .bg(crate::theme::dialog_bg())
                    .fg(crate::theme::dialog_fg()),
            );
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        self.cancel_rect = None;
        self.confirm_rect = None;
        if inner.height < 3 || inner.width < 4 {
            return;
        }
        let content = Rect {
            x: inner.x.saturating_add(1),
            y: inner.y,
            width: inner.width.saturating_sub(2),
            height: inner.height,
        };
        let body_rect = Rect {
            height: content.height.saturating_sub(2),
            ..content
        };
        let paragraph = Paragraph::new(self.body.as_str())
            .alignment(Alignment::Left)
            .style(Style::default().fg(crate::theme::dialog_fg()))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, body_rect);

        let separator_y = content.bottom().saturating_sub(2);
        let button_y = content.bottom().saturating_sub(1);
        let separator = "─".repeat(content.width as usize);
        frame.set_string(
            content.x,
            separator_y,
            &separator,
            Style::default().fg(crate::theme::dialog_separator()),
        );

        let cancel = "[ Cancel ]";
        let confirm = format!("[ {} ]", self.confirm_label);
        let selected_style = Style::default()
            .fg(crate::theme::decorator_header_fg())
            .bg(crate::theme::decorator_header_bg())
            .add_modifier(Modifier::BOLD);
        let unselected_style = Style::default()
            .fg(crate::theme::dialog_fg())
            .bg(crate::theme::panel_bg());
        let (cancel_style, confirm_style) = if self.selected_confirm {
            (unselected_style, selected_style)
        } else {
            (selected_style, unselected_style)
        };
        let cancel_width = cancel.chars().count() as u16;
        let confirm_width = confirm.chars().count() as u16;
        let start_x = content.x.saturating_add(
            content
                .width
                .saturating_sub(cancel_width + 1 + confirm_width),
        );
        let confirm_x = start_x.saturating_add(cancel_width + 1);
        frame.set_string(start_x, button_y, cancel, cancel_style);
        frame.set_string(confirm_x, button_y, &confirm, confirm_style);
        self.cancel_rect = Some(Rect {
            x: start_x,
            y: button_y,
            width: cancel_width,
            height: 1,
        });
        self.confirm_rect = Some(Rect {
            x: confirm_x,
            y: button_y,
            width: confirm_width,
            height: 1,
        });
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        self.visible && self.handle_confirm_event(event).is_some()
    }
}
