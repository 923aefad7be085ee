//! The desktop: window manager, drag controller, hosted panels and the bars
//! around them, driven by terminal events.

use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::time::Instant;

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::apps::{AppKind, PanelDeps, build_panel};
use crate::components::{Component, ComponentContext, ConfirmAction, ConfirmOverlayComponent};
use crate::config::ShellConfig;
use crate::constants::DOUBLE_CLICK_WINDOW;
use crate::keybindings::{Action, KeyBindings};
use crate::state::ShellState;
use crate::taskbar::{Taskbar, TaskbarHit};
use crate::tracing_sub::LogBuffer;
use crate::ui::UiFrame;
use crate::window::decorator::{DefaultDecorator, HeaderAction, WindowChrome, WindowDecorator};
use crate::window::{DragController, WindowId, WindowManager, WmResult};

const GLOBAL_ACTIONS: [Action; 8] = [
    Action::Quit,
    Action::ToggleLauncher,
    Action::ToggleMouseCapture,
    Action::FocusNext,
    Action::FocusPrev,
    Action::MinimizeWindow,
    Action::MaximizeWindow,
    Action::CloseWindow,
];

const MENU_ACTIONS: [Action; 4] = [
    Action::MenuUp,
    Action::MenuDown,
    Action::MenuSelect,
    Action::MenuClose,
];

pub struct DesktopShell {
    wm: WindowManager,
    drag: DragController,
    panels: BTreeMap<WindowId, Box<dyn Component>>,
    taskbar: Taskbar,
    decorator: Box<dyn WindowDecorator>,
    state: ShellState,
    keys: KeyBindings,
    confirm: ConfirmOverlayComponent,
    deps: PanelDeps,
    last_header_click: Option<(WindowId, Instant)>,
    area: Rect,
}

impl DesktopShell {
    pub fn new(config: &ShellConfig, logs: LogBuffer) -> Self {
        Self::with_deps(config, PanelDeps::new(config.feed_delay, logs))
    }

    pub fn with_deps(config: &ShellConfig, deps: PanelDeps) -> Self {
        let mut confirm = ConfirmOverlayComponent::new();
        confirm.set_confirm_label("Exit");
        let mut shell = Self {
            wm: WindowManager::new(),
            drag: DragController::new(),
            panels: BTreeMap::new(),
            taskbar: Taskbar::new(deps.hostname.clone()),
            decorator: Box::new(DefaultDecorator),
            state: ShellState::new(config.mouse_capture),
            keys: KeyBindings::default(),
            confirm,
            deps,
            last_header_click: None,
            area: Rect::default(),
        };
        for app in &config.open {
            shell.open_app(*app);
        }
        shell
    }

    pub fn window_manager(&self) -> &WindowManager {
        &self.wm
    }

    pub fn drag_controller(&self) -> &DragController {
        &self.drag
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn launcher_open(&self) -> bool {
        self.state.launcher_open()
    }

    pub fn exit_confirm_visible(&self) -> bool {
        self.confirm.visible()
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.state.mouse_capture_enabled()
    }

    /// The new mouse capture flag if it changed since the last call.
    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        self.state.take_mouse_capture_change()
    }

    pub fn open_app(&mut self, app: AppKind) -> WindowId {
        let id = self.wm.open_app(app);
        self.panels.insert(id, build_panel(app, &self.deps));
        id
    }

    /// Close a window and drop its panel.
    pub fn close_window(&mut self, id: WindowId) -> WmResult<()> {
        self.wm.close(id)?;
        self.panels.remove(&id);
        if self.drag.dragged_window() == Some(id) {
            self.drag.end_drag();
        }
        if self.last_header_click.is_some_and(|(clicked, _)| clicked == id) {
            self.last_header_click = None;
        }
        Ok(())
    }

    /// Recompute bar and desktop rectangles for a terminal of `area`.
    pub fn layout(&mut self, area: Rect) {
        let (_, _, desktop) = self.taskbar.split_area(area);
        self.wm.set_desktop_area(desktop);
        self.area = area;
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow<()> {
        self.handle_event_at(event, Instant::now())
    }

    /// Route one terminal event. `Break` means the user confirmed exit.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> ControlFlow<()> {
        if self.confirm.visible() {
            match self.confirm.handle_confirm_event(event) {
                Some(ConfirmAction::Confirm) => return ControlFlow::Break(()),
                Some(ConfirmAction::Cancel) => self.confirm.close(),
                None => {}
            }
            return ControlFlow::Continue(());
        }
        match event {
            Event::Resize(width, height) => self.layout(Rect::new(0, 0, *width, *height)),
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn log_ignored<T>(op: &'static str, result: WmResult<T>) {
        if let Err(err) = result {
            tracing::debug!(%err, op, "ignored window command");
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if self.state.launcher_open() {
            self.handle_launcher_key(key);
            return;
        }
        let Some(action) = self.keys.first_match(&GLOBAL_ACTIONS, key) else {
            if let Some(active) = self.wm.active()
                && let Some(panel) = self.panels.get_mut(&active)
            {
                panel.handle_event(&Event::Key(*key), &ComponentContext::new(true, now));
            }
            return;
        };
        let active = self.wm.active();
        match action {
            Action::Quit => self.confirm.open(
                "Exit cloud-desk",
                "Close every window and leave the desktop?",
            ),
            Action::ToggleLauncher => self.state.set_launcher_open(true),
            Action::ToggleMouseCapture => self.state.toggle_mouse_capture(),
            Action::FocusNext => {
                self.wm.cycle_focus(true);
            }
            Action::FocusPrev => {
                self.wm.cycle_focus(false);
            }
            Action::MinimizeWindow => {
                if let Some(id) = active {
                    Self::log_ignored("minimize", self.wm.minimize(id));
                }
            }
            Action::MaximizeWindow => {
                if let Some(id) = active {
                    Self::log_ignored("maximize", self.wm.maximize(id));
                }
            }
            Action::CloseWindow => {
                if let Some(id) = active {
                    Self::log_ignored("close", self.close_window(id));
                }
            }
            _ => {}
        }
    }

    fn handle_launcher_key(&mut self, key: &KeyEvent) {
        let len = AppKind::ALL.len();
        match self.keys.first_match(&MENU_ACTIONS, key) {
            Some(Action::MenuUp) => self.state.step_launcher(-1, len),
            Some(Action::MenuDown) => self.state.step_launcher(1, len),
            Some(Action::MenuSelect) => {
                let selected = self.state.launcher_selected();
                self.state.set_launcher_open(false);
                if let Some(app) = AppKind::ALL.get(selected) {
                    self.open_app(*app);
                }
            }
            Some(Action::MenuClose) => self.state.set_launcher_open(false),
            _ => {}
        }
    }

    /// Taskbar click: restore a minimized window, minimize the active one,
    /// focus anything else.
    fn activate_from_taskbar(&mut self, id: WindowId) {
        let Some(window) = self.wm.get(id) else {
            return;
        };
        let result = if window.is_minimized() {
            self.wm.restore(id)
        } else if self.wm.is_active(id) {
            self.wm.minimize(id)
        } else {
            self.wm.focus(id)
        };
        Self::log_ignored("taskbar", result);
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_press(mouse, now),
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag
                    .on_pointer_move(&mut self.wm, i32::from(mouse.column), i32::from(mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag.end_drag();
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some(id) = self.wm.window_at(mouse.column, mouse.row) {
                    self.forward_mouse(id, mouse, now);
                }
            }
            _ => {}
        }
    }

    fn handle_press(&mut self, mouse: &MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        if self.state.launcher_open() {
            match self.taskbar.hit_test(column, row) {
                Some(TaskbarHit::MenuItem(app)) => {
                    self.state.set_launcher_open(false);
                    self.open_app(app);
                }
                // Clicks on the menu frame keep it open.
                _ if self.taskbar.menu_contains_point(column, row) => {}
                _ => self.state.set_launcher_open(false),
            }
            return;
        }
        if let Some(hit) = self.taskbar.hit_test(column, row) {
            match hit {
                TaskbarHit::Menu => self.state.set_launcher_open(true),
                TaskbarHit::Launcher(app) | TaskbarHit::MenuItem(app) => {
                    self.open_app(app);
                }
                TaskbarHit::Window(id) => self.activate_from_taskbar(id),
                TaskbarHit::MouseCapture => self.state.toggle_mouse_capture(),
            }
            return;
        }
        let Some(id) = self.wm.window_at(column, row) else {
            return;
        };
        let Some(frame) = self.wm.frame_of(id) else {
            return;
        };
        let Some((local_x, local_y)) = frame.local(column, row) else {
            return;
        };
        let maximized = self.wm.get(id).is_some_and(|w| w.is_maximized());
        let local_area = Rect::new(0, 0, frame.width, frame.height);
        let (x, y) = (i32::from(column), i32::from(row));
        match self
            .decorator
            .hit_test(local_area, local_x, local_y, maximized)
        {
            HeaderAction::Close => Self::log_ignored("close", self.close_window(id)),
            HeaderAction::Minimize => Self::log_ignored("minimize", self.wm.minimize(id)),
            HeaderAction::Maximize => Self::log_ignored("maximize", self.wm.maximize(id)),
            HeaderAction::Drag => {
                let double_click = self.last_header_click.is_some_and(|(last, at)| {
                    last == id && now.saturating_duration_since(at) <= DOUBLE_CLICK_WINDOW
                });
                if double_click {
                    self.last_header_click = None;
                    self.drag.end_drag();
                    Self::log_ignored("maximize", self.wm.maximize(id));
                } else {
                    self.last_header_click = Some((id, now));
                    if maximized {
                        Self::log_ignored("focus", self.wm.focus(id));
                    } else {
                        Self::log_ignored("drag", self.drag.begin_drag(&mut self.wm, id, x, y));
                    }
                }
            }
            HeaderAction::Resize => {
                Self::log_ignored("resize", self.drag.begin_resize(&mut self.wm, id, x, y));
            }
            HeaderAction::None => {
                Self::log_ignored("focus", self.wm.focus(id));
                self.forward_mouse(id, mouse, now);
            }
        }
    }

    /// Hand a mouse event to a window's panel in the window's local space,
    /// if it lands inside the content area.
    fn forward_mouse(&mut self, id: WindowId, mouse: &MouseEvent, now: Instant) {
        let Some(frame) = self.wm.frame_of(id) else {
            return;
        };
        let Some((local_x, local_y)) = frame.local(mouse.column, mouse.row) else {
            return;
        };
        let content = self
            .decorator
            .content_area(Rect::new(0, 0, frame.width, frame.height));
        if !crate::ui::rect_contains(content, local_x, local_y) {
            return;
        }
        let focused = self.wm.is_active(id);
        if let Some(panel) = self.panels.get_mut(&id) {
            let local = Event::Mouse(MouseEvent {
                column: local_x,
                row: local_y,
                ..*mouse
            });
            panel.handle_event(&local, &ComponentContext::new(focused, now));
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        self.render_at(frame, Instant::now());
    }

    pub fn render_at(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        let area = frame.area();
        if area != self.area {
            self.layout(area);
        }
        let desktop = self.wm.desktop_area();
        frame.fill(
            desktop,
            Style::default()
                .bg(crate::theme::desktop_bg())
                .fg(crate::theme::desktop_fg()),
        );
        if self.wm.is_empty() && desktop.height > 0 {
            let hint = match self.keys.first_combo(Action::ToggleLauncher) {
                Some(combo) => format!("{combo} or ≡ opens the launcher"),
                None => "≡ opens the launcher".to_string(),
            };
            let x = desktop.x + desktop.width.saturating_sub(hint.chars().count() as u16) / 2;
            let y = desktop.y + desktop.height / 2;
            frame.set_string(
                x,
                y,
                &hint,
                Style::default()
                    .bg(crate::theme::desktop_bg())
                    .fg(crate::theme::desktop_fg()),
            );
        }

        for view in self.wm.draw_order() {
            let rect = view.frame(desktop);
            if rect.is_empty() || rect.visible(area).is_empty() {
                continue;
            }
            let local_area = Rect::new(0, 0, rect.width, rect.height);
            let mut window_buffer = Buffer::empty(local_area);
            {
                let mut local = UiFrame::from_parts(local_area, &mut window_buffer);
                let chrome = WindowChrome {
                    title: &view.title,
                    icon: view.icon,
                    focused: view.focused,
                    maximized: view.maximized,
                };
                self.decorator.render_window(&mut local, local_area, &chrome);
                let content = self.decorator.content_area(local_area);
                if let Some(panel) = self.panels.get_mut(&view.id) {
                    panel.render(
                        &mut local,
                        content,
                        &ComponentContext::new(view.focused, now),
                    );
                }
            }
            frame.blit_from_signed(&window_buffer, rect);
        }

        self.taskbar.begin_frame();
        self.taskbar.render_top(
            frame,
            self.state.launcher_open(),
            self.state.mouse_capture_enabled(),
        );
        self.taskbar.render_bottom(frame, &self.wm.taskbar_entries());
        if self.state.launcher_open() {
            self.taskbar
                .render_menu(frame, desktop, self.state.launcher_selected());
        }
        self.confirm
            .render(frame, area, &ComponentContext::new(true, now));
    }
}
