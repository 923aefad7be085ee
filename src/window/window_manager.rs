use std::collections::BTreeMap;

use ratatui::prelude::Rect;

use super::{FloatRect, Point, Size, Window, WindowId, WmError, WmResult};
use crate::apps::{AppKind, Icon, icon_for};
use crate::constants::{
    CASCADE_ORIGIN, CASCADE_STEP_X, CASCADE_STEP_Y, CASCADE_WRAP, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH,
};

/// Snapshot of one visible window, handed to the shell for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowView {
    pub id: WindowId,
    pub app: AppKind,
    pub title: String,
    pub icon: Icon,
    pub position: Point,
    pub size: Size,
    pub maximized: bool,
    pub z_index: u64,
    pub focused: bool,
}

impl WindowView {
    pub fn frame(&self, desktop: Rect) -> FloatRect {
        if self.maximized {
            FloatRect::from(desktop)
        } else {
            FloatRect::new(self.position, self.size)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub app: AppKind,
    pub title: String,
    pub icon: Icon,
    pub minimized: bool,
    pub focused: bool,
}

/// Owns the set of open windows and their stacking order.
///
/// Every command is total over the window set: an unknown id yields
/// [`WmError::NotFound`] and leaves the state untouched, so racing UI events
/// (double close, drag after close) are harmless. The active window is not
/// stored; it is always the visible window with the highest `z_index`.
#[derive(Debug)]
pub struct WindowManager {
    // BTreeMap keyed by the monotonic id doubles as creation order.
    windows: BTreeMap<WindowId, Window>,
    next_id: u64,
    next_z: u64,
    opened: usize,
    desktop: Rect,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            next_id: 1,
            next_z: 1,
            opened: 0,
            desktop: Rect::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    /// Area a maximized window fills. The shell refreshes this every frame.
    pub fn set_desktop_area(&mut self, area: Rect) {
        self.desktop = area;
    }

    pub fn desktop_area(&self) -> Rect {
        self.desktop
    }

    fn window_mut(&mut self, id: WindowId) -> WmResult<&mut Window> {
        self.windows.get_mut(&id).ok_or(WmError::NotFound(id))
    }

    fn allocate_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z = z.saturating_add(1);
        z
    }

    fn default_geometry(&self, app: AppKind) -> (Point, Size) {
        let slot = (self.opened % CASCADE_WRAP) as i32;
        let position = Point::new(
            CASCADE_ORIGIN.x + slot * CASCADE_STEP_X,
            CASCADE_ORIGIN.y + slot * CASCADE_STEP_Y,
        );
        (position, app.default_size())
    }

    /// Open a new window for `app` on top of the stack.
    ///
    /// Several windows may host the same app kind; each gets its own id.
    pub fn open(&mut self, app: AppKind, title: impl Into<String>, icon: Icon) -> WindowId {
        let id = WindowId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let (position, size) = self.default_geometry(app);
        let z_index = self.allocate_z();
        let window = Window::new(id, app, title.into(), icon, z_index, position, size);
        self.windows.insert(id, window);
        self.opened = self.opened.saturating_add(1);
        tracing::debug!(window_id = %id, ?app, z_index, "opened window");
        id
    }

    /// Open `app` with its catalog title and icon.
    pub fn open_app(&mut self, app: AppKind) -> WindowId {
        self.open(app, app.title(), icon_for(app))
    }

    pub fn close(&mut self, id: WindowId) -> WmResult<()> {
        let window = self.windows.remove(&id).ok_or(WmError::NotFound(id))?;
        tracing::debug!(window_id = %id, app = ?window.app, "closing window");
        Ok(())
    }

    /// Raise `id` above every other open window.
    ///
    /// Minimized windows must be restored first.
    pub fn focus(&mut self, id: WindowId) -> WmResult<()> {
        let window = self.get(id).ok_or(WmError::NotFound(id))?;
        if window.minimized {
            return Err(WmError::InvalidTransition {
                id,
                action: "focus",
                reason: "window is minimized",
            });
        }
        let current = window.z_index;
        let strictly_top = self
            .windows
            .values()
            .all(|other| other.id == id || other.z_index < current);
        if strictly_top {
            return Ok(());
        }
        let z_index = self.allocate_z();
        self.window_mut(id)?.z_index = z_index;
        tracing::debug!(window_id = %id, z_index, "focused window");
        Ok(())
    }

    pub fn minimize(&mut self, id: WindowId) -> WmResult<()> {
        let window = self.window_mut(id)?;
        if window.minimized {
            return Ok(());
        }
        window.minimized = true;
        tracing::debug!(window_id = %id, next_active = ?self.active(), "minimized window");
        Ok(())
    }

    /// Bring a minimized window back and focus it.
    pub fn restore(&mut self, id: WindowId) -> WmResult<()> {
        self.window_mut(id)?.minimized = false;
        self.focus(id)
    }

    /// Toggle the maximized flag. Returns the new flag value.
    ///
    /// Entering maximized snapshots position and size; leaving restores the
    /// snapshot exactly.
    pub fn maximize(&mut self, id: WindowId) -> WmResult<bool> {
        let window = self.window_mut(id)?;
        if window.maximized {
            if let Some((position, size)) = window.restore.take() {
                window.position = position;
                window.size = size;
            }
            window.maximized = false;
        } else {
            window.restore = Some((window.position, window.size));
            window.maximized = true;
        }
        let maximized = window.maximized;
        let minimized = window.minimized;
        tracing::debug!(window_id = %id, maximized, "toggled maximize");
        if !minimized {
            self.focus(id)?;
        }
        Ok(maximized)
    }

    /// Move the window's top-left corner. Off-screen and negative positions
    /// are accepted as-is.
    pub fn move_to(&mut self, id: WindowId, x: i32, y: i32) -> WmResult<()> {
        let window = self.window_mut(id)?;
        if window.maximized {
            return Err(WmError::InvalidTransition {
                id,
                action: "move",
                reason: "window is maximized",
            });
        }
        window.position = Point::new(x, y);
        Ok(())
    }

    pub fn resize(&mut self, id: WindowId, width: u16, height: u16) -> WmResult<()> {
        let window = self.window_mut(id)?;
        if window.maximized {
            return Err(WmError::InvalidTransition {
                id,
                action: "resize",
                reason: "window is maximized",
            });
        }
        window.size = Size::new(width.max(MIN_WINDOW_WIDTH), height.max(MIN_WINDOW_HEIGHT));
        Ok(())
    }

    pub fn rename(&mut self, id: WindowId, title: impl Into<String>) -> WmResult<()> {
        self.window_mut(id)?.title = title.into();
        Ok(())
    }

    /// The visible window with the highest `z_index`, if any.
    pub fn active(&self) -> Option<WindowId> {
        self.windows
            .values()
            .filter(|window| !window.minimized)
            .max_by_key(|window| window.z_index)
            .map(|window| window.id)
    }

    pub fn is_active(&self, id: WindowId) -> bool {
        self.active() == Some(id)
    }

    /// Focus the next (or previous) visible window in creation order,
    /// relative to the active one.
    pub fn cycle_focus(&mut self, forward: bool) -> Option<WindowId> {
        let order: Vec<WindowId> = self
            .windows
            .values()
            .filter(|window| !window.minimized)
            .map(|window| window.id)
            .collect();
        if order.is_empty() {
            return None;
        }
        let idx = self
            .active()
            .and_then(|active| order.iter().position(|id| *id == active))
            .unwrap_or(0);
        let step = if forward { 1isize } else { -1isize };
        let next = (idx as isize + step).rem_euclid(order.len() as isize) as usize;
        let target = order[next];
        self.focus(target).ok()?;
        Some(target)
    }

    /// Visible windows sorted bottom-to-top, so the topmost paints last.
    pub fn draw_order(&self) -> Vec<WindowView> {
        let active = self.active();
        let mut views: Vec<WindowView> = self
            .windows
            .values()
            .filter(|window| !window.minimized)
            .map(|window| WindowView {
                id: window.id,
                app: window.app,
                title: window.title.clone(),
                icon: window.icon,
                position: window.position,
                size: window.size,
                maximized: window.maximized,
                z_index: window.z_index,
                focused: Some(window.id) == active,
            })
            .collect();
        views.sort_by_key(|view| view.z_index);
        views
    }

    /// Every open window in creation order, minimized ones included.
    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        let active = self.active();
        self.windows
            .values()
            .map(|window| TaskbarEntry {
                id: window.id,
                app: window.app,
                title: window.title.clone(),
                icon: window.icon,
                minimized: window.minimized,
                focused: Some(window.id) == active,
            })
            .collect()
    }

    pub fn frame_of(&self, id: WindowId) -> Option<FloatRect> {
        self.get(id).map(|window| window.frame(self.desktop))
    }

    /// Topmost visible window under the given cell.
    pub fn window_at(&self, column: u16, row: u16) -> Option<WindowId> {
        self.windows
            .values()
            .filter(|window| !window.minimized)
            .filter(|window| window.frame(self.desktop).contains(column, row))
            .max_by_key(|window| window.z_index)
            .map(|window| window.id)
    }
}
