pub mod decorator;
pub mod drag;

mod window_manager;

use std::fmt;
use std::ops::Sub;

use ratatui::prelude::Rect;
use thiserror::Error;

use crate::apps::{AppKind, Icon};

pub use drag::{DragController, DragSession, HeaderDrag, ResizeDrag};
pub use window_manager::{TaskbarEntry, WindowManager, WindowView};

/// Opaque window handle. Allocated from a monotonic counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Signed desktop coordinate. Windows may sit partially or fully off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Signed floating rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.local(column, row).is_some()
    }

    /// Translate an absolute cell into this rectangle's local space.
    pub fn local(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        if self.is_empty() {
            return None;
        }
        let dx = i32::from(column) - self.x;
        let dy = i32::from(row) - self.y;
        if dx < 0 || dy < 0 || dx >= i32::from(self.width) || dy >= i32::from(self.height) {
            return None;
        }
        Some((dx as u16, dy as u16))
    }

    /// Portion of the rectangle that lands inside `bounds`.
    pub fn visible(&self, bounds: Rect) -> Rect {
        let left = self.x.max(i32::from(bounds.x));
        let top = self.y.max(i32::from(bounds.y));
        let right = (self.x + i32::from(self.width)).min(i32::from(bounds.right()));
        let bottom = (self.y + i32::from(self.height)).min(i32::from(bounds.bottom()));
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }
}

impl From<Rect> for FloatRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: i32::from(rect.x),
            y: i32::from(rect.y),
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Visual state derived from the minimized / maximized flags.
///
/// Both flags can be set at once; minimized wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Maximized,
    Minimized,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WmError {
    #[error("window {0} not found")]
    NotFound(WindowId),
    #[error("cannot {action} window {id}: {reason}")]
    InvalidTransition {
        id: WindowId,
        action: &'static str,
        reason: &'static str,
    },
}

impl WmError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, WmError::NotFound(_))
    }

    pub fn window(&self) -> WindowId {
        match *self {
            WmError::NotFound(id) | WmError::InvalidTransition { id, .. } => id,
        }
    }
}

pub type WmResult<T> = Result<T, WmError>;

/// One open application instance.
#[derive(Debug, Clone)]
pub struct Window {
    id: WindowId,
    app: AppKind,
    title: String,
    icon: Icon,
    minimized: bool,
    maximized: bool,
    z_index: u64,
    position: Point,
    size: Size,
    restore: Option<(Point, Size)>,
}

impl Window {
    fn new(
        id: WindowId,
        app: AppKind,
        title: String,
        icon: Icon,
        z_index: u64,
        position: Point,
        size: Size,
    ) -> Self {
        Self {
            id,
            app,
            title,
            icon,
            minimized: false,
            maximized: false,
            z_index,
            position,
            size,
            restore: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn app(&self) -> AppKind {
        self.app
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Icon {
        self.icon
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn state(&self) -> WindowState {
        if self.minimized {
            WindowState::Minimized
        } else if self.maximized {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }

    /// Effective on-screen rectangle. A maximized window fills `desktop`.
    pub fn frame(&self, desktop: Rect) -> FloatRect {
        if self.maximized {
            FloatRect::from(desktop)
        } else {
            FloatRect::new(self.position, self.size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_subtraction_yields_offset() {
        let pointer = Point::new(100, 120);
        let origin = Point::new(40, 40);
        assert_eq!(pointer - origin, Point::new(60, 80));
        assert_eq!(origin - pointer, Point::new(-60, -80));
    }

    #[test]
    fn float_rect_local_handles_negative_origin() {
        let rect = FloatRect {
            x: -5,
            y: 2,
            width: 10,
            height: 4,
        };
        assert_eq!(rect.local(0, 2), Some((5, 0)));
        assert_eq!(rect.local(4, 5), Some((9, 3)));
        assert_eq!(rect.local(5, 2), None);
        assert_eq!(rect.local(0, 6), None);
    }

    #[test]
    fn float_rect_visible_clips_to_bounds() {
        let bounds = Rect {
            x: 0,
            y: 1,
            width: 20,
            height: 10,
        };
        let rect = FloatRect {
            x: -3,
            y: 0,
            width: 8,
            height: 4,
        };
        assert_eq!(
            rect.visible(bounds),
            Rect {
                x: 0,
                y: 1,
                width: 5,
                height: 3
            }
        );
        let offscreen = FloatRect {
            x: 30,
            y: 0,
            width: 4,
            height: 4,
        };
        assert_eq!(offscreen.visible(bounds), Rect::default());
    }

    #[test]
    fn minimized_dominates_maximized_state() {
        let mut window = Window::new(
            WindowId::new(1),
            AppKind::Terminal,
            "Terminal".to_string(),
            crate::apps::icon_for(AppKind::Terminal),
            1,
            Point::new(0, 0),
            Size::new(20, 10),
        );
        window.maximized = true;
        assert_eq!(window.state(), WindowState::Maximized);
        window.minimized = true;
        assert_eq!(window.state(), WindowState::Minimized);
    }

    #[test]
    fn error_reports_window() {
        let err = WmError::InvalidTransition {
            id: WindowId::new(7),
            action: "move",
            reason: "window is maximized",
        };
        assert_eq!(err.window(), WindowId::new(7));
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "cannot move window #7: window is maximized"
        );
    }
}
