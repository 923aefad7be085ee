//! Pointer-driven move and resize sessions.
//!
//! A session starts on a title bar (or resize grip) press, follows every
//! pointer move reported by the shell, and ends on release. Tracking is
//! desktop-global: the pointer may leave the window's bounds mid-drag
//! without losing the session. The controller never touches window state
//! directly; it only issues `focus`, `move_to` and `resize` commands.

use super::{Point, Size, WindowId, WindowManager, WmError, WmResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub id: WindowId,
    /// Pointer position minus window origin at press time.
    pub offset: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    pub id: WindowId,
    pub start_pointer: Point,
    pub start_size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSession {
    Header(HeaderDrag),
    Resize(ResizeDrag),
}

impl DragSession {
    pub fn window(&self) -> WindowId {
        match self {
            DragSession::Header(drag) => drag.id,
            DragSession::Resize(drag) => drag.id,
        }
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged_window(&self) -> Option<WindowId> {
        self.session.map(|session| session.window())
    }

    /// Start moving `id`. Brings the window to front and returns the
    /// pointer-to-origin offset used for the rest of the session.
    pub fn begin_drag(
        &mut self,
        wm: &mut WindowManager,
        id: WindowId,
        pointer_x: i32,
        pointer_y: i32,
    ) -> WmResult<Point> {
        let window = wm.get(id).ok_or(WmError::NotFound(id))?;
        if window.is_maximized() {
            return Err(WmError::InvalidTransition {
                id,
                action: "drag",
                reason: "window is maximized",
            });
        }
        let offset = Point::new(pointer_x, pointer_y) - window.position();
        wm.focus(id)?;
        self.session = Some(DragSession::Header(HeaderDrag { id, offset }));
        tracing::debug!(window_id = %id, offset_x = offset.x, offset_y = offset.y, "drag started");
        Ok(offset)
    }

    /// Start resizing `id` from its bottom-right corner.
    pub fn begin_resize(
        &mut self,
        wm: &mut WindowManager,
        id: WindowId,
        pointer_x: i32,
        pointer_y: i32,
    ) -> WmResult<()> {
        let window = wm.get(id).ok_or(WmError::NotFound(id))?;
        if window.is_maximized() {
            return Err(WmError::InvalidTransition {
                id,
                action: "resize",
                reason: "window is maximized",
            });
        }
        let start_size = window.size();
        wm.focus(id)?;
        self.session = Some(DragSession::Resize(ResizeDrag {
            id,
            start_pointer: Point::new(pointer_x, pointer_y),
            start_size,
        }));
        tracing::debug!(window_id = %id, "resize started");
        Ok(())
    }

    /// Feed a pointer position into the active session. Returns true when a
    /// window changed.
    ///
    /// A session whose window has gone away (or became maximized) is
    /// dropped.
    pub fn on_pointer_move(
        &mut self,
        wm: &mut WindowManager,
        pointer_x: i32,
        pointer_y: i32,
    ) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        let result = match session {
            DragSession::Header(drag) => {
                let target = Point::new(pointer_x, pointer_y) - drag.offset;
                wm.move_to(drag.id, target.x, target.y)
            }
            DragSession::Resize(drag) => {
                let dx = pointer_x.saturating_sub(drag.start_pointer.x);
                let dy = pointer_y.saturating_sub(drag.start_pointer.y);
                let width = grow(drag.start_size.width, dx);
                let height = grow(drag.start_size.height, dy);
                wm.resize(drag.id, width, height)
            }
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "dropping drag session");
                self.session = None;
                false
            }
        }
    }

    /// Finish the current session, if any. Safe to call repeatedly.
    pub fn end_drag(&mut self) -> Option<WindowId> {
        let ended = self.session.take().map(|session| session.window());
        if let Some(id) = ended {
            tracing::debug!(window_id = %id, "drag ended");
        }
        ended
    }
}

fn grow(start: u16, delta: i32) -> u16 {
    (i32::from(start) + delta).clamp(0, i32::from(u16::MAX)) as u16
}
