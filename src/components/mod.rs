use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod confirm_overlay;
mod context;

pub use confirm_overlay::{ConfirmAction, ConfirmOverlayComponent};
pub use context::ComponentContext;

/// Content hosted inside a window. The shell owns one per open window and
/// never looks inside it.
///
/// Events arrive already translated into the component's local space: mouse
/// coordinates are relative to the `area` passed to the last `render`.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
