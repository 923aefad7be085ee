//! Shared crate-wide constants.

use std::time::Duration;

use crate::window::Point;

/// Top-left corner of the first window opened on an empty desktop.
///
/// Coordinates are absolute terminal cells; row 0 belongs to the launcher
/// bar, so new windows start just below it.
pub const CASCADE_ORIGIN: Point = Point::new(2, 2);

/// Horizontal offset (in columns) between consecutively opened windows.
pub const CASCADE_STEP_X: i32 = 3;

/// Vertical offset (in rows) between consecutively opened windows.
pub const CASCADE_STEP_Y: i32 = 2;

/// Number of cascade slots before placement wraps back to the origin.
pub const CASCADE_WRAP: usize = 8;

/// Smallest width a window can be resized to. Leaves room for the title bar
/// buttons plus a few characters of title.
pub const MIN_WINDOW_WIDTH: u16 = 16;

/// Smallest height a window can be resized to (border, header, one content
/// row, border).
pub const MIN_WINDOW_HEIGHT: u16 = 4;

/// Two title bar clicks on the same window within this window toggle
/// maximize.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Maximum number of lines retained by the in-memory log buffer.
pub const LOG_BUFFER_LINES: usize = 2000;
