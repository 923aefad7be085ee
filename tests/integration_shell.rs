use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use cloud_desk::apps::{AppKind, PanelDeps};
use cloud_desk::config::ShellConfig;
use cloud_desk::shell::DesktopShell;
use cloud_desk::tracing_sub::LogBuffer;
use cloud_desk::ui::UiFrame;
use cloud_desk::window::{Point, WindowId};
use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

const SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 120,
    height: 40,
};

fn shell(open: Vec<AppKind>) -> DesktopShell {
    let config = ShellConfig {
        open,
        ..ShellConfig::default()
    };
    let deps = PanelDeps {
        feed_delay: Duration::from_millis(10),
        logs: LogBuffer::new(32),
        hostname: "test-host".to_string(),
    };
    DesktopShell::with_deps(&config, deps)
}

fn render(shell: &mut DesktopShell, now: Instant) -> Buffer {
    let mut buffer = Buffer::empty(SCREEN);
    {
        let mut frame = UiFrame::from_parts(SCREEN, &mut buffer);
        shell.render_at(&mut frame, now);
    }
    buffer
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
        .collect()
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn click(shell: &mut DesktopShell, column: u16, row: u16, now: Instant) {
    shell.handle_event_at(
        &mouse(MouseEventKind::Down(MouseButton::Left), column, row),
        now,
    );
    shell.handle_event_at(
        &mouse(MouseEventKind::Up(MouseButton::Left), column, row),
        now,
    );
}

fn only_window(shell: &DesktopShell) -> WindowId {
    let ids: Vec<_> = shell.window_manager().windows().map(|w| w.id()).collect();
    assert_eq!(ids.len(), 1);
    ids[0]
}

#[test]
fn empty_desktop_shows_bars_and_hint() {
    let mut s = shell(Vec::new());
    let buffer = render(&mut s, Instant::now());
    assert!(row_text(&buffer, 0).starts_with(" ≡ cloud-desk "));
    assert!(row_text(&buffer, 0).contains("[ mouse ]"));
    assert!(row_text(&buffer, 39).contains("test-host"));
    assert!(row_text(&buffer, 20).contains("opens the launcher"));
}

#[test]
fn header_drag_moves_window_with_pointer() {
    let mut s = shell(vec![AppKind::Terminal]);
    let now = Instant::now();
    render(&mut s, now);
    let id = only_window(&s);
    assert_eq!(
        s.window_manager().get(id).map(|w| w.position()),
        Some(Point::new(2, 2))
    );

    s.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 3), now);
    s.handle_event_at(&mouse(MouseEventKind::Drag(MouseButton::Left), 20, 8), now);
    s.handle_event_at(&mouse(MouseEventKind::Up(MouseButton::Left), 20, 8), now);
    s.handle_event_at(&mouse(MouseEventKind::Drag(MouseButton::Left), 60, 30), now);

    assert_eq!(
        s.window_manager().get(id).map(|w| w.position()),
        Some(Point::new(12, 7))
    );
    assert!(!s.drag_controller().is_dragging());

    let buffer = render(&mut s, now);
    assert!(row_text(&buffer, 8).contains("$ Terminal"));
}

#[test]
fn launcher_menu_and_quick_launch_open_windows() {
    let mut s = shell(Vec::new());
    let now = Instant::now();
    render(&mut s, now);

    click(&mut s, 1, 0, now);
    assert!(s.launcher_open());
    let buffer = render(&mut s, now);
    assert!(row_text(&buffer, 2).contains("AI Studio"));

    // First menu item.
    click(&mut s, 3, 2, now);
    assert!(!s.launcher_open());
    assert_eq!(s.window_manager().len(), 1);

    render(&mut s, now);
    // First quick-launch button sits right after the menu button.
    click(&mut s, 16, 0, now);
    assert_eq!(s.window_manager().len(), 2);
    assert_eq!(s.panel_count(), 2);
    let apps: Vec<_> = s.window_manager().windows().map(|w| w.app()).collect();
    assert_eq!(apps, vec![AppKind::AiStudio, AppKind::AiStudio]);
}

#[test]
fn taskbar_entry_minimizes_then_restores() {
    let mut s = shell(vec![AppKind::RagConsole]);
    let now = Instant::now();
    render(&mut s, now);
    let id = only_window(&s);

    click(&mut s, 1, 39, now);
    assert!(s.window_manager().get(id).unwrap().is_minimized());
    assert_eq!(s.window_manager().active(), None);

    render(&mut s, now);
    click(&mut s, 1, 39, now);
    assert!(!s.window_manager().get(id).unwrap().is_minimized());
    assert!(s.window_manager().is_active(id));
}

#[test]
fn header_buttons_close_and_maximize() {
    let mut s = shell(vec![AppKind::Terminal]);
    let now = Instant::now();
    render(&mut s, now);
    let id = only_window(&s);
    // Window spans columns 2..66; buttons end at the right border.
    click(&mut s, 60, 3, now);
    assert!(s.window_manager().get(id).unwrap().is_maximized());

    let buffer = render(&mut s, now);
    assert!(row_text(&buffer, 2).contains("[▫]"));
    // Maximized: the close button now sits at the desktop's right edge.
    click(&mut s, 117, 2, now);
    assert!(s.window_manager().is_empty());
    assert_eq!(s.panel_count(), 0);
}

#[test]
fn clicking_lower_window_raises_it() {
    let mut s = shell(vec![AppKind::Terminal, AppKind::Terminal]);
    let now = Instant::now();
    render(&mut s, now);
    let ids: Vec<_> = s.window_manager().windows().map(|w| w.id()).collect();
    assert!(s.window_manager().is_active(ids[1]));

    // Second window cascades to (5,4); (3,10) only hits the first.
    click(&mut s, 3, 10, now);
    assert!(s.window_manager().is_active(ids[0]));
}

#[test]
fn exit_confirmation_by_mouse() {
    let mut s = shell(Vec::new());
    let now = Instant::now();
    let quit = Event::Key(crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Char('q'),
        KeyModifiers::CONTROL,
    ));
    assert_eq!(s.handle_event_at(&quit, now), ControlFlow::Continue(()));
    assert!(s.exit_confirm_visible());
    let buffer = render(&mut s, now);
    let (x, y) = (0..SCREEN.height)
        .find_map(|y| {
            let text = row_text(&buffer, y);
            let byte = text.find("[ Exit ]")?;
            Some((text[..byte].chars().count() as u16, y))
        })
        .expect("dialog shows exit button");
    let flow = s.handle_event_at(
        &mouse(MouseEventKind::Down(MouseButton::Left), x + 2, y),
        now,
    );
    assert_eq!(flow, ControlFlow::Break(()));
}
