use cloud_desk::apps::AppKind;
use cloud_desk::window::{Point, Size, WindowManager, WindowState, WmError};
use ratatui::layout::Rect;

#[test]
fn new_window_is_focused() {
    let mut wm = WindowManager::new();
    assert_eq!(wm.active(), None);

    let a = wm.open_app(AppKind::RagConsole);
    assert_eq!(a.get(), 1);
    assert_eq!(wm.active(), Some(a));

    let b = wm.open_app(AppKind::EtlStudio);
    assert_eq!(b.get(), 2);
    assert_eq!(wm.active(), Some(b));
}

#[test]
fn focus_minimize_maximize_walkthrough() {
    let mut wm = WindowManager::new();
    wm.set_desktop_area(Rect::new(0, 1, 640, 480));
    let a = wm.open_app(AppKind::AiStudio);
    let b = wm.open_app(AppKind::ServerAdmin);
    assert_eq!(wm.get(a).map(|w| w.z_index()), Some(1));
    assert_eq!(wm.get(b).map(|w| w.z_index()), Some(2));

    wm.focus(a).unwrap();
    assert_eq!(wm.get(a).map(|w| w.z_index()), Some(3));
    assert_eq!(wm.get(b).map(|w| w.z_index()), Some(2));
    assert!(wm.is_active(a));

    wm.minimize(a).unwrap();
    assert_eq!(wm.get(a).map(|w| w.state()), Some(WindowState::Minimized));
    assert_eq!(wm.active(), Some(b));
    assert_eq!(wm.get(b).map(|w| w.z_index()), Some(2));

    wm.move_to(b, 40, 40).unwrap();
    wm.resize(b, 300, 200).unwrap();
    assert!(wm.maximize(b).unwrap());
    assert_eq!(wm.get(b).map(|w| w.state()), Some(WindowState::Maximized));
    assert_eq!(
        wm.frame_of(b).map(|f| (f.x, f.y, f.width, f.height)),
        Some((0, 1, 640, 480))
    );

    assert!(!wm.maximize(b).unwrap());
    let window = wm.get(b).unwrap();
    assert_eq!(window.position(), Point::new(40, 40));
    assert_eq!(window.size(), Size::new(300, 200));
    assert_eq!(window.state(), WindowState::Normal);
}

#[test]
fn unknown_ids_are_reported_and_state_is_untouched() {
    let mut wm = WindowManager::new();
    let a = wm.open_app(AppKind::Terminal);
    let b = wm.open_app(AppKind::Terminal);
    wm.close(a).unwrap();

    assert_eq!(wm.close(a), Err(WmError::NotFound(a)));
    assert_eq!(wm.focus(a), Err(WmError::NotFound(a)));
    assert_eq!(wm.minimize(a), Err(WmError::NotFound(a)));
    assert_eq!(wm.maximize(a), Err(WmError::NotFound(a)));
    assert_eq!(wm.move_to(a, 1, 1), Err(WmError::NotFound(a)));
    assert_eq!(wm.len(), 1);
    assert_eq!(wm.active(), Some(b));

    // Ids are never reused.
    let c = wm.open_app(AppKind::Terminal);
    assert_eq!(c.get(), 3);
}

#[test]
fn maximized_windows_refuse_moves_and_minimized_ones_refuse_focus() {
    let mut wm = WindowManager::new();
    let a = wm.open_app(AppKind::McpDashboard);
    wm.maximize(a).unwrap();
    let err = wm.move_to(a, 5, 5).unwrap_err();
    assert!(matches!(err, WmError::InvalidTransition { action: "move", .. }));
    assert_eq!(err.window(), a);

    wm.minimize(a).unwrap();
    assert!(wm.focus(a).is_err());
    assert_eq!(wm.active(), None);
    // Minimized dominates maximized.
    assert_eq!(wm.get(a).map(|w| w.state()), Some(WindowState::Minimized));
    assert!(wm.draw_order().is_empty());

    wm.restore(a).unwrap();
    assert_eq!(wm.active(), Some(a));
    assert_eq!(wm.get(a).map(|w| w.state()), Some(WindowState::Maximized));
}

#[test]
fn draw_order_is_bottom_to_top_and_taskbar_keeps_creation_order() {
    let mut wm = WindowManager::new();
    wm.set_desktop_area(Rect::new(0, 1, 120, 38));
    let a = wm.open_app(AppKind::AiStudio);
    let b = wm.open_app(AppKind::RagConsole);
    let c = wm.open_app(AppKind::VirtualCampus);
    wm.focus(a).unwrap();
    wm.minimize(b).unwrap();

    let order: Vec<_> = wm.draw_order().iter().map(|v| v.id).collect();
    assert_eq!(order, vec![c, a]);
    assert!(wm.draw_order().last().is_some_and(|v| v.focused));

    let entries = wm.taskbar_entries();
    let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![a, b, c]);
    assert!(entries[1].minimized);
    assert!(entries[0].focused);
}

#[test]
fn window_at_picks_topmost_visible_window() {
    let mut wm = WindowManager::new();
    wm.set_desktop_area(Rect::new(0, 1, 120, 38));
    let a = wm.open_app(AppKind::Terminal);
    let b = wm.open_app(AppKind::Terminal);
    wm.move_to(a, 10, 10).unwrap();
    wm.move_to(b, 12, 11).unwrap();

    assert_eq!(wm.window_at(13, 12), Some(b));
    assert_eq!(wm.window_at(10, 10), Some(a));
    wm.minimize(b).unwrap();
    assert_eq!(wm.window_at(13, 12), Some(a));
    assert_eq!(wm.window_at(0, 0), None);
}

#[test]
fn cycle_focus_wraps_in_creation_order() {
    let mut wm = WindowManager::new();
    let a = wm.open_app(AppKind::AiStudio);
    let b = wm.open_app(AppKind::RagConsole);
    let c = wm.open_app(AppKind::EtlStudio);
    assert_eq!(wm.cycle_focus(true), Some(a));
    assert_eq!(wm.cycle_focus(true), Some(b));
    assert_eq!(wm.cycle_focus(false), Some(a));
    assert_eq!(wm.cycle_focus(false), Some(c));
}
