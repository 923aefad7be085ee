use std::io;
use std::ops::ControlFlow as Flow;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::shell::DesktopShell;

/// Drive `shell` until the user confirms exit.
///
/// Every idle tick redraws the desktop; every event is routed through the
/// shell. Mouse capture changes the shell asks for are applied to the input
/// driver after each step.
pub fn run_shell<D, O>(
    shell: &mut DesktopShell,
    input: D,
    output: &mut O,
    poll_interval: Duration,
) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
{
    let mut event_loop = EventLoop::new(input, poll_interval);
    event_loop
        .driver()
        .set_mouse_capture(shell.mouse_capture_enabled())?;
    tracing::info!(
        windows = shell.window_manager().len(),
        poll_ms = poll_interval.as_millis() as u64,
        "desktop started"
    );

    event_loop.run(|driver, event| {
        let flow = match event {
            None => {
                output.draw(|frame| shell.render(frame))?;
                ControlFlow::Continue
            }
            Some(Event::Mouse(_)) if !shell.mouse_capture_enabled() => ControlFlow::Continue,
            Some(evt) => match shell.handle_event(&evt) {
                Flow::Break(()) => ControlFlow::Quit,
                Flow::Continue(()) => ControlFlow::Continue,
            },
        };
        if let Some(enabled) = shell.take_mouse_capture_change()
            && let Err(err) = driver.set_mouse_capture(enabled)
        {
            tracing::warn!(%err, enabled, "could not change mouse capture");
        }
        Ok(flow)
    })?;

    tracing::info!("desktop exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::{AppKind, PanelDeps};
    use crate::config::ShellConfig;
    use crate::tracing_sub::LogBuffer;
    use crate::ui::UiFrame;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        events: VecDeque<Event>,
        capture: Vec<bool>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }

        fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
            self.capture.push(enabled);
            Ok(())
        }
    }

    struct BufferOutput {
        buffer: Buffer,
        draws: usize,
    }

    impl OutputDriver for BufferOutput {
        fn enter(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn exit(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn draw<F>(&mut self, f: F) -> io::Result<()>
        where
            F: FnOnce(&mut UiFrame<'_>),
        {
            let area = self.buffer.area;
            let mut frame = UiFrame::from_parts(area, &mut self.buffer);
            f(&mut frame);
            self.draws += 1;
            Ok(())
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn shell(config: &ShellConfig) -> DesktopShell {
        let deps = PanelDeps {
            feed_delay: Duration::ZERO,
            logs: LogBuffer::new(16),
            hostname: "test-host".to_string(),
        };
        DesktopShell::with_deps(config, deps)
    }

    #[test]
    fn quit_requires_confirmation_and_flushes_capture() {
        let config = ShellConfig {
            open: vec![AppKind::Terminal],
            ..ShellConfig::default()
        };
        let mut shell = shell(&config);
        let mut input = Scripted::default();
        input.events.extend([
            key(KeyCode::F(12), KeyModifiers::NONE),
            // Ignored while capture is off.
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 100,
                row: 1,
                modifiers: KeyModifiers::NONE,
            }),
            key(KeyCode::Char('q'), KeyModifiers::CONTROL),
            key(KeyCode::Enter, KeyModifiers::NONE),
        ]);
        let mut output = BufferOutput {
            buffer: Buffer::empty(Rect::new(0, 0, 100, 30)),
            draws: 0,
        };
        run_shell(&mut shell, &mut input, &mut output, Duration::from_millis(1)).unwrap();

        assert!(input.events.is_empty());
        assert_eq!(input.capture, vec![true, false]);
        assert!(output.draws >= 1);
        assert_eq!(shell.window_manager().len(), 1);
    }
}
