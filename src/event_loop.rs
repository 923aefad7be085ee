use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded pump that owns the input driver.
///
/// The handler is called with `None` once per tick, before input is polled,
/// and with `Some(event)` for every event that arrived during the tick.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(&mut self.driver, None)? == ControlFlow::Quit {
                return Ok(());
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (drags, scrolling) so drawing never lags input.
                loop {
                    let event = self.driver.read()?;
                    if handler(&mut self.driver, Some(event))? == ControlFlow::Quit {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    #[test]
    fn bursts_are_drained_between_ticks() {
        let events = VecDeque::from(vec![
            Event::Resize(1, 1),
            Event::Resize(2, 2),
            Event::Resize(3, 3),
        ]);
        let mut event_loop = EventLoop::new(Scripted(events), Duration::from_millis(1));
        let mut seen = Vec::new();
        event_loop
            .run(|_, event| {
                seen.push(event.clone());
                Ok(match event {
                    None if seen.len() > 1 => ControlFlow::Quit,
                    _ => ControlFlow::Continue,
                })
            })
            .unwrap();
        assert_eq!(
            seen,
            vec![
                None,
                Some(Event::Resize(1, 1)),
                Some(Event::Resize(2, 2)),
                Some(Event::Resize(3, 3)),
                None,
            ]
        );
    }

    #[test]
    fn quit_from_event_stops_immediately() {
        let events = VecDeque::from(vec![Event::FocusGained, Event::FocusLost]);
        let mut event_loop = EventLoop::new(Scripted(events), Duration::from_millis(1));
        event_loop
            .run(|_, event| {
                Ok(if event.is_some() {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(event_loop.driver().0.len(), 1);
    }
}
