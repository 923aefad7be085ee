//! A canned shell: a line editor in front of a handful of built-in commands.

use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::AppKind;
use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

const USER: &str = "operator";
const SCROLLBACK_LINES: usize = 500;

const HELP: &str = indoc! {"
    built-in commands:
      help              show this text
      echo ARGS...      print arguments
      whoami            print the current user
      hostname          print the host name
      ls                list the home directory
      date              print seconds since the unix epoch
      apps              list launchable apps
      clear             clear the screen
"};

const LISTING: &str = indoc! {"
    datasets/    notebooks/    pipelines/
    README.md    campus.toml   mcp-servers.json
"};

#[derive(Debug)]
pub struct TerminalPanel {
    hostname: String,
    scrollback: Vec<String>,
    input: String,
}

impl TerminalPanel {
    pub fn new(hostname: String) -> Self {
        Self {
            hostname,
            scrollback: vec!["cloud-desk terminal. Type `help` for commands.".to_string()],
            input: String::new(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("{USER}@{}:~$ ", self.hostname)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn scrollback(&self) -> &[String] {
        &self.scrollback
    }

    fn push(&mut self, line: impl Into<String>) {
        self.scrollback.push(line.into());
        let overflow = self.scrollback.len().saturating_sub(SCROLLBACK_LINES);
        if overflow > 0 {
            self.scrollback.drain(..overflow);
        }
    }

    fn push_text(&mut self, text: &str) {
        for line in text.lines() {
            self.push(line);
        }
    }

    /// Run the current input line and clear it.
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        let echo = format!("{}{}", self.prompt(), line);
        self.push(echo);
        self.execute(&line);
    }

    /// Run one command line, appending its output to the scrollback.
    pub fn execute(&mut self, line: &str) {
        let argv = match shell_words::split(line) {
            Ok(argv) => argv,
            Err(err) => {
                self.push(format!("parse error: {err}"));
                return;
            }
        };
        let Some((command, args)) = argv.split_first() else {
            return;
        };
        tracing::debug!(command = command.as_str(), args = args.len(), "terminal command");
        match command.as_str() {
            "help" => self.push_text(HELP),
            "echo" => self.push(args.join(" ")),
            "whoami" => self.push(USER),
            "hostname" => self.push(self.hostname.clone()),
            "ls" => self.push_text(LISTING),
            "date" => {
                let secs = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or_default();
                self.push(format!("{secs} (unix)"));
            }
            "apps" => {
                for app in AppKind::ALL {
                    self.push(format!("{:<16}{}", app.slug(), app.title()));
                }
            }
            "clear" => self.scrollback.clear(),
            other => self.push(format!("{other}: command not found")),
        }
    }
}

impl Component for TerminalPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let history_rows = area.height.saturating_sub(1) as usize;
        let skip = self.scrollback.len().saturating_sub(history_rows);
        let text_style = Style::default().fg(crate::theme::window_fg());
        for (row, line) in self.scrollback.iter().skip(skip).enumerate() {
            frame.set_string(area.x, area.y + row as u16, line, text_style);
        }
        let prompt_row = area.y + (self.scrollback.len() - skip) as u16;
        let prompt = self.prompt();
        let prompt_style = Style::default()
            .fg(crate::theme::success_bg())
            .add_modifier(Modifier::BOLD);
        frame.set_string(area.x, prompt_row, &prompt, prompt_style);
        let input_x = area.x + prompt.chars().count() as u16;
        frame.set_string(input_x, prompt_row, &self.input, text_style);
        if ctx.focused() {
            let cursor_x = input_x + self.input.chars().count() as u16;
            frame.set_string(
                cursor_x,
                prompt_row,
                " ",
                Style::default().bg(crate::theme::window_fg()),
            );
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Enter => {
                self.submit();
                true
            }
            KeyCode::Backspace => {
                self.input.pop();
                true
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scrollback.clear();
                true
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                true
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.push(c);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use ratatui::buffer::Buffer;

    fn run(p: &mut TerminalPanel, line: &str) -> Vec<String> {
        let before = p.scrollback().len();
        p.execute(line);
        p.scrollback()[before..].to_vec()
    }

    #[test]
    fn echo_respects_quoting() {
        let mut p = TerminalPanel::new("box".to_string());
        assert_eq!(
            run(&mut p, r#"echo "hello   world" again"#),
            vec!["hello   world again".to_string()]
        );
    }

    #[test]
    fn unknown_command_and_parse_error() {
        let mut p = TerminalPanel::new("box".to_string());
        assert_eq!(
            run(&mut p, "rm -rf /"),
            vec!["rm: command not found".to_string()]
        );
        let out = run(&mut p, "echo \"unterminated");
        assert!(out[0].starts_with("parse error"));
        assert!(run(&mut p, "   ").is_empty());
    }

    #[test]
    fn builtins_report_host_user_and_apps() {
        let mut p = TerminalPanel::new("node-7".to_string());
        assert_eq!(run(&mut p, "hostname"), vec!["node-7".to_string()]);
        assert_eq!(run(&mut p, "whoami"), vec!["operator".to_string()]);
        let apps = run(&mut p, "apps");
        assert_eq!(apps.len(), AppKind::ALL.len());
        assert!(apps[0].starts_with("ai-studio"));
        run(&mut p, "clear");
        assert!(p.scrollback().is_empty());
    }

    #[test]
    fn typing_and_enter_submit_line() {
        let mut p = TerminalPanel::new("box".to_string());
        let ctx = ComponentContext::default();
        for c in "whoami".chars() {
            assert!(p.handle_event(
                &Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
                &ctx
            ));
        }
        assert_eq!(p.input(), "whoami");
        p.handle_event(
            &Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            &ctx,
        );
        assert_eq!(p.input(), "");
        let tail = &p.scrollback()[p.scrollback().len() - 2..];
        assert_eq!(tail[0], "operator@box:~$ whoami");
        assert_eq!(tail[1], "operator");
    }

    #[test]
    fn render_keeps_prompt_on_screen() {
        let mut p = TerminalPanel::new("box".to_string());
        for i in 0..20 {
            p.execute(&format!("echo line{i}"));
        }
        let area = Rect::new(0, 0, 30, 4);
        let mut buffer = Buffer::empty(area);
        {
            let mut frame = UiFrame::from_parts(area, &mut buffer);
            p.render(&mut frame, area, &ComponentContext::default());
        }
        let last: String = (0..area.width)
            .filter_map(|x| buffer.cell((x, 3)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(last.starts_with("operator@box:~$"));
        let above: String = (0..area.width)
            .filter_map(|x| buffer.cell((x, 2)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(above.starts_with("line19"));
    }
}
