//! AI Studio: a linear training-job wizard.
//!
//! Steps run `Dataset → Model → Hyperparameters → Review → Launched`. Next
//! is always available before `Launched`; Back is unavailable only on the
//! first step. Launching submits a mock job whose status arrives through a
//! [`DelayedFeed`].

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::feed::{DelayedFeed, FeedSource};
use super::tabbed::render_feed_state;
use crate::components::{Component, ComponentContext};
use crate::ui::{UiFrame, rect_contains};

const DATASETS: [&str; 4] = [
    "support-tickets-2024 (212k rows)",
    "product-docs-qa (18k pairs)",
    "runbook-chunks (91k chunks)",
    "synthetic-dialogs (40k turns)",
];

const MODELS: [&str; 3] = [
    "base-small  (1.3B)",
    "base-medium (7B)",
    "base-large  (13B)",
];

const LEARNING_RATES: [&str; 4] = ["1e-5", "5e-5", "1e-4", "3e-4"];
const BATCH_SIZES: [u16; 4] = [8, 16, 32, 64];
const MAX_EPOCHS: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Dataset,
    Model,
    Hyperparameters,
    Review,
    Launched,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Dataset,
        WizardStep::Model,
        WizardStep::Hyperparameters,
        WizardStep::Review,
        WizardStep::Launched,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Dataset => "Dataset",
            WizardStep::Model => "Model",
            WizardStep::Hyperparameters => "Hyperparameters",
            WizardStep::Review => "Review",
            WizardStep::Launched => "Launched",
        }
    }

    fn index(self) -> usize {
        WizardStep::ALL
            .iter()
            .position(|step| *step == self)
            .unwrap_or_default()
    }

    fn next(self) -> Option<WizardStep> {
        WizardStep::ALL.get(self.index() + 1).copied()
    }

    fn prev(self) -> Option<WizardStep> {
        self.index()
            .checked_sub(1)
            .and_then(|idx| WizardStep::ALL.get(idx).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HyperField {
    Epochs,
    BatchSize,
    LearningRate,
}

#[derive(Debug)]
pub struct WizardPanel {
    step: WizardStep,
    dataset: usize,
    model: usize,
    epochs: u16,
    batch: usize,
    learning_rate: usize,
    field: HyperField,
    runs: u32,
    job: DelayedFeed,
    feed_delay: Duration,
    back_rect: Option<Rect>,
    next_rect: Option<Rect>,
}

impl WizardPanel {
    pub fn new(feed_delay: Duration) -> Self {
        Self {
            step: WizardStep::Dataset,
            dataset: 0,
            model: 0,
            epochs: 3,
            batch: 1,
            learning_rate: 1,
            field: HyperField::Epochs,
            runs: 0,
            job: DelayedFeed::new(FeedSource::Static(Vec::new()), feed_delay),
            feed_delay,
            back_rect: None,
            next_rect: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn can_go_back(&self) -> bool {
        self.step.prev().is_some()
    }

    pub fn can_go_next(&self) -> bool {
        self.step != WizardStep::Launched
    }

    /// Advance one step. Moving from `Review` to `Launched` submits the job.
    pub fn next(&mut self, now: Instant) -> bool {
        let Some(next) = self.step.next() else {
            return false;
        };
        if next == WizardStep::Launched {
            self.launch(now);
        }
        tracing::debug!(from = self.step.label(), to = next.label(), "wizard advanced");
        self.step = next;
        true
    }

    /// Go back one step. Leaving `Launched` discards the pending job view.
    pub fn back(&mut self) -> bool {
        let Some(prev) = self.step.prev() else {
            return false;
        };
        if self.step == WizardStep::Launched {
            self.job.cancel();
        }
        self.step = prev;
        true
    }

    /// Start over from the first step, keeping the chosen settings.
    pub fn new_run(&mut self) {
        self.job.cancel();
        self.step = WizardStep::Dataset;
    }

    fn launch(&mut self, now: Instant) {
        self.runs = self.runs.saturating_add(1);
        let lines = vec![
            format!("job ft-{:04} accepted", self.runs),
            format!("dataset  {}", DATASETS[self.dataset]),
            format!("model    {}", MODELS[self.model]),
            format!(
                "epochs {}  batch {}  lr {}",
                self.epochs, BATCH_SIZES[self.batch], LEARNING_RATES[self.learning_rate]
            ),
            "status   queued on gpu-pool-a".to_string(),
            String::new(),
            "r: new run".to_string(),
        ];
        self.job = DelayedFeed::new(FeedSource::Static(lines), self.feed_delay);
        self.job.request(now);
        tracing::debug!(run = self.runs, "training job submitted");
    }

    fn move_selection(&mut self, delta: isize) {
        fn step(value: usize, delta: isize, len: usize) -> usize {
            (value as isize + delta).rem_euclid(len as isize) as usize
        }
        match self.step {
            WizardStep::Dataset => self.dataset = step(self.dataset, delta, DATASETS.len()),
            WizardStep::Model => self.model = step(self.model, delta, MODELS.len()),
            WizardStep::Hyperparameters => {
                let fields = [
                    HyperField::Epochs,
                    HyperField::BatchSize,
                    HyperField::LearningRate,
                ];
                let idx = fields.iter().position(|f| *f == self.field).unwrap_or(0);
                self.field = fields[step(idx, delta, fields.len())];
            }
            WizardStep::Review | WizardStep::Launched => {}
        }
    }

    fn adjust_field(&mut self, delta: isize) -> bool {
        if self.step != WizardStep::Hyperparameters {
            return false;
        }
        match self.field {
            HyperField::Epochs => {
                let epochs = (self.epochs as isize + delta).clamp(1, MAX_EPOCHS as isize);
                self.epochs = epochs as u16;
            }
            HyperField::BatchSize => {
                self.batch = (self.batch as isize + delta).clamp(0, BATCH_SIZES.len() as isize - 1)
                    as usize;
            }
            HyperField::LearningRate => {
                self.learning_rate = (self.learning_rate as isize + delta)
                    .clamp(0, LEARNING_RATES.len() as isize - 1)
                    as usize;
            }
        }
        true
    }

    fn body_lines(&self) -> Vec<(String, bool)> {
        let pick = |items: &[&str], selected: usize| -> Vec<(String, bool)> {
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    let marker = if idx == selected { "(•)" } else { "( )" };
                    (format!("{marker} {item}"), idx == selected)
                })
                .collect()
        };
        match self.step {
            WizardStep::Dataset => pick(&DATASETS[..], self.dataset),
            WizardStep::Model => pick(&MODELS[..], self.model),
            WizardStep::Hyperparameters => {
                let rows = [
                    (HyperField::Epochs, format!("epochs         ‹ {} ›", self.epochs)),
                    (
                        HyperField::BatchSize,
                        format!("batch size     ‹ {} ›", BATCH_SIZES[self.batch]),
                    ),
                    (
                        HyperField::LearningRate,
                        format!("learning rate  ‹ {} ›", LEARNING_RATES[self.learning_rate]),
                    ),
                ];
                rows.into_iter()
                    .map(|(field, text)| (text, field == self.field))
                    .collect()
            }
            WizardStep::Review => vec![
                (format!("dataset        {}", DATASETS[self.dataset]), false),
                (format!("model          {}", MODELS[self.model]), false),
                (format!("epochs         {}", self.epochs), false),
                (format!("batch size     {}", BATCH_SIZES[self.batch]), false),
                (
                    format!("learning rate  {}", LEARNING_RATES[self.learning_rate]),
                    false,
                ),
                (String::new(), false),
                ("Next launches the job.".to_string(), false),
            ],
            WizardStep::Launched => Vec::new(),
        }
    }

    fn render_steps(&self, frame: &mut UiFrame<'_>, area: Rect) {
        let mut x = area.x;
        for (idx, step) in WizardStep::ALL.iter().enumerate() {
            let label = if idx == 0 {
                step.label().to_string()
            } else {
                format!(" › {}", step.label())
            };
            let style = if *step == self.step {
                Style::default()
                    .fg(crate::theme::accent_alt())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(crate::theme::muted_fg())
            };
            frame.set_string(x, area.y, &label, style);
            x = x.saturating_add(label.chars().count() as u16);
        }
    }

    fn render_buttons(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        let y = area.bottom().saturating_sub(1);
        let back = "[ Back ]";
        let next = if self.step == WizardStep::Review {
            "[ Launch ]"
        } else {
            "[ Next ]"
        };
        let enabled = Style::default()
            .fg(crate::theme::decorator_header_fg())
            .bg(crate::theme::decorator_header_bg());
        let disabled = Style::default().fg(crate::theme::muted_fg());
        let back_width = back.chars().count() as u16;
        let next_width = next.chars().count() as u16;
        frame.set_string(
            area.x,
            y,
            back,
            if self.can_go_back() { enabled } else { disabled },
        );
        self.back_rect = Some(Rect::new(area.x, y, back_width, 1));
        if self.can_go_next() {
            let next_x = area.right().saturating_sub(next_width);
            frame.set_string(next_x, y, next, enabled);
            self.next_rect = Some(Rect::new(next_x, y, next_width, 1));
        } else {
            self.next_rect = None;
        }
    }
}

impl Component for WizardPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height < 3 {
            return;
        }
        self.render_steps(frame, area);
        let body = Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: area.height.saturating_sub(3),
        };
        if self.step == WizardStep::Launched {
            render_feed_state(frame, body, &self.job.poll(ctx.now()));
        } else {
            for (offset, (line, selected)) in self.body_lines().into_iter().enumerate() {
                if offset as u16 >= body.height {
                    break;
                }
                let style = if selected {
                    Style::default()
                        .fg(crate::theme::menu_selected_fg())
                        .bg(crate::theme::menu_selected_bg())
                } else {
                    Style::default().fg(crate::theme::window_fg())
                };
                frame.set_string(body.x, body.y + offset as u16, &line, style);
            }
        }
        self.render_buttons(frame, area);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        let now = ctx.now();
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Enter | KeyCode::Char('n') => self.next(now),
                KeyCode::Backspace | KeyCode::Char('b') => self.back(),
                KeyCode::Char('r') if self.step == WizardStep::Launched => {
                    self.new_run();
                    true
                }
                KeyCode::Up => {
                    self.move_selection(-1);
                    true
                }
                KeyCode::Down => {
                    self.move_selection(1);
                    true
                }
                KeyCode::Left => self.adjust_field(-1),
                KeyCode::Right => self.adjust_field(1),
                _ => false,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if self
                    .back_rect
                    .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
                {
                    return self.back();
                }
                if self
                    .next_rect
                    .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
                {
                    return self.next(now);
                }
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::FeedState;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
    use ratatui::buffer::Buffer;

    fn press(p: &mut WizardPanel, code: KeyCode, now: Instant) -> bool {
        p.handle_event(
            &Event::Key(KeyEvent::new(code, KeyModifiers::NONE)),
            &ComponentContext::new(true, now),
        )
    }

    #[test]
    fn back_is_disabled_only_on_first_step() {
        let t0 = Instant::now();
        let mut p = WizardPanel::new(Duration::from_millis(100));
        assert!(!p.can_go_back());
        assert!(!p.back());
        assert_eq!(p.step(), WizardStep::Dataset);
        for expected in [
            WizardStep::Model,
            WizardStep::Hyperparameters,
            WizardStep::Review,
            WizardStep::Launched,
        ] {
            assert!(p.next(t0));
            assert_eq!(p.step(), expected);
            assert!(p.can_go_back());
        }
        assert!(!p.can_go_next());
        assert!(!p.next(t0));
        assert!(p.back());
        assert_eq!(p.step(), WizardStep::Review);
    }

    #[test]
    fn launching_submits_delayed_job() {
        let t0 = Instant::now();
        let mut p = WizardPanel::new(Duration::from_millis(100));
        for _ in 0..4 {
            p.next(t0);
        }
        assert!(matches!(p.job.poll(t0), FeedState::Pending { .. }));
        match p.job.poll(t0 + Duration::from_millis(100)) {
            FeedState::Ready(lines) => assert_eq!(lines[0], "job ft-0001 accepted"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(press(&mut p, KeyCode::Char('r'), t0));
        assert_eq!(p.step(), WizardStep::Dataset);
        assert_eq!(p.job.poll(t0), FeedState::Idle);
    }

    #[test]
    fn keys_edit_selection_and_hyperparameters() {
        let t0 = Instant::now();
        let mut p = WizardPanel::new(Duration::ZERO);
        assert!(press(&mut p, KeyCode::Up, t0));
        assert_eq!(p.dataset, DATASETS.len() - 1);
        // Left/Right only apply on the hyperparameter step.
        assert!(!press(&mut p, KeyCode::Right, t0));
        assert!(press(&mut p, KeyCode::Enter, t0));
        assert!(press(&mut p, KeyCode::Char('n'), t0));
        assert_eq!(p.step(), WizardStep::Hyperparameters);
        assert!(press(&mut p, KeyCode::Right, t0));
        assert_eq!(p.epochs, 4);
        assert!(press(&mut p, KeyCode::Down, t0));
        for _ in 0..10 {
            press(&mut p, KeyCode::Right, t0);
        }
        assert_eq!(p.batch, BATCH_SIZES.len() - 1);
        assert!(press(&mut p, KeyCode::Backspace, t0));
        assert_eq!(p.step(), WizardStep::Model);
    }

    #[test]
    fn rendered_buttons_respond_to_clicks() {
        let t0 = Instant::now();
        let area = Rect::new(0, 0, 50, 12);
        let mut buffer = Buffer::empty(area);
        let mut p = WizardPanel::new(Duration::ZERO);
        {
            let mut frame = UiFrame::from_parts(area, &mut buffer);
            p.render(&mut frame, area, &ComponentContext::new(true, t0));
        }
        let next = p.next_rect.unwrap();
        let click = |column, row| {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        let ctx = ComponentContext::new(true, t0);
        assert!(p.handle_event(&click(next.x, next.y), &ctx));
        assert_eq!(p.step(), WizardStep::Model);
        let back = p.back_rect.unwrap();
        assert!(p.handle_event(&click(back.x, back.y), &ctx));
        assert_eq!(p.step(), WizardStep::Dataset);
        // Back on the first step is a no-op.
        assert!(!p.handle_event(&click(back.x, back.y), &ctx));
    }
}
