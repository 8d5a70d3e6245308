use crate::config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::process::ExitCode;
use whales_core::{
    calendar,
    registry::{self, Definition, Registry, TagName},
    Count, Counter,
};

/// Things that can happen to this app
mod action;
pub use action::Action;

/// Side effects, and how to run them
mod effect;
pub use effect::{Effect, EffectContext};

/// Overlays shown above the counter
mod popover;
use popover::Popover;

/// The tag the counter registers under.
const WIDGET_TAG: &str = "whale-counter";

/// The "functional core" of the app.
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Where the app is in its lifecycle
    state: AppState,

    /// Where to send the per-increment calendar query, when we're running
    /// the variant that issues one.
    calendar: Option<CalendarTarget>,
}

/// The server and username the query-issuing variant reports on.
#[derive(Debug, Clone)]
struct CalendarTarget {
    /// Which server to ask
    client: calendar::Client,

    /// Whose commits to ask about
    username: String,
}

impl App {
    /// Create a new instance of the app. Registers the counter's tag in a
    /// fresh registry and instantiates the widget from it with the
    /// host-supplied count.
    pub fn new(config: &Config) -> Result<Self, registry::Error> {
        let mut registry = Registry::new();
        let tag = TagName::new(WIDGET_TAG)?;

        registry.define(
            tag.clone(),
            Definition {
                initial: Count::zero(),
            },
        )?;
        let widget = registry.instantiate(&tag, Some(config.initial_count()))?;

        Ok(Self {
            status_line: None,
            state: AppState::Running(Running {
                registry,
                widget,
                popover: None,
            }),
            calendar: config.calendar_client().map(|client| CalendarTarget {
                client,
                username: config.username().to_string(),
            }),
        })
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match &self.state {
            AppState::Running(running) => {
                let tags: Vec<String> = running
                    .registry
                    .tags()
                    .map(|tag| format!("<{tag}>"))
                    .collect();

                let block = Block::default().borders(Borders::ALL).title(tags.join(" "));
                let inner = block.inner(body_area);
                frame.render_widget(block, body_area);

                let rows = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .flex(Flex::Center);
                let [whales_area, _, button_area] = rows.areas(inner);

                frame.render_widget(
                    Paragraph::new(format!("Whales: {}", running.widget.glyphs())),
                    whales_area,
                );

                frame.render_widget(
                    Paragraph::new("[ Click Me to Whale it Up! ]")
                        .alignment(Alignment::Center)
                        .style(Style::new().bold()),
                    button_area,
                );

                if let Some(popover) = &running.popover {
                    popover.render(frame, body_area);
                }
            }
            AppState::Exiting(_) => frame.render_widget(Paragraph::new("Exiting…"), body_area),
        };

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line.as_str(),
            None => "Counting whales. Press ? for help.",
        });

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side
    /// effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),

            Action::FetchedCalendar(Ok(resp)) => {
                tracing::info!(start = %resp.start, end = %resp.end, "got commit calendar");
                self.status_line = Some(format!(
                    "Calendar: {} to {}",
                    resp.start.to_rfc2822(),
                    resp.end.to_rfc2822()
                ));

                Vec::new()
            }

            Action::FetchedCalendar(Err(problem)) => {
                tracing::error!(?problem, "calendar query failed");
                self.status_line = Some(problem.to_string());

                Vec::new()
            }

            Action::Problem(problem) => {
                self.status_line = Some(problem);

                Vec::new()
            }
        }
    }

    /// Keyboard dispatch. Increments go to the widget; everything else is app
    /// chrome.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        if self.state.has_popover() {
            // Any key puts the help away.
            self.state.map_running_mut(|running| running.popover = None);

            return Vec::new();
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Exiting(ExitCode::SUCCESS);

                Vec::new()
            }
            KeyCode::Char('w' | ' ') | KeyCode::Enter => self.increment(),
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state
                    .map_running_mut(|running| running.popover = Some(Popover::Help));

                Vec::new()
            }
            _ => {
                self.status_line = Some(format!("Unknown key {key:?}"));

                Vec::new()
            }
        }
    }

    /// One more whale, plus the calendar query when we're the variant that
    /// sends one. Exactly one query per increment; earlier outcomes don't
    /// gate later ones.
    fn increment(&mut self) -> Vec<Effect> {
        if self
            .state
            .map_running_mut(|running| running.widget.increment())
            .is_none()
        {
            return Vec::new();
        }

        self.status_line = None;

        match &self.calendar {
            Some(target) => vec![Effect::FetchCalendar(
                target.client.clone(),
                calendar::Req {
                    username: target.username.clone(),
                },
            )],
            None => Vec::new(),
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        if let AppState::Exiting(code) = &self.state {
            Some(*code)
        } else {
            None
        }
    }

    /// The widget's current count, for assertions.
    #[cfg(test)]
    fn count(&self) -> Option<Count> {
        match &self.state {
            AppState::Running(running) => Some(running.widget.count()),
            AppState::Exiting(_) => None,
        }
    }
}

/// App lifecycle
#[derive(Debug)]
enum AppState {
    /// The widget is on screen and taking input
    Running(Running),

    /// We're done and want the following exit code after final effects
    Exiting(ExitCode),
}

impl AppState {
    /// Do something to the inner running state, if the app is indeed running.
    fn map_running_mut<T>(&mut self, edit: impl FnOnce(&mut Running) -> T) -> Option<T> {
        if let Self::Running(running) = self {
            Some(edit(running))
        } else {
            None
        }
    }

    /// Convenience method to check whether the help popover is up
    fn has_popover(&self) -> bool {
        if let Self::Running(running) = self {
            running.popover.is_some()
        } else {
            false
        }
    }
}

/// State while the widget is on screen
#[derive(Debug)]
struct Running {
    /// The registrations this app owns. Tags live here, not in any global.
    registry: Registry,

    /// The one widget we host
    widget: Counter,

    /// Overlay above the counter, if any
    popover: Option<Popover>,
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;
    use crossterm::event::KeyModifiers;

    fn app(args: &[&str]) -> App {
        let argv: Vec<&str> = std::iter::once("whales").chain(args.iter().copied()).collect();

        App::new(&Config::try_parse_from(argv).unwrap()).unwrap()
    }

    fn press(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn starts_from_the_host_count() {
        let app = app(&["--count", "3"]);

        assert_eq!(app.count(), Some(Count(3)));
    }

    #[test]
    fn increments_on_the_whale_key() {
        let mut app = app(&[]);

        let effects = app.handle(press(KeyCode::Char('w')));

        assert_eq!(app.count(), Some(Count(1)));
        assert!(effects.is_empty());
    }

    #[test]
    fn two_presses_from_three_is_five() {
        let mut app = app(&["--count", "3"]);

        app.handle(press(KeyCode::Char('w')));
        app.handle(press(KeyCode::Enter));

        assert_eq!(app.count(), Some(Count(5)));
    }

    #[test]
    fn each_increment_queries_the_server_once() {
        let mut app = app(&["--server", "http://localhost:8000"]);

        for expected in 1..=3u32 {
            let effects = app.handle(press(KeyCode::Char('w')));

            assert_eq!(app.count(), Some(Count(expected)));
            assert_eq!(effects.len(), 1);
            assert!(matches!(effects[0], Effect::FetchCalendar(_, _)));
        }
    }

    #[test]
    fn problems_do_not_stop_later_queries() {
        let mut app = app(&["--server", "http://localhost:8000"]);

        app.handle(press(KeyCode::Char('w')));
        app.handle(Action::Problem("the server is down".to_string()));

        let effects = app.handle(press(KeyCode::Char('w')));

        assert_eq!(effects.len(), 1);
        assert_eq!(app.count(), Some(Count(2)));
    }

    #[test]
    fn the_local_variant_never_queries() {
        let mut app = app(&[]);

        for _ in 0..5 {
            assert!(app.handle(press(KeyCode::Char(' '))).is_empty());
        }

        assert_eq!(app.count(), Some(Count(5)));
    }

    #[test]
    fn q_exits() {
        let mut app = app(&[]);

        app.handle(press(KeyCode::Char('q')));

        assert!(app.should_exit().is_some());
    }

    #[test]
    fn any_key_dismisses_help() {
        let mut app = app(&[]);

        app.handle(press(KeyCode::Char('?')));
        app.handle(press(KeyCode::Char('w')));

        // The keypress closed the popover instead of counting a whale.
        assert_eq!(app.count(), Some(Count::zero()));
    }
}
