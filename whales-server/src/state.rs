use chrono::{DateTime, Duration, Utc};

/// Shared state needed by requests.
#[derive(Debug, Clone)]
pub struct State {
    /// The active game's window.
    game: Game,
}

/// The date range commits count toward.
#[derive(Debug, Clone, Copy)]
pub struct Game {
    /// When the game opens.
    pub start: DateTime<Utc>,

    /// When the game closes.
    pub end: DateTime<Utc>,
}

impl State {
    /// Create a new state. The active game ends at startup and reaches back
    /// `game_days` days.
    pub fn new(game_days: i64) -> Self {
        let end = Utc::now();
        let span = Duration::try_days(game_days).unwrap_or_else(Duration::zero);

        Self {
            game: Game {
                start: end - span,
                end,
            },
        }
    }

    /// The active game.
    pub fn game(&self) -> Game {
        self.game
    }
}
