use super::Action;
use whales_core::calendar;

/// Connections to external services that effects use. Shared so every query
/// reuses one HTTP connection pool for the life of the app.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,
}

impl EffectContext {
    /// Get a fresh `EffectContext`
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Ask the server for the commit calendar. One query per increment; the
    /// result comes back as an `Action` whether it worked or not, and
    /// nothing waits on it.
    FetchCalendar(calendar::Client, calendar::Req),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, ctx: &EffectContext) -> Option<Action> {
        match self {
            Self::FetchCalendar(client, req) => {
                tracing::debug!(username = %req.username, "fetching commit calendar");

                let result = client.commit_calendar(&ctx.http, &req).await;

                Some(Action::FetchedCalendar(result))
            }
        }
    }
}
