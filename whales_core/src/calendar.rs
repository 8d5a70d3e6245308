use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The one operation this client ever sends. Kept stable so the server can
/// recognize it without a schema engine behind the endpoint.
const QUERY: &str = "\
query ($username: String) {
  getCommitCalendar(username: $username) {
    start
    end
  }
}";

/// A handle on the calendar server. Cheap to clone; the HTTP connection pool
/// lives with the caller (see the TUI's effect context).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// Base URL of the server, e.g. `http://localhost:8000`.
    pub server: String,
}

/// Variables for the calendar query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Req {
    /// Whose commits to ask about.
    pub username: String,
}

/// The slice of the calendar the query selects: the active game's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resp {
    /// When the window opens.
    pub start: DateTime<Utc>,

    /// When the window closes.
    pub end: DateTime<Utc>,
}

/// The request body: query text plus variables.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    /// The operation text.
    query: &'static str,

    /// The variables attached to the operation.
    variables: &'a Req,
}

/// The response body: data keyed by operation name.
#[derive(Debug, Deserialize)]
struct RespEnvelope {
    /// The payload, present on success.
    data: RespData,
}

/// The inner payload of a successful response.
#[derive(Debug, Deserialize)]
struct RespData {
    /// The calendar the server resolved.
    #[serde(rename = "getCommitCalendar")]
    get_commit_calendar: Resp,
}

/// A `Result` with this module's `Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Ways the query can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// We couldn't reach the server, or couldn't read what it sent back.
    #[error("problem communicating with the calendar server: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a calendar.
    #[error("calendar server answered {status}: {body}")]
    Status {
        /// The status code the server sent.
        status: reqwest::StatusCode,

        /// Whatever it sent instead of data.
        body: String,
    },
}

impl Client {
    /// A client for the server at the given base URL.
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
        }
    }

    /// Where queries go.
    fn endpoint(&self) -> String {
        format!("{}/api/v2/graphql", self.server.trim_end_matches('/'))
    }

    /// POST the commit-calendar query and decode the window it answers with.
    pub async fn commit_calendar(&self, http: &reqwest::Client, req: &Req) -> Result<Resp> {
        let response = http
            .post(self.endpoint())
            .json(&Envelope {
                query: QUERY,
                variables: req,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(Error::Status { status, body });
        }

        let envelope: RespEnvelope = response.json().await?;

        Ok(envelope.data.get_commit_calendar)
    }
}
