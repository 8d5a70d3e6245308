use crate::error::Error;
use crate::state::State;
use axum::{extract, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use whales_core::calendar::Resp;

/// The envelope the client POSTs: query text plus variables.
#[derive(Debug, Deserialize)]
pub struct Req {
    /// The operation text. We answer exactly one operation (the commit
    /// calendar) and reject everything else; there is no schema engine
    /// behind this endpoint.
    query: String,

    /// The variables attached to the operation.
    #[serde(default)]
    variables: Variables,
}

/// Variables the calendar query can carry.
#[derive(Debug, Default, Deserialize)]
pub struct Variables {
    /// Whose commits to report on. Logged; the active window is the same for
    /// everyone.
    username: Option<String>,
}

/// Answer the commit-calendar query with the active game's window.
#[tracing::instrument(skip_all)]
pub async fn handler(
    extract::State(state): extract::State<State>,
    Json(req): Json<Req>,
) -> Result<Json<Value>, Error> {
    if !req.query.contains("getCommitCalendar") {
        return Err(Error::custom("unsupported query"));
    }

    let game = state.game();
    tracing::debug!(username = ?req.variables.username, "answering commit calendar");

    let resp = Resp {
        start: game.start,
        end: game.end,
    };

    Ok(Json(json!({
        "data": {
            "getCommitCalendar": resp,
        }
    })))
}

#[cfg(test)]
mod test {
    use super::*;

    const QUERY: &str =
        "query ($username: String) { getCommitCalendar(username: $username) { start end } }";

    fn request(query: &str) -> Json<Req> {
        Json(Req {
            query: query.to_string(),
            variables: Variables {
                username: Some("rmyers".to_string()),
            },
        })
    }

    #[test_log::test(tokio::test)]
    async fn answers_the_calendar_query() {
        let state = State::new(30);
        let game = state.game();

        let Json(value) = handler(extract::State(state), request(QUERY)).await.unwrap();

        let resp: Resp =
            serde_json::from_value(value["data"]["getCommitCalendar"].clone()).unwrap();

        assert_eq!(resp.start, game.start);
        assert_eq!(resp.end, game.end);
    }

    #[test_log::test(tokio::test)]
    async fn ignores_missing_variables() {
        let state = State::new(30);

        let req = Json(Req {
            query: QUERY.to_string(),
            variables: Variables::default(),
        });

        assert!(handler(extract::State(state), req).await.is_ok());
    }

    #[test_log::test(tokio::test)]
    async fn rejects_unknown_queries() {
        let state = State::new(30);

        let err = handler(extract::State(state), request("query { hello }"))
            .await
            .unwrap_err();

        let (status, message) = err.into_parts();
        assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(message, "unsupported query");
    }
}
