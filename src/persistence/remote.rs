//! HTTP score endpoints
//!
//! - `POST submit_url` with form fields `player_name`, `score`
//!   → `{"success": true, ...}` or `{"error": "..."}` with 400/405/500
//! - `GET leaderboard_url?limit=N&format=json`
//!   → `[{"player_name": "...", "score": N}, ...]`, or from endpoints that
//!   only render markup, one `<div>{rank}. {name}: {score}</div>` per row

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};

/// Client for the remote score endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteScoreStore {
    pub submit_url: String,
    pub leaderboard_url: String,
}

impl RemoteScoreStore {
    pub fn new(submit_url: impl Into<String>, leaderboard_url: impl Into<String>) -> Self {
        Self {
            submit_url: submit_url.into(),
            leaderboard_url: leaderboard_url.into(),
        }
    }

    /// Leaderboard query URL for the best `limit` scores
    pub fn leaderboard_query(&self, limit: usize) -> String {
        let sep = if self.leaderboard_url.contains('?') { '&' } else { '?' };
        format!("{}{}limit={}&format=json", self.leaderboard_url, sep, limit)
    }
}

/// Text shown by the fragment endpoint when the table is empty
const EMPTY_ROW: &str = "No high scores yet";
/// Text shown by the fragment endpoint when its query failed
const ERROR_ROW: &str = "Error loading high scores";

/// Decode a leaderboard reply body: JSON rows, or the `<div>` fragment
pub fn parse_leaderboard(body: &str, limit: usize) -> Result<Leaderboard, ScoreError> {
    let rows = match serde_json::from_str::<Vec<LeaderboardEntry>>(body) {
        Ok(rows) => rows,
        Err(_) if body.trim_start().starts_with('<') => parse_fragment(body)?,
        Err(json_err) => return Err(json_err.into()),
    };
    Ok(Leaderboard::from_rows(rows, limit))
}

/// Rows out of `<div ...>1. Ann: 230</div>` markup
fn parse_fragment(body: &str) -> Result<Vec<LeaderboardEntry>, ScoreError> {
    let mut rows = Vec::new();
    for chunk in body.split("</div>") {
        let text = unescape_html(strip_tags(chunk).trim());
        if text.is_empty() || text == EMPTY_ROW {
            continue;
        }
        if text == ERROR_ROW {
            return Err(ScoreError::Server(text));
        }
        rows.push(parse_row(&text)?);
    }
    Ok(rows)
}

/// `"{rank}. {name}: {score}"`; names may themselves contain ": "
fn parse_row(text: &str) -> Result<LeaderboardEntry, ScoreError> {
    let malformed = || ScoreError::Malformed(format!("unrecognized leaderboard row: {}", text));

    let (rank, rest) = text.split_once(". ").ok_or_else(malformed)?;
    rank.parse::<usize>().map_err(|_| malformed())?;
    let (name, score) = rest.rsplit_once(": ").ok_or_else(malformed)?;
    let score = score.trim().parse::<u64>().map_err(|_| malformed())?;
    Ok(LeaderboardEntry::new(name, score))
}

fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Undo `htmlspecialchars` with `ENT_QUOTES`
fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response, UrlSearchParams};

    use super::{RemoteScoreStore, parse_leaderboard};
    use crate::error::ScoreError;
    use crate::leaderboard::Leaderboard;
    use crate::persistence::Submission;

    fn js_err(e: wasm_bindgen::JsValue) -> ScoreError {
        ScoreError::Network(format!("{:?}", e))
    }

    impl RemoteScoreStore {
        /// Submit a score. Invalid input is rejected before any request.
        pub async fn submit_score(&self, player_name: &str, score: i64) -> Result<(), ScoreError> {
            let submission = Submission::new(player_name, score)?;

            let form = UrlSearchParams::new().map_err(js_err)?;
            form.append("player_name", &submission.player_name);
            form.append("score", &submission.score.to_string());

            let init = RequestInit::new();
            init.set_method("POST");
            init.set_body(&form.into());
            let request = Request::new_with_str_and_init(&self.submit_url, &init).map_err(js_err)?;

            let response = send(request).await?;
            log::info!(
                "Score {} for {} saved (HTTP {})",
                submission.score,
                submission.player_name,
                response.status()
            );
            Ok(())
        }

        /// Fetch the best `limit` scores
        pub async fn fetch_leaderboard(&self, limit: usize) -> Result<Leaderboard, ScoreError> {
            let init = RequestInit::new();
            init.set_method("GET");
            let request = Request::new_with_str_and_init(&self.leaderboard_query(limit), &init)
                .map_err(js_err)?;

            let response = send(request).await?;
            let body = text(&response).await?;
            parse_leaderboard(&body, limit)
        }
    }

    /// Perform the request, turning non-2xx replies into errors
    async fn send(request: Request) -> Result<Response, ScoreError> {
        let window = web_sys::window().ok_or_else(|| ScoreError::Network("no window".into()))?;
        let reply = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?;
        let response: Response = reply.dyn_into().map_err(js_err)?;

        if response.ok() {
            Ok(response)
        } else {
            let body = text(&response).await.unwrap_or_default();
            Err(ScoreError::from_status(response.status(), &body))
        }
    }

    async fn text(response: &Response) -> Result<String, ScoreError> {
        let value = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        value
            .as_string()
            .ok_or_else(|| ScoreError::Malformed("response body is not text".to_string()))
    }
}
