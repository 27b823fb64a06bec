use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::http_client::http_client;
use crate::state::{
    EventPayload, LeagueSettings, MatchEvent, MatchStatus, MatchSummary, Referee, RosterPlayer,
};

/// Query-string builder for the backend's admin-resource list protocol:
/// `range`, `sort`, and `filter` are JSON values, percent-escaped into the
/// URL.
pub fn list_query(
    range: Option<(u32, u32)>,
    sort: Option<(&str, &str)>,
    filter: Option<&Value>,
) -> String {
    let mut parts = Vec::new();
    if let Some((from, to)) = range {
        let raw = format!("[{from},{to}]");
        parts.push(format!("range={}", urlencoding::encode(&raw)));
    }
    if let Some((field, order)) = sort {
        let raw = format!("[\"{field}\",\"{order}\"]");
        parts.push(format!("sort={}", urlencoding::encode(&raw)));
    }
    if let Some(filter) = filter {
        let raw = filter.to_string();
        parts.push(format!("filter={}", urlencoding::encode(&raw)));
    }
    parts.join("&")
}

fn resource_url(base: &str, path: &str, query: &str) -> String {
    let base = base.trim_end_matches('/');
    if query.is_empty() {
        format!("{base}/{path}")
    } else {
        format!("{base}/{path}?{query}")
    }
}

fn get_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, truncate(&body)));
    }
    Ok(body)
}

fn truncate(body: &str) -> &str {
    let end = body
        .char_indices()
        .take_while(|(idx, _)| *idx < 200)
        .last()
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    &body[..end]
}

pub fn fetch_matches(base: &str) -> Result<Vec<MatchSummary>> {
    let query = list_query(Some((0, 199)), Some(("kickoff", "ASC")), None);
    let body = get_text(&resource_url(base, "matches", &query))?;
    parse_matches_json(&body)
}

pub fn fetch_events(base: &str, match_id: u64) -> Result<Vec<MatchEvent>> {
    let filter = json!({ "matchId": match_id });
    let query = list_query(Some((0, 499)), Some(("minute", "ASC")), Some(&filter));
    let body = get_text(&resource_url(base, "matchEvents", &query))?;
    parse_events_json(&body)
}

pub fn fetch_league(base: &str, league_id: u64) -> Result<LeagueSettings> {
    let body = get_text(&resource_url(base, &format!("leagues/{league_id}"), ""))?;
    parse_league_json(&body)
}

pub fn fetch_roster(base: &str, team_id: u64) -> Result<Vec<RosterPlayer>> {
    let body = get_text(&resource_url(
        base,
        &format!("league-teams/{team_id}/roster"),
        "",
    ))?;
    parse_roster_json(&body)
}

pub fn fetch_referees(base: &str) -> Result<Vec<Referee>> {
    let query = list_query(Some((0, 99)), Some(("name", "ASC")), None);
    let body = get_text(&resource_url(base, "referees", &query))?;
    parse_referees_json(&body)
}

pub fn create_event(base: &str, payload: &EventPayload) -> Result<()> {
    let client = http_client()?;
    let url = resource_url(base, "matchEvents", "");
    let resp = client
        .post(url)
        .json(payload)
        .send()
        .context("request failed")?;
    ensure_success(resp)
}

pub fn update_event(base: &str, event_id: u64, payload: &EventPayload) -> Result<()> {
    let client = http_client()?;
    let url = resource_url(base, &format!("matchEvents/{event_id}"), "");
    let resp = client
        .put(url)
        .json(payload)
        .send()
        .context("request failed")?;
    ensure_success(resp)
}

pub fn delete_event(base: &str, event_id: u64) -> Result<()> {
    let client = http_client()?;
    let url = resource_url(base, &format!("matchEvents/{event_id}"), "");
    let resp = client.delete(url).send().context("request failed")?;
    ensure_success(resp)
}

/// The one write against the match itself: status flips to FINISHED and the
/// last derived scores are persisted in the same call.
pub fn finish_match(base: &str, match_id: u64, score1: u8, score2: u8) -> Result<()> {
    let client = http_client()?;
    let url = resource_url(base, &format!("matches/{match_id}"), "");
    let body = json!({
        "status": MatchStatus::Finished,
        "score1": score1,
        "score2": score2,
    });
    let resp = client
        .patch(url)
        .json(&body)
        .send()
        .context("request failed")?;
    ensure_success(resp)
}

fn ensure_success(resp: reqwest::blocking::Response) -> Result<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().unwrap_or_default();
    Err(anyhow::anyhow!("http {}: {}", status, truncate(&body)))
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchSummary>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid matches json")?;
    let Some(list) = root.as_array() else {
        return Err(anyhow::anyhow!("matches response is not an array"));
    };

    let mut out = Vec::new();
    for entry in list {
        let Some(id) = pick_u64(entry, &["id", "matchId"]) else {
            continue;
        };
        let Some(team1_id) = pick_u64(entry, &["team1Id", "homeTeamId"]) else {
            continue;
        };
        let Some(team2_id) = pick_u64(entry, &["team2Id", "awayTeamId"]) else {
            continue;
        };
        let status = entry
            .get("status")
            .cloned()
            .and_then(|v| serde_json::from_value::<MatchStatus>(v).ok())
            .unwrap_or(MatchStatus::Scheduled);
        out.push(MatchSummary {
            id,
            league_id: pick_u64(entry, &["leagueId"]).unwrap_or(0),
            team1_id,
            team2_id,
            team1: pick_string(entry, &["team1", "team1Name", "homeTeam"])
                .unwrap_or_else(|| format!("#{team1_id}")),
            team2: pick_string(entry, &["team2", "team2Name", "awayTeam"])
                .unwrap_or_else(|| format!("#{team2_id}")),
            kickoff: pick_string(entry, &["kickoff", "date", "startsAt"]).unwrap_or_default(),
            status,
            score1: pick_u64(entry, &["score1", "team1Score"]).unwrap_or(0) as u8,
            score2: pick_u64(entry, &["score2", "team2Score"]).unwrap_or(0) as u8,
        });
    }
    Ok(out)
}

pub fn parse_events_json(raw: &str) -> Result<Vec<MatchEvent>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid events json")
}

pub fn parse_league_json(raw: &str) -> Result<LeagueSettings> {
    serde_json::from_str(raw.trim()).context("invalid league json")
}

/// The roster endpoint has been seen returning both a bare array and an
/// object wrapping it under `players`.
pub fn parse_roster_json(raw: &str) -> Result<Vec<RosterPlayer>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid roster json")?;
    let list = match &root {
        Value::Array(_) => root.clone(),
        Value::Object(map) => map.get("players").cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    };
    if list.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(list).context("invalid roster entries")
}

pub fn parse_referees_json(raw: &str) -> Result<Vec<Referee>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid referees json")
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            match v {
                Value::String(s) if !s.trim().is_empty() => return Some(s.trim().to_string()),
                Value::Object(map) => {
                    if let Some(Value::String(name)) = map.get("name") {
                        return Some(name.trim().to_string());
                    }
                }
                _ => {}
            }
        }
    }
    None
}

fn pick_u64(value: &Value, keys: &[&str]) -> Option<u64> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_u64() {
                return Some(num);
            }
            if let Some(s) = v.as_str() {
                if let Ok(num) = s.parse::<u64>() {
                    return Some(num);
                }
            }
        }
    }
    None
}
