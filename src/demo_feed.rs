use std::collections::HashMap;

use anyhow::Result;
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;

use crate::state::{
    EventKind, EventPayload, LeagueSettings, MatchEvent, MatchStatus, MatchSummary, Referee,
    RosterPlayer,
};

/// In-memory stand-in for the league backend, used when no base URL is
/// configured. Mutations go through the same command path as the remote
/// backend and are followed by the same full-list reload.
#[derive(Debug, Clone)]
pub struct DemoStore {
    league: LeagueSettings,
    matches: Vec<MatchSummary>,
    rosters: HashMap<u64, Vec<RosterPlayer>>,
    referees: Vec<Referee>,
    events: Vec<MatchEvent>,
    next_event_id: u64,
}

impl DemoStore {
    pub fn seed() -> Self {
        let mut rng = rand::thread_rng();
        let today = Utc::now();
        let kickoff_soon = today + ChronoDuration::minutes(rng.gen_range(30..150));
        let kickoff_late = today + ChronoDuration::days(1);

        let league = LeagueSettings {
            id: 1,
            name: "Sunday League".to_string(),
            half_minutes: 25,
            halves: 2,
        };

        let matches = vec![
            MatchSummary {
                id: 101,
                league_id: 1,
                team1_id: 11,
                team2_id: 12,
                team1: "Red Rovers".to_string(),
                team2: "Harbour FC".to_string(),
                kickoff: kickoff_soon.format("%Y-%m-%dT%H:%M").to_string(),
                status: MatchStatus::Scheduled,
                score1: 0,
                score2: 0,
            },
            MatchSummary {
                id: 102,
                league_id: 1,
                team1_id: 13,
                team2_id: 14,
                team1: "Mill Lane".to_string(),
                team2: "Old Oaks".to_string(),
                kickoff: kickoff_late.format("%Y-%m-%dT%H:%M").to_string(),
                status: MatchStatus::Scheduled,
                score1: 0,
                score2: 0,
            },
        ];

        let mut rosters = HashMap::new();
        rosters.insert(
            11,
            roster(&[
                (1101, "T. Marsh", 1),
                (1102, "J. Okafor", 4),
                (1103, "L. Brennan", 6),
                (1104, "S. Hale", 8),
                (1105, "D. Kovacs", 9),
                (1106, "A. Reyes", 10),
                (1107, "M. Troost", 11),
            ]),
        );
        rosters.insert(
            12,
            roster(&[
                (1201, "P. Lindqvist", 1),
                (1202, "C. Abara", 3),
                (1203, "R. Doyle", 5),
                (1204, "K. Sato", 7),
                (1205, "E. Mwangi", 9),
                (1206, "F. Bianchi", 10),
                (1207, "G. Petrov", 14),
            ]),
        );
        rosters.insert(
            13,
            roster(&[
                (1301, "N. Farkas", 1),
                (1302, "O. Diallo", 2),
                (1303, "W. Chen", 8),
                (1304, "H. Berg", 9),
                (1305, "I. Novak", 11),
            ]),
        );
        rosters.insert(
            14,
            roster(&[
                (1401, "B. Kowalski", 1),
                (1402, "V. Silva", 4),
                (1403, "U. Tanaka", 7),
                (1404, "Z. Hassan", 9),
                (1405, "Y. Moreau", 10),
            ]),
        );

        let referees = vec![
            Referee {
                id: 21,
                name: "A. Whitfield".to_string(),
            },
            Referee {
                id: 22,
                name: "M. Costa".to_string(),
            },
            Referee {
                id: 23,
                name: "S. Drummond".to_string(),
            },
        ];

        Self {
            league,
            matches,
            rosters,
            referees,
            events: Vec::new(),
            next_event_id: 1,
        }
    }

    pub fn matches(&self) -> Vec<MatchSummary> {
        self.matches.clone()
    }

    pub fn league(&self, league_id: u64) -> Result<LeagueSettings> {
        if self.league.id == league_id {
            Ok(self.league.clone())
        } else {
            Err(anyhow::anyhow!("unknown league {league_id}"))
        }
    }

    pub fn roster(&self, team_id: u64) -> Vec<RosterPlayer> {
        self.rosters.get(&team_id).cloned().unwrap_or_default()
    }

    pub fn referees(&self) -> Vec<Referee> {
        self.referees.clone()
    }

    pub fn events_for(&self, match_id: u64) -> Vec<MatchEvent> {
        self.events
            .iter()
            .filter(|e| e.match_id == match_id)
            .cloned()
            .collect()
    }

    pub fn create_event(&mut self, payload: &EventPayload) -> u64 {
        let id = self.next_event_id;
        self.next_event_id += 1;
        self.events.push(event_from_payload(id, payload));
        id
    }

    pub fn update_event(&mut self, event_id: u64, payload: &EventPayload) -> Result<()> {
        let Some(slot) = self.events.iter_mut().find(|e| e.id == event_id) else {
            return Err(anyhow::anyhow!("unknown event {event_id}"));
        };
        *slot = event_from_payload(event_id, payload);
        Ok(())
    }

    pub fn delete_event(&mut self, event_id: u64) -> Result<()> {
        let before = self.events.len();
        self.events.retain(|e| e.id != event_id);
        if self.events.len() == before {
            return Err(anyhow::anyhow!("unknown event {event_id}"));
        }
        Ok(())
    }

    pub fn finish_match(&mut self, match_id: u64, score1: u8, score2: u8) -> Result<()> {
        let Some(m) = self.matches.iter_mut().find(|m| m.id == match_id) else {
            return Err(anyhow::anyhow!("unknown match {match_id}"));
        };
        m.status = MatchStatus::Finished;
        m.score1 = score1;
        m.score2 = score2;
        Ok(())
    }
}

fn event_from_payload(id: u64, payload: &EventPayload) -> MatchEvent {
    MatchEvent {
        id,
        match_id: payload.match_id,
        team_id: payload.team_id,
        kind: payload.kind,
        half: payload.half,
        minute: payload.minute,
        player_id: payload.player_id,
        assist_player_id: if payload.kind == EventKind::Goal {
            payload.assist_player_id
        } else {
            None
        },
        referee_id: if payload.kind.is_card() {
            payload.referee_id
        } else {
            None
        },
        description: payload.description.clone(),
    }
}

fn roster(entries: &[(u64, &str, u32)]) -> Vec<RosterPlayer> {
    entries
        .iter()
        .map(|(id, name, number)| RosterPlayer {
            id: *id,
            name: (*name).to_string(),
            shirt_number: Some(*number),
            position: None,
        })
        .collect()
}
