use std::cmp::Ordering;
use std::collections::HashMap;

use crate::score::derive_score;
use crate::state::{EventKind, MatchEvent, RosterPlayer};

/// Per-player tally for the MVP panel. Display-only trivia; never sent
/// anywhere.
#[derive(Debug, Clone)]
pub struct MvpEntry {
    pub player_id: u64,
    pub name: String,
    pub team_id: u64,
    pub points: i32,
    pub goals: u16,
    pub assists: u16,
    pub yellows: u16,
    pub reds: u16,
}

const GOAL_POINTS: i32 = 3;
const PENALTY_POINTS: i32 = 2;
const ASSIST_POINTS: i32 = 2;
const YELLOW_POINTS: i32 = -1;
const RED_POINTS: i32 = -3;
const PENALTY_MISS_POINTS: i32 = -2;
const WINNER_BONUS: i32 = 1;

/// Rank every player touched by the event list. Points per event go to the
/// primary player (assists to the assist player); players on the winning
/// side who contributed at least one goal, penalty, or assist get a +1
/// bonus. Ties break on totals, then goals, assists, fewer reds, fewer
/// yellows, and finally player id so the order is stable.
pub fn rank_players(
    events: &[MatchEvent],
    team1_id: u64,
    team2_id: u64,
    rosters: &HashMap<u64, Vec<RosterPlayer>>,
) -> Vec<MvpEntry> {
    let mut tally: HashMap<u64, MvpEntry> = HashMap::new();

    for event in events {
        if let Some(player_id) = event.player_id {
            let entry = entry_for(&mut tally, player_id, event.team_id, rosters);
            match event.kind {
                EventKind::Goal => {
                    entry.points += GOAL_POINTS;
                    entry.goals += 1;
                }
                EventKind::PenaltyScored => {
                    entry.points += PENALTY_POINTS;
                    entry.goals += 1;
                }
                EventKind::PenaltyMissed => entry.points += PENALTY_MISS_POINTS,
                EventKind::YellowCard => {
                    entry.points += YELLOW_POINTS;
                    entry.yellows += 1;
                }
                EventKind::RedCard => {
                    entry.points += RED_POINTS;
                    entry.reds += 1;
                }
                EventKind::Substitution => {}
            }
        }

        if event.kind == EventKind::Goal {
            if let Some(assist_id) = event.assist_player_id {
                let entry = entry_for(&mut tally, assist_id, event.team_id, rosters);
                entry.points += ASSIST_POINTS;
                entry.assists += 1;
            }
        }
    }

    let (score1, score2) = derive_score(events, team1_id, team2_id);
    let winner = match score1.cmp(&score2) {
        Ordering::Greater => Some(team1_id),
        Ordering::Less => Some(team2_id),
        Ordering::Equal => None,
    };
    if let Some(winner) = winner {
        for entry in tally.values_mut() {
            if entry.team_id == winner && entry.goals + entry.assists > 0 {
                entry.points += WINNER_BONUS;
            }
        }
    }

    let mut ranked: Vec<MvpEntry> = tally.into_values().collect();
    ranked.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goals.cmp(&a.goals))
            .then_with(|| b.assists.cmp(&a.assists))
            .then_with(|| a.reds.cmp(&b.reds))
            .then_with(|| a.yellows.cmp(&b.yellows))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    ranked
}

fn entry_for<'a>(
    tally: &'a mut HashMap<u64, MvpEntry>,
    player_id: u64,
    team_id: u64,
    rosters: &HashMap<u64, Vec<RosterPlayer>>,
) -> &'a mut MvpEntry {
    tally.entry(player_id).or_insert_with(|| MvpEntry {
        player_id,
        name: player_name(rosters, team_id, player_id),
        team_id,
        points: 0,
        goals: 0,
        assists: 0,
        yellows: 0,
        reds: 0,
    })
}

fn player_name(
    rosters: &HashMap<u64, Vec<RosterPlayer>>,
    team_id: u64,
    player_id: u64,
) -> String {
    rosters
        .get(&team_id)
        .and_then(|players| players.iter().find(|p| p.id == player_id))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("#{player_id}"))
}
