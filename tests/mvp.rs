use std::collections::HashMap;

use matchday_terminal::mvp::rank_players;
use matchday_terminal::state::{EventKind, MatchEvent, RosterPlayer};

const TEAM1: u64 = 11;
const TEAM2: u64 = 12;

fn event(
    id: u64,
    team_id: u64,
    kind: EventKind,
    player_id: u64,
    assist_id: Option<u64>,
) -> MatchEvent {
    MatchEvent {
        id,
        match_id: 101,
        team_id,
        kind,
        half: 1,
        minute: 10,
        player_id: Some(player_id),
        assist_player_id: assist_id,
        referee_id: None,
        description: None,
    }
}

fn rosters() -> HashMap<u64, Vec<RosterPlayer>> {
    let mut rosters = HashMap::new();
    rosters.insert(
        TEAM1,
        vec![
            player(1, "Ada"),
            player(2, "Ben"),
            player(3, "Cleo"),
        ],
    );
    rosters.insert(TEAM2, vec![player(7, "Gus"), player(8, "Hana")]);
    rosters
}

fn player(id: u64, name: &str) -> RosterPlayer {
    RosterPlayer {
        id,
        name: name.to_string(),
        shirt_number: None,
        position: None,
    }
}

#[test]
fn points_follow_the_event_table() {
    let events = vec![
        event(1, TEAM1, EventKind::Goal, 1, Some(2)),
        event(2, TEAM1, EventKind::PenaltyScored, 1, None),
        event(3, TEAM2, EventKind::YellowCard, 7, None),
        event(4, TEAM2, EventKind::RedCard, 8, None),
        event(5, TEAM2, EventKind::PenaltyMissed, 7, None),
    ];
    let ranked = rank_players(&events, TEAM1, TEAM2, &rosters());

    // Player 1: 3 (goal) + 2 (penalty) + 1 (winner bonus) = 6.
    let top = &ranked[0];
    assert_eq!(top.player_id, 1);
    assert_eq!(top.points, 6);
    assert_eq!(top.goals, 2);

    // Player 2: 2 (assist) + 1 (winner bonus) = 3.
    let second = &ranked[1];
    assert_eq!(second.player_id, 2);
    assert_eq!(second.points, 3);
    assert_eq!(second.assists, 1);

    let gus = ranked.iter().find(|e| e.player_id == 7).expect("ranked");
    assert_eq!(gus.points, -3);
    let hana = ranked.iter().find(|e| e.player_id == 8).expect("ranked");
    assert_eq!(hana.points, -3);
}

#[test]
fn winner_bonus_requires_a_contribution() {
    // Team 1 wins 1:0; player 3 only has a yellow card and gets no bonus.
    let events = vec![
        event(1, TEAM1, EventKind::Goal, 1, None),
        event(2, TEAM1, EventKind::YellowCard, 3, None),
    ];
    let ranked = rank_players(&events, TEAM1, TEAM2, &rosters());
    let carded = ranked.iter().find(|e| e.player_id == 3).expect("ranked");
    assert_eq!(carded.points, -1);
}

#[test]
fn no_bonus_on_a_draw() {
    let events = vec![
        event(1, TEAM1, EventKind::Goal, 1, None),
        event(2, TEAM2, EventKind::Goal, 7, None),
    ];
    let ranked = rank_players(&events, TEAM1, TEAM2, &rosters());
    for entry in &ranked {
        assert_eq!(entry.points, 3);
    }
}

#[test]
fn identical_records_order_by_player_id_ascending() {
    // Two team-2 players with one goal each, nothing else. Same points,
    // goals, assists, cards: the id must decide.
    let events = vec![
        event(1, TEAM2, EventKind::Goal, 8, None),
        event(2, TEAM2, EventKind::Goal, 7, None),
    ];
    let ranked = rank_players(&events, TEAM1, TEAM2, &rosters());
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].player_id, 7);
    assert_eq!(ranked[1].player_id, 8);
}

#[test]
fn fewer_yellows_break_ties_before_player_id() {
    // Losing side, so no bonus muddies the water. Player 7: goal + yellow
    // = 2 points; player 8: penalty scored = 2 points. Same points, goals,
    // assists, reds; player 8 has fewer yellows and must rank first even
    // though their id is higher.
    let events = vec![
        event(1, TEAM1, EventKind::Goal, 1, None),
        event(2, TEAM1, EventKind::Goal, 2, None),
        event(3, TEAM1, EventKind::Goal, 3, None),
        event(4, TEAM2, EventKind::Goal, 7, None),
        event(5, TEAM2, EventKind::YellowCard, 7, None),
        event(6, TEAM2, EventKind::PenaltyScored, 8, None),
    ];
    let ranked = rank_players(&events, TEAM1, TEAM2, &rosters());
    let pos7 = ranked.iter().position(|e| e.player_id == 7).expect("ranked");
    let pos8 = ranked.iter().position(|e| e.player_id == 8).expect("ranked");
    assert!(pos8 < pos7);
}

#[test]
fn unknown_players_fall_back_to_id_labels() {
    let events = vec![event(1, TEAM1, EventKind::Goal, 999, None)];
    let ranked = rank_players(&events, TEAM1, TEAM2, &rosters());
    assert_eq!(ranked[0].name, "#999");
}
