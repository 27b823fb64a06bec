use matchday_terminal::score::derive_score;
use matchday_terminal::state::{EventKind, MatchEvent};

const TEAM1: u64 = 11;
const TEAM2: u64 = 12;

fn event(id: u64, team_id: u64, kind: EventKind) -> MatchEvent {
    MatchEvent {
        id,
        match_id: 101,
        team_id,
        kind,
        half: 1,
        minute: 10,
        player_id: Some(900 + id),
        assist_player_id: None,
        referee_id: None,
        description: None,
    }
}

#[test]
fn empty_event_list_is_goalless() {
    assert_eq!(derive_score(&[], TEAM1, TEAM2), (0, 0));
}

#[test]
fn recomputing_from_the_same_list_is_idempotent() {
    let events = vec![
        event(1, TEAM1, EventKind::Goal),
        event(2, TEAM2, EventKind::PenaltyScored),
        event(3, TEAM1, EventKind::YellowCard),
    ];
    let first = derive_score(&events, TEAM1, TEAM2);
    let second = derive_score(&events, TEAM1, TEAM2);
    assert_eq!(first, second);
    assert_eq!(first, (1, 1));
}

#[test]
fn cards_substitutions_and_misses_do_not_score() {
    let mut events = vec![event(1, TEAM1, EventKind::Goal)];
    let before = derive_score(&events, TEAM1, TEAM2);

    events.push(event(2, TEAM2, EventKind::YellowCard));
    events.push(event(3, TEAM1, EventKind::RedCard));
    events.push(event(4, TEAM2, EventKind::Substitution));
    events.push(event(5, TEAM2, EventKind::PenaltyMissed));

    assert_eq!(derive_score(&events, TEAM1, TEAM2), before);
}

#[test]
fn goal_increments_only_the_scoring_team() {
    let mut events = Vec::new();
    assert_eq!(derive_score(&events, TEAM1, TEAM2), (0, 0));

    events.push(event(1, TEAM1, EventKind::Goal));
    assert_eq!(derive_score(&events, TEAM1, TEAM2), (1, 0));

    events.push(event(2, TEAM2, EventKind::Goal));
    assert_eq!(derive_score(&events, TEAM1, TEAM2), (1, 1));
}

#[test]
fn penalty_scored_counts_like_a_goal() {
    let events = vec![
        event(1, TEAM1, EventKind::PenaltyScored),
        event(2, TEAM1, EventKind::Goal),
    ];
    assert_eq!(derive_score(&events, TEAM1, TEAM2), (2, 0));
}

#[test]
fn events_for_unknown_teams_are_ignored() {
    let events = vec![event(1, 999, EventKind::Goal)];
    assert_eq!(derive_score(&events, TEAM1, TEAM2), (0, 0));
}
