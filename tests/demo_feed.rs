use matchday_terminal::demo_feed::DemoStore;
use matchday_terminal::score::derive_score;
use matchday_terminal::state::{EventKind, EventPayload, MatchStatus};

fn goal_payload(match_id: u64, team_id: u64, player_id: u64) -> EventPayload {
    EventPayload {
        match_id,
        team_id,
        kind: EventKind::Goal,
        half: 1,
        minute: 9,
        player_id: Some(player_id),
        assist_player_id: None,
        referee_id: None,
        description: None,
    }
}

#[test]
fn seed_has_matches_rosters_and_referees() {
    let store = DemoStore::seed();
    let matches = store.matches();
    assert!(!matches.is_empty());
    for m in &matches {
        assert!(!store.roster(m.team1_id).is_empty());
        assert!(!store.roster(m.team2_id).is_empty());
    }
    assert!(!store.referees().is_empty());
    assert!(store.league(1).is_ok());
    assert!(store.league(999).is_err());
}

#[test]
fn created_events_come_back_on_reload_and_score() {
    let mut store = DemoStore::seed();
    let m = store.matches()[0].clone();
    assert!(store.events_for(m.id).is_empty());

    store.create_event(&goal_payload(m.id, m.team1_id, 1105));
    let events = store.events_for(m.id);
    assert_eq!(events.len(), 1);
    assert_eq!(derive_score(&events, m.team1_id, m.team2_id), (1, 0));

    // Events belong to exactly one match.
    let other = store.matches()[1].clone();
    assert!(store.events_for(other.id).is_empty());
}

#[test]
fn update_replaces_the_whole_event() {
    let mut store = DemoStore::seed();
    let m = store.matches()[0].clone();
    let id = store.create_event(&goal_payload(m.id, m.team1_id, 1105));

    let mut replacement = goal_payload(m.id, m.team2_id, 1205);
    replacement.kind = EventKind::YellowCard;
    replacement.minute = 30;
    replacement.referee_id = Some(21);
    store.update_event(id, &replacement).expect("update succeeds");

    let events = store.events_for(m.id);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::YellowCard);
    assert_eq!(events[0].team_id, m.team2_id);
    assert_eq!(events[0].minute, 30);
    assert_eq!(events[0].referee_id, Some(21));
    assert_eq!(derive_score(&events, m.team1_id, m.team2_id), (0, 0));

    assert!(store.update_event(9999, &replacement).is_err());
}

#[test]
fn delete_removes_the_event() {
    let mut store = DemoStore::seed();
    let m = store.matches()[0].clone();
    let id = store.create_event(&goal_payload(m.id, m.team1_id, 1105));

    store.delete_event(id).expect("delete succeeds");
    assert!(store.events_for(m.id).is_empty());
    assert!(store.delete_event(id).is_err());
}

#[test]
fn finish_persists_status_and_score() {
    let mut store = DemoStore::seed();
    let m = store.matches()[0].clone();
    store.finish_match(m.id, 2, 1).expect("finish succeeds");

    let reloaded = store.matches();
    let finished = reloaded.iter().find(|x| x.id == m.id).expect("match");
    assert_eq!(finished.status, MatchStatus::Finished);
    assert_eq!(finished.score1, 2);
    assert_eq!(finished.score2, 1);

    assert!(store.finish_match(9999, 0, 0).is_err());
}

#[test]
fn non_goal_payload_fields_are_normalized() {
    let mut store = DemoStore::seed();
    let m = store.matches()[0].clone();

    // A substitution carries neither assist nor referee even if the form
    // had stale values.
    let mut payload = goal_payload(m.id, m.team1_id, 1105);
    payload.kind = EventKind::Substitution;
    payload.assist_player_id = Some(1106);
    payload.referee_id = Some(21);
    store.create_event(&payload);

    let events = store.events_for(m.id);
    assert_eq!(events[0].assist_player_id, None);
    assert_eq!(events[0].referee_id, None);
}
