use matchday_terminal::state::{
    AppState, Delta, DraftStep, EventKind, MatchEvent, MatchStatus, MatchSummary, ProviderCommand,
    Referee, RosterPlayer, apply_delta,
};

const MATCH_ID: u64 = 101;
const TEAM1: u64 = 11;
const TEAM2: u64 = 12;

fn summary() -> MatchSummary {
    MatchSummary {
        id: MATCH_ID,
        league_id: 1,
        team1_id: TEAM1,
        team2_id: TEAM2,
        team1: "Red Rovers".to_string(),
        team2: "Harbour FC".to_string(),
        kickoff: "2026-03-14T10:30".to_string(),
        status: MatchStatus::Live,
        score1: 0,
        score2: 0,
    }
}

fn goal(id: u64, team_id: u64, player_id: u64) -> MatchEvent {
    MatchEvent {
        id,
        match_id: MATCH_ID,
        team_id,
        kind: EventKind::Goal,
        half: 1,
        minute: 10,
        player_id: Some(player_id),
        assist_player_id: None,
        referee_id: None,
        description: None,
    }
}

fn open_state() -> AppState {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::SetMatches(vec![summary()]));
    let m = state.matches[0].clone();
    state.open_conduct(&m);
    state
}

fn load_roster(state: &mut AppState) {
    let players = vec![
        RosterPlayer {
            id: 9,
            name: "D. Kovacs".to_string(),
            shirt_number: Some(9),
            position: None,
        },
        RosterPlayer {
            id: 10,
            name: "A. Reyes".to_string(),
            shirt_number: Some(10),
            position: None,
        },
    ];
    apply_delta(
        state,
        Delta::SetRoster {
            match_id: MATCH_ID,
            team_id: TEAM1,
            players,
        },
    );
    apply_delta(
        state,
        Delta::SetReferees {
            match_id: MATCH_ID,
            referees: vec![Referee {
                id: 21,
                name: "A. Whitfield".to_string(),
            }],
        },
    );
}

#[test]
fn loading_a_match_with_no_events_shows_a_goalless_score() {
    let mut state = open_state();
    apply_delta(
        &mut state,
        Delta::SetEvents {
            match_id: MATCH_ID,
            events: Vec::new(),
        },
    );
    let conduct = state.conduct.as_ref().expect("conduct open");
    assert_eq!(conduct.score, (0, 0));
    assert!(!conduct.loading);
}

#[test]
fn one_goal_reloads_to_one_nil_and_survives_a_refetch() {
    let mut state = open_state();
    let events = vec![goal(1, TEAM1, 9)];

    apply_delta(
        &mut state,
        Delta::SetEvents {
            match_id: MATCH_ID,
            events: events.clone(),
        },
    );
    assert_eq!(state.conduct.as_ref().expect("conduct").score, (1, 0));

    // A simulated page refresh: the same list comes back and must derive
    // the same scoreboard.
    apply_delta(
        &mut state,
        Delta::SetEvents {
            match_id: MATCH_ID,
            events,
        },
    );
    assert_eq!(state.conduct.as_ref().expect("conduct").score, (1, 0));
}

#[test]
fn events_for_another_match_are_dropped() {
    let mut state = open_state();
    apply_delta(
        &mut state,
        Delta::SetEvents {
            match_id: 999,
            events: vec![goal(1, TEAM1, 9)],
        },
    );
    let conduct = state.conduct.as_ref().expect("conduct open");
    assert!(conduct.events.is_empty());
    assert_eq!(conduct.score, (0, 0));
}

#[test]
fn reloaded_events_are_sorted_by_half_then_minute() {
    let mut state = open_state();
    let mut late = goal(1, TEAM1, 9);
    late.half = 2;
    late.minute = 3;
    let mut early = goal(2, TEAM2, 7);
    early.half = 1;
    early.minute = 40;

    apply_delta(
        &mut state,
        Delta::SetEvents {
            match_id: MATCH_ID,
            events: vec![late, early],
        },
    );
    let conduct = state.conduct.as_ref().expect("conduct open");
    assert_eq!(conduct.events[0].id, 2);
    assert_eq!(conduct.events[1].id, 1);
}

#[test]
fn event_saved_clears_the_draft_and_error() {
    let mut state = open_state();
    load_roster(&mut state);
    let conduct = state.conduct.as_mut().expect("conduct open");
    conduct.start_draft(TEAM1, EventKind::Goal);
    conduct.error = Some("previous".to_string());

    apply_delta(&mut state, Delta::EventSaved { match_id: MATCH_ID });
    let conduct = state.conduct.as_ref().expect("conduct open");
    assert!(conduct.draft.is_none());
    assert!(conduct.error.is_none());
}

#[test]
fn event_error_keeps_the_draft_populated_for_retry() {
    let mut state = open_state();
    load_roster(&mut state);

    {
        let conduct = state.conduct.as_mut().expect("conduct open");
        conduct.start_draft(TEAM1, EventKind::Substitution);
        conduct.draft_select();
        conduct.draft_select();
        let cmd = conduct.draft_submit();
        assert!(matches!(cmd, Some(ProviderCommand::CreateEvent { .. })));
    }

    apply_delta(
        &mut state,
        Delta::EventError {
            match_id: MATCH_ID,
            message: "http 500: boom".to_string(),
        },
    );
    let conduct = state.conduct.as_ref().expect("conduct open");
    let draft = conduct.draft.as_ref().expect("draft retained");
    assert!(!draft.in_flight);
    assert_eq!(conduct.error.as_deref(), Some("http 500: boom"));
}

#[test]
fn league_settings_reconfigure_the_clock() {
    let mut state = open_state();
    apply_delta(
        &mut state,
        Delta::SetLeague {
            match_id: MATCH_ID,
            league: matchday_terminal::state::LeagueSettings {
                id: 1,
                name: "Sunday League".to_string(),
                half_minutes: 25,
                halves: 2,
            },
        },
    );
    let conduct = state.conduct.as_ref().expect("conduct open");
    assert_eq!(conduct.clock.half_minutes(), 25);
    assert_eq!(conduct.clock.halves(), 2);
}

#[test]
fn goal_draft_walks_player_assist_minute_note() {
    let mut state = open_state();
    load_roster(&mut state);
    let conduct = state.conduct.as_mut().expect("conduct open");

    conduct.start_draft(TEAM1, EventKind::Goal);
    assert_eq!(
        conduct.draft.as_ref().map(|d| d.step),
        Some(DraftStep::Player)
    );

    conduct.draft_select();
    assert_eq!(
        conduct.draft.as_ref().map(|d| d.step),
        Some(DraftStep::Assist)
    );

    conduct.draft_move_cursor(1);
    conduct.draft_select();
    assert_eq!(
        conduct.draft.as_ref().map(|d| d.step),
        Some(DraftStep::Minute)
    );

    conduct.draft_input_char('1');
    conduct.draft_input_char('2');
    conduct.draft_select();
    assert_eq!(conduct.draft.as_ref().map(|d| d.step), Some(DraftStep::Note));

    let cmd = conduct.draft_submit().expect("submit command");
    let ProviderCommand::CreateEvent { payload } = cmd else {
        panic!("expected a create command");
    };
    assert_eq!(payload.match_id, MATCH_ID);
    assert_eq!(payload.team_id, TEAM1);
    assert_eq!(payload.kind, EventKind::Goal);
    assert_eq!(payload.minute, 12);
    assert_eq!(payload.player_id, Some(9));
    assert_eq!(payload.assist_player_id, Some(10));
    assert_eq!(payload.referee_id, None);
}

#[test]
fn blank_minute_falls_back_to_the_clock_and_clamps() {
    let mut state = open_state();
    load_roster(&mut state);
    let conduct = state.conduct.as_mut().expect("conduct open");

    conduct.start_draft(TEAM1, EventKind::Substitution);
    conduct.draft_select();
    conduct.draft_select();
    let cmd = conduct.draft_submit().expect("submit command");
    let ProviderCommand::CreateEvent { payload } = cmd else {
        panic!("expected a create command");
    };
    // Idle clock: minute defaults to the first minute of the half.
    assert_eq!(payload.minute, 1);
    assert_eq!(payload.assist_player_id, None);
}

#[test]
fn card_draft_solicits_a_referee_and_drops_assist() {
    let mut state = open_state();
    load_roster(&mut state);
    let conduct = state.conduct.as_mut().expect("conduct open");

    conduct.start_draft(TEAM1, EventKind::YellowCard);
    conduct.draft_select();
    assert_eq!(
        conduct.draft.as_ref().map(|d| d.step),
        Some(DraftStep::Referee)
    );
    conduct.draft_select();
    conduct.draft_select();
    let cmd = conduct.draft_submit().expect("submit command");
    let ProviderCommand::CreateEvent { payload } = cmd else {
        panic!("expected a create command");
    };
    assert_eq!(payload.referee_id, Some(21));
    assert_eq!(payload.assist_player_id, None);
}

#[test]
fn finishing_updates_the_match_list_and_conduct_status() {
    let mut state = open_state();
    apply_delta(
        &mut state,
        Delta::MatchFinished {
            match_id: MATCH_ID,
            score1: 2,
            score2: 1,
        },
    );
    assert_eq!(state.matches[0].status, MatchStatus::Finished);
    assert_eq!(state.matches[0].score1, 2);
    assert_eq!(state.matches[0].score2, 1);
    assert_eq!(
        state.conduct.as_ref().expect("conduct").status,
        MatchStatus::Finished
    );
}

#[test]
fn set_matches_keeps_the_selected_match() {
    let mut state = AppState::new();
    let mut other = summary();
    other.id = 102;
    other.team1 = "Mill Lane".to_string();
    apply_delta(
        &mut state,
        Delta::SetMatches(vec![summary(), other.clone()]),
    );
    state.select_next();
    assert_eq!(state.selected_match().map(|m| m.id), Some(102));

    // A reload that reorders the list keeps the same match selected.
    apply_delta(&mut state, Delta::SetMatches(vec![other, summary()]));
    assert_eq!(state.selected_match().map(|m| m.id), Some(102));
}
