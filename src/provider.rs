use std::env;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::api_fetch;
use crate::demo_feed::DemoStore;
use crate::state::{Delta, EventPayload, LeagueSettings, MatchEvent, ProviderCommand};

enum Backend {
    Remote { base: String },
    Demo(DemoStore),
}

/// Background provider: owns all blocking HTTP, reads commands from the UI
/// and pushes deltas back. One thread, sequential calls; the UI's only
/// ordering guarantee is that a mutation's reload lands before the next
/// command is processed.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let mut backend = match opt_env("LEAGUE_API_BASE_URL") {
            Some(base) => {
                let _ = tx.send(Delta::Log(format!("[INFO] Backend: {base}")));
                Backend::Remote { base }
            }
            None => {
                let _ = tx.send(Delta::Log(
                    "[INFO] LEAGUE_API_BASE_URL unset, using demo data".to_string(),
                ));
                Backend::Demo(DemoStore::seed())
            }
        };

        let poll_interval = Duration::from_secs(
            env::var("MATCHES_POLL_SECS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(60)
                .max(10),
        );
        let mut last_poll = Instant::now();

        refresh_matches(&backend, &tx);

        loop {
            thread::sleep(Duration::from_millis(200));

            if last_poll.elapsed() >= poll_interval {
                refresh_matches(&backend, &tx);
                last_poll = Instant::now();
            }

            while let Ok(cmd) = cmd_rx.try_recv() {
                match cmd {
                    ProviderCommand::FetchMatches => {
                        refresh_matches(&backend, &tx);
                        last_poll = Instant::now();
                    }
                    ProviderCommand::OpenMatch {
                        match_id,
                        league_id,
                        team1_id,
                        team2_id,
                    } => {
                        open_match(&backend, &tx, match_id, league_id, team1_id, team2_id);
                    }
                    ProviderCommand::FetchEvents { match_id } => {
                        reload_events(&backend, &tx, match_id);
                    }
                    ProviderCommand::CreateEvent { payload } => {
                        let match_id = payload.match_id;
                        match backend_create_event(&mut backend, &payload) {
                            Ok(()) => {
                                let _ = tx.send(Delta::EventSaved { match_id });
                                reload_events(&backend, &tx, match_id);
                            }
                            Err(err) => {
                                let _ = tx.send(Delta::EventError {
                                    match_id,
                                    message: err.to_string(),
                                });
                            }
                        }
                    }
                    ProviderCommand::UpdateEvent { event_id, payload } => {
                        let match_id = payload.match_id;
                        match backend_update_event(&mut backend, event_id, &payload) {
                            Ok(()) => {
                                let _ = tx.send(Delta::EventSaved { match_id });
                                reload_events(&backend, &tx, match_id);
                            }
                            Err(err) => {
                                let _ = tx.send(Delta::EventError {
                                    match_id,
                                    message: err.to_string(),
                                });
                            }
                        }
                    }
                    ProviderCommand::DeleteEvent { match_id, event_id } => {
                        match backend_delete_event(&mut backend, event_id) {
                            Ok(()) => {
                                let _ = tx.send(Delta::Log(format!(
                                    "[INFO] Event {event_id} deleted"
                                )));
                                reload_events(&backend, &tx, match_id);
                            }
                            Err(err) => {
                                let _ = tx.send(Delta::EventError {
                                    match_id,
                                    message: err.to_string(),
                                });
                            }
                        }
                    }
                    ProviderCommand::FinishMatch {
                        match_id,
                        score1,
                        score2,
                    } => {
                        match backend_finish_match(&mut backend, match_id, score1, score2) {
                            Ok(()) => {
                                let _ = tx.send(Delta::MatchFinished {
                                    match_id,
                                    score1,
                                    score2,
                                });
                                refresh_matches(&backend, &tx);
                            }
                            Err(err) => {
                                let _ = tx.send(Delta::FinishError {
                                    match_id,
                                    message: err.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        }
    });
}

fn refresh_matches(backend: &Backend, tx: &Sender<Delta>) {
    match backend_matches(backend) {
        Ok(matches) => {
            let _ = tx.send(Delta::SetMatches(matches));
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Matches fetch error: {err}")));
        }
    }
}

/// Read-only preload for the conduct screen: league settings, both
/// rosters, referees, then the current event list. Each fetch fails
/// independently; the operator can retry by reopening or refreshing.
fn open_match(
    backend: &Backend,
    tx: &Sender<Delta>,
    match_id: u64,
    league_id: u64,
    team1_id: u64,
    team2_id: u64,
) {
    match backend_league(backend, league_id) {
        Ok(league) => {
            let _ = tx.send(Delta::SetLeague { match_id, league });
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] League fetch error: {err}")));
        }
    }

    for team_id in [team1_id, team2_id] {
        match backend_roster(backend, team_id) {
            Ok(players) => {
                let _ = tx.send(Delta::SetRoster {
                    match_id,
                    team_id,
                    players,
                });
            }
            Err(err) => {
                let _ = tx.send(Delta::Log(format!("[WARN] Roster fetch error: {err}")));
            }
        }
    }

    match backend_referees(backend) {
        Ok(referees) => {
            let _ = tx.send(Delta::SetReferees { match_id, referees });
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Referees fetch error: {err}")));
        }
    }

    reload_events(backend, tx, match_id);
}

fn reload_events(backend: &Backend, tx: &Sender<Delta>, match_id: u64) {
    match backend_events(backend, match_id) {
        Ok(events) => {
            let _ = tx.send(Delta::SetEvents { match_id, events });
        }
        Err(err) => {
            let _ = tx.send(Delta::EventError {
                match_id,
                message: format!("events reload failed: {err}"),
            });
        }
    }
}

fn backend_matches(backend: &Backend) -> Result<Vec<crate::state::MatchSummary>> {
    match backend {
        Backend::Remote { base } => api_fetch::fetch_matches(base),
        Backend::Demo(store) => Ok(store.matches()),
    }
}

fn backend_league(backend: &Backend, league_id: u64) -> Result<LeagueSettings> {
    match backend {
        Backend::Remote { base } => api_fetch::fetch_league(base, league_id),
        Backend::Demo(store) => store.league(league_id),
    }
}

fn backend_roster(backend: &Backend, team_id: u64) -> Result<Vec<crate::state::RosterPlayer>> {
    match backend {
        Backend::Remote { base } => api_fetch::fetch_roster(base, team_id),
        Backend::Demo(store) => Ok(store.roster(team_id)),
    }
}

fn backend_referees(backend: &Backend) -> Result<Vec<crate::state::Referee>> {
    match backend {
        Backend::Remote { base } => api_fetch::fetch_referees(base),
        Backend::Demo(store) => Ok(store.referees()),
    }
}

fn backend_events(backend: &Backend, match_id: u64) -> Result<Vec<MatchEvent>> {
    match backend {
        Backend::Remote { base } => api_fetch::fetch_events(base, match_id),
        Backend::Demo(store) => Ok(store.events_for(match_id)),
    }
}

fn backend_create_event(backend: &mut Backend, payload: &EventPayload) -> Result<()> {
    match backend {
        Backend::Remote { base } => api_fetch::create_event(base, payload),
        Backend::Demo(store) => {
            store.create_event(payload);
            Ok(())
        }
    }
}

fn backend_update_event(
    backend: &mut Backend,
    event_id: u64,
    payload: &EventPayload,
) -> Result<()> {
    match backend {
        Backend::Remote { base } => api_fetch::update_event(base, event_id, payload),
        Backend::Demo(store) => store.update_event(event_id, payload),
    }
}

fn backend_delete_event(backend: &mut Backend, event_id: u64) -> Result<()> {
    match backend {
        Backend::Remote { base } => api_fetch::delete_event(base, event_id),
        Backend::Demo(store) => store.delete_event(event_id),
    }
}

fn backend_finish_match(
    backend: &mut Backend,
    match_id: u64,
    score1: u8,
    score2: u8,
) -> Result<()> {
    match backend {
        Backend::Remote { base } => api_fetch::finish_match(base, match_id, score1, score2),
        Backend::Demo(store) => store.finish_match(match_id, score1, score2),
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}
