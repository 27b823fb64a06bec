use crate::state::{EventKind, MatchEvent};

pub fn counts_for_score(kind: EventKind) -> bool {
    matches!(kind, EventKind::Goal | EventKind::PenaltyScored)
}

/// Fold the event list into a scoreline. The displayed score is always
/// re-derived from the full list after a reload; nothing increments a
/// running total.
pub fn derive_score(events: &[MatchEvent], team1_id: u64, team2_id: u64) -> (u8, u8) {
    let mut score1: u8 = 0;
    let mut score2: u8 = 0;
    for event in events {
        if !counts_for_score(event.kind) {
            continue;
        }
        if event.team_id == team1_id {
            score1 = score1.saturating_add(1);
        } else if event.team_id == team2_id {
            score2 = score2.saturating_add(1);
        }
    }
    (score1, score2)
}
