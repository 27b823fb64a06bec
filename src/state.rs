use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::clock::MatchClock;
use crate::score::derive_score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Matches,
    Conduct { match_id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
    Postponed,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Goal,
    PenaltyScored,
    PenaltyMissed,
    YellowCard,
    RedCard,
    Substitution,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Goal,
        EventKind::PenaltyScored,
        EventKind::PenaltyMissed,
        EventKind::YellowCard,
        EventKind::RedCard,
        EventKind::Substitution,
    ];

    pub fn is_card(self) -> bool {
        matches!(self, EventKind::YellowCard | EventKind::RedCard)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: u64,
    pub league_id: u64,
    pub team1_id: u64,
    pub team2_id: u64,
    pub team1: String,
    pub team2: String,
    #[serde(default)]
    pub kickoff: String,
    pub status: MatchStatus,
    #[serde(default)]
    pub score1: u8,
    #[serde(default)]
    pub score2: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub id: u64,
    pub match_id: u64,
    pub team_id: u64,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub half: u8,
    pub minute: u16,
    #[serde(default)]
    pub player_id: Option<u64>,
    #[serde(default)]
    pub assist_player_id: Option<u64>,
    #[serde(default)]
    pub referee_id: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Create/update body for the events resource. The whole editable field set
/// is sent on every mutation; nothing diffs against the original.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub match_id: u64,
    pub team_id: u64,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub half: u8,
    pub minute: u16,
    pub player_id: Option<u64>,
    pub assist_player_id: Option<u64>,
    pub referee_id: Option<u64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettings {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_half_minutes")]
    pub half_minutes: u16,
    #[serde(default = "default_halves")]
    pub halves: u8,
}

fn default_half_minutes() -> u16 {
    45
}

fn default_halves() -> u8 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub shirt_number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referee {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFilter {
    All,
    Scheduled,
    Live,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConductFocus {
    HomePanel,
    Tape,
    AwayPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteEvent { event_id: u64 },
    FinishMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStep {
    Kind,
    Player,
    Assist,
    Referee,
    Minute,
    Note,
}

/// One in-progress event entry. Side-bound: the team id is fixed when the
/// draft is opened from a panel and never user-selectable after that.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub team_id: u64,
    pub kind: EventKind,
    pub step: DraftStep,
    pub half: u8,
    pub player_id: Option<u64>,
    pub assist_player_id: Option<u64>,
    pub referee_id: Option<u64>,
    pub minute_input: String,
    pub note_input: String,
    pub cursor: usize,
    pub editing: Option<u64>,
    pub in_flight: bool,
}

impl EventDraft {
    pub fn new(team_id: u64, kind: EventKind, half: u8) -> Self {
        Self {
            team_id,
            kind,
            step: DraftStep::Player,
            half,
            player_id: None,
            assist_player_id: None,
            referee_id: None,
            minute_input: String::new(),
            note_input: String::new(),
            cursor: 0,
            editing: None,
            in_flight: false,
        }
    }

    pub fn from_event(event: &MatchEvent) -> Self {
        Self {
            team_id: event.team_id,
            kind: event.kind,
            step: DraftStep::Kind,
            half: event.half,
            player_id: event.player_id,
            assist_player_id: event.assist_player_id,
            referee_id: event.referee_id,
            minute_input: event.minute.to_string(),
            note_input: event.description.clone().unwrap_or_default(),
            cursor: EventKind::ALL
                .iter()
                .position(|k| *k == event.kind)
                .unwrap_or(0),
            editing: Some(event.id),
            in_flight: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConductState {
    pub match_id: u64,
    pub league_id: u64,
    pub team1_id: u64,
    pub team2_id: u64,
    pub team1: String,
    pub team2: String,
    pub status: MatchStatus,
    pub league: Option<LeagueSettings>,
    pub rosters: HashMap<u64, Vec<RosterPlayer>>,
    pub referees: Vec<Referee>,
    pub events: Vec<MatchEvent>,
    pub score: (u8, u8),
    pub clock: MatchClock,
    pub focus: ConductFocus,
    pub tape_selected: usize,
    pub draft: Option<EventDraft>,
    pub confirm: Option<ConfirmAction>,
    pub error: Option<String>,
    pub loading: bool,
    pub mvp_overlay: bool,
}

impl ConductState {
    pub fn open(summary: &MatchSummary) -> Self {
        Self {
            match_id: summary.id,
            league_id: summary.league_id,
            team1_id: summary.team1_id,
            team2_id: summary.team2_id,
            team1: summary.team1.clone(),
            team2: summary.team2.clone(),
            status: summary.status,
            league: None,
            rosters: HashMap::new(),
            referees: Vec::new(),
            events: Vec::new(),
            score: (0, 0),
            clock: MatchClock::new(default_half_minutes(), default_halves()),
            focus: ConductFocus::HomePanel,
            tape_selected: 0,
            draft: None,
            confirm: None,
            error: None,
            loading: true,
            mvp_overlay: false,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            ConductFocus::HomePanel => ConductFocus::Tape,
            ConductFocus::Tape => ConductFocus::AwayPanel,
            ConductFocus::AwayPanel => ConductFocus::HomePanel,
        };
    }

    pub fn focused_team_id(&self) -> Option<u64> {
        match self.focus {
            ConductFocus::HomePanel => Some(self.team1_id),
            ConductFocus::AwayPanel => Some(self.team2_id),
            ConductFocus::Tape => None,
        }
    }

    pub fn team_name(&self, team_id: u64) -> &str {
        if team_id == self.team1_id {
            &self.team1
        } else {
            &self.team2
        }
    }

    pub fn roster(&self, team_id: u64) -> &[RosterPlayer] {
        self.rosters.get(&team_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn player_name(&self, team_id: u64, player_id: u64) -> String {
        self.roster(team_id)
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{player_id}"))
    }

    pub fn referee_name(&self, referee_id: u64) -> String {
        self.referees
            .iter()
            .find(|r| r.id == referee_id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| format!("#{referee_id}"))
    }

    pub fn selected_event(&self) -> Option<&MatchEvent> {
        self.events.get(self.tape_selected)
    }

    pub fn select_next_event(&mut self) {
        let total = self.events.len();
        if total == 0 {
            self.tape_selected = 0;
            return;
        }
        self.tape_selected = (self.tape_selected + 1) % total;
    }

    pub fn select_prev_event(&mut self) {
        let total = self.events.len();
        if total == 0 {
            self.tape_selected = 0;
            return;
        }
        if self.tape_selected == 0 {
            self.tape_selected = total - 1;
        } else {
            self.tape_selected -= 1;
        }
    }

    pub fn clamp_tape_selection(&mut self) {
        let total = self.events.len();
        if total == 0 {
            self.tape_selected = 0;
        } else if self.tape_selected >= total {
            self.tape_selected = total - 1;
        }
    }

    pub fn start_draft(&mut self, team_id: u64, kind: EventKind) {
        self.error = None;
        self.draft = Some(EventDraft::new(team_id, kind, self.clock.current_half()));
    }

    pub fn begin_edit_selected(&mut self) {
        let Some(event) = self.selected_event() else {
            return;
        };
        let mut draft = EventDraft::from_event(event);
        let is_home = draft.team_id == self.team1_id;
        // Land the player cursor on the event's player so editing starts
        // from the stored values.
        if let Some(player_id) = draft.player_id {
            if let Some(pos) = self
                .roster(draft.team_id)
                .iter()
                .position(|p| p.id == player_id)
            {
                draft.cursor = pos;
            }
        }
        self.error = None;
        self.draft = Some(draft);
        self.focus = if is_home {
            ConductFocus::HomePanel
        } else {
            ConductFocus::AwayPanel
        };
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(event) = self.selected_event() {
            self.confirm = Some(ConfirmAction::DeleteEvent { event_id: event.id });
        }
    }

    pub fn cancel_draft(&mut self) {
        self.draft = None;
        self.error = None;
    }

    /// Candidates for the current wizard step: event kinds, a roster, or
    /// the referee list. Empty for text-input steps.
    pub fn draft_candidates(&self) -> Vec<(u64, String)> {
        let Some(draft) = &self.draft else {
            return Vec::new();
        };
        match draft.step {
            DraftStep::Kind => EventKind::ALL
                .iter()
                .enumerate()
                .map(|(idx, kind)| (idx as u64, kind_name(*kind).to_string()))
                .collect(),
            DraftStep::Player | DraftStep::Assist => self
                .roster(draft.team_id)
                .iter()
                .map(|p| (p.id, roster_line(p)))
                .collect(),
            DraftStep::Referee => self
                .referees
                .iter()
                .map(|r| (r.id, r.name.clone()))
                .collect(),
            DraftStep::Minute | DraftStep::Note => Vec::new(),
        }
    }

    pub fn draft_move_cursor(&mut self, delta: i32) {
        let total = self.draft_candidates().len();
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        if total == 0 {
            draft.cursor = 0;
            return;
        }
        let current = draft.cursor.min(total - 1) as i32;
        draft.cursor = (current + delta).rem_euclid(total as i32) as usize;
    }

    /// Confirm the highlighted candidate and advance the wizard.
    pub fn draft_select(&mut self) {
        let candidates = self.draft_candidates();
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        match draft.step {
            DraftStep::Kind => {
                let idx = draft.cursor.min(EventKind::ALL.len() - 1);
                draft.kind = EventKind::ALL[idx];
                draft.step = DraftStep::Player;
                draft.cursor = 0;
            }
            DraftStep::Player => {
                let Some((id, _)) = candidates.get(draft.cursor) else {
                    return;
                };
                draft.player_id = Some(*id);
                advance_after_player(draft);
            }
            DraftStep::Assist => {
                if let Some((id, _)) = candidates.get(draft.cursor) {
                    draft.assist_player_id = Some(*id);
                }
                draft.step = DraftStep::Minute;
            }
            DraftStep::Referee => {
                if let Some((id, _)) = candidates.get(draft.cursor) {
                    draft.referee_id = Some(*id);
                }
                draft.step = DraftStep::Minute;
            }
            DraftStep::Minute => {
                draft.step = DraftStep::Note;
            }
            DraftStep::Note => {}
        }
    }

    /// Skip an optional step (assist or referee).
    pub fn draft_skip(&mut self) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        match draft.step {
            DraftStep::Assist => {
                draft.assist_player_id = None;
                draft.step = DraftStep::Minute;
            }
            DraftStep::Referee => {
                draft.referee_id = None;
                draft.step = DraftStep::Minute;
            }
            _ => {}
        }
    }

    pub fn draft_input_char(&mut self, c: char) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        match draft.step {
            DraftStep::Minute => {
                if c.is_ascii_digit() && draft.minute_input.len() < 3 {
                    draft.minute_input.push(c);
                }
            }
            DraftStep::Note => {
                if draft.note_input.len() < 120 {
                    draft.note_input.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn draft_backspace(&mut self) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        match draft.step {
            DraftStep::Minute => {
                draft.minute_input.pop();
            }
            DraftStep::Note => {
                draft.note_input.pop();
            }
            _ => {}
        }
    }

    pub fn draft_adjust_half(&mut self, delta: i8) {
        let halves = self.clock.halves();
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        if draft.step != DraftStep::Minute {
            return;
        }
        let next = draft.half as i16 + delta as i16;
        draft.half = next.clamp(1, halves as i16) as u8;
    }

    /// Build the mutation command for the finished wizard. Returns `None`
    /// until the draft reaches the note step or while a submit is already
    /// in flight.
    pub fn draft_submit(&mut self) -> Option<ProviderCommand> {
        let half_minutes = self.clock.half_minutes();
        let default_minute = self.clock.default_minute();
        let match_id = self.match_id;
        let draft = self.draft.as_mut()?;
        if draft.in_flight || draft.step != DraftStep::Note {
            return None;
        }

        let minute = match draft.minute_input.trim() {
            "" => default_minute,
            raw => raw.parse::<u16>().unwrap_or(default_minute),
        }
        .clamp(1, half_minutes);
        let note = draft.note_input.trim();
        let payload = EventPayload {
            match_id,
            team_id: draft.team_id,
            kind: draft.kind,
            half: draft.half,
            minute,
            player_id: draft.player_id,
            assist_player_id: if draft.kind == EventKind::Goal {
                draft.assist_player_id
            } else {
                None
            },
            referee_id: if draft.kind.is_card() {
                draft.referee_id
            } else {
                None
            },
            description: if note.is_empty() {
                None
            } else {
                Some(note.to_string())
            },
        };

        draft.in_flight = true;
        match draft.editing {
            Some(event_id) => Some(ProviderCommand::UpdateEvent { event_id, payload }),
            None => Some(ProviderCommand::CreateEvent { payload }),
        }
    }
}

fn advance_after_player(draft: &mut EventDraft) {
    draft.cursor = 0;
    draft.step = match draft.kind {
        EventKind::Goal => DraftStep::Assist,
        EventKind::YellowCard | EventKind::RedCard => DraftStep::Referee,
        _ => DraftStep::Minute,
    };
}

fn roster_line(player: &RosterPlayer) -> String {
    match player.shirt_number {
        Some(number) => format!("{number:>2} {}", player.name),
        None => format!("-- {}", player.name),
    }
}

pub fn kind_name(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Goal => "GOAL",
        EventKind::PenaltyScored => "PENALTY",
        EventKind::PenaltyMissed => "PEN MISS",
        EventKind::YellowCard => "YELLOW",
        EventKind::RedCard => "RED",
        EventKind::Substitution => "SUB",
    }
}

pub fn status_name(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Scheduled => "SCHEDULED",
        MatchStatus::Live => "LIVE",
        MatchStatus::Finished => "FINISHED",
        MatchStatus::Postponed => "POSTPONED",
        MatchStatus::Canceled => "CANCELED",
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub matches: Vec<MatchSummary>,
    pub selected: usize,
    pub filter: MatchFilter,
    pub conduct: Option<ConductState>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Matches,
            matches: Vec::with_capacity(32),
            selected: 0,
            filter: MatchFilter::All,
            conduct: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn filtered_indices(&self) -> Vec<usize> {
        self.matches
            .iter()
            .enumerate()
            .filter(|(_, m)| match self.filter {
                MatchFilter::All => true,
                MatchFilter::Scheduled => {
                    matches!(m.status, MatchStatus::Scheduled | MatchStatus::Postponed)
                }
                MatchFilter::Live => m.status == MatchStatus::Live,
                MatchFilter::Finished => m.status == MatchStatus::Finished,
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn filtered_matches(&self) -> Vec<&MatchSummary> {
        self.filtered_indices()
            .into_iter()
            .filter_map(|idx| self.matches.get(idx))
            .collect()
    }

    pub fn selected_match(&self) -> Option<&MatchSummary> {
        match self.screen {
            Screen::Conduct { match_id } => self.matches.iter().find(|m| m.id == match_id),
            Screen::Matches => {
                let filtered = self.filtered_indices();
                filtered
                    .get(self.selected)
                    .and_then(|idx| self.matches.get(*idx))
            }
        }
    }

    pub fn select_next(&mut self) {
        let total = self.filtered_indices().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.filtered_indices().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.filtered_indices().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            MatchFilter::All => MatchFilter::Scheduled,
            MatchFilter::Scheduled => MatchFilter::Live,
            MatchFilter::Live => MatchFilter::Finished,
            MatchFilter::Finished => MatchFilter::All,
        };
        self.selected = 0;
    }

    pub fn open_conduct(&mut self, summary: &MatchSummary) {
        self.conduct = Some(ConductState::open(summary));
        self.screen = Screen::Conduct {
            match_id: summary.id,
        };
    }

    pub fn close_conduct(&mut self) {
        self.conduct = None;
        self.screen = Screen::Matches;
        self.clamp_selection();
    }

    /// Drive the clock from the draw loop. Does nothing while the clock is
    /// idle or no match is open.
    pub fn tick_clock(&mut self, now: Instant) {
        if let Some(conduct) = self.conduct.as_mut() {
            conduct.clock.tick(now);
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetMatches(Vec<MatchSummary>),
    SetLeague {
        match_id: u64,
        league: LeagueSettings,
    },
    SetRoster {
        match_id: u64,
        team_id: u64,
        players: Vec<RosterPlayer>,
    },
    SetReferees {
        match_id: u64,
        referees: Vec<Referee>,
    },
    SetEvents {
        match_id: u64,
        events: Vec<MatchEvent>,
    },
    EventSaved {
        match_id: u64,
    },
    EventError {
        match_id: u64,
        message: String,
    },
    MatchFinished {
        match_id: u64,
        score1: u8,
        score2: u8,
    },
    FinishError {
        match_id: u64,
        message: String,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchMatches,
    OpenMatch {
        match_id: u64,
        league_id: u64,
        team1_id: u64,
        team2_id: u64,
    },
    FetchEvents {
        match_id: u64,
    },
    CreateEvent {
        payload: EventPayload,
    },
    UpdateEvent {
        event_id: u64,
        payload: EventPayload,
    },
    DeleteEvent {
        match_id: u64,
        event_id: u64,
    },
    FinishMatch {
        match_id: u64,
        score1: u8,
        score2: u8,
    },
}

pub fn sort_events(events: &mut [MatchEvent]) {
    events.sort_by(|a, b| {
        a.half
            .cmp(&b.half)
            .then_with(|| a.minute.cmp(&b.minute))
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetMatches(matches) => {
            let selected_id = state.selected_match().map(|m| m.id);
            state.matches = matches;
            if let Some(conduct) = state.conduct.as_mut() {
                if let Some(m) = state.matches.iter().find(|m| m.id == conduct.match_id) {
                    conduct.status = m.status;
                }
            }
            if let Some(id) = selected_id {
                let filtered = state.filtered_indices();
                if let Some(pos) = filtered.iter().position(|idx| state.matches[*idx].id == id) {
                    state.selected = pos;
                } else {
                    state.selected = 0;
                }
            }
            state.clamp_selection();
        }
        Delta::SetLeague { match_id, league } => {
            if let Some(conduct) = conduct_for(state, match_id) {
                conduct.clock.configure(league.half_minutes, league.halves);
                conduct.league = Some(league);
            }
        }
        Delta::SetRoster {
            match_id,
            team_id,
            players,
        } => {
            if let Some(conduct) = conduct_for(state, match_id) {
                conduct.rosters.insert(team_id, players);
            }
        }
        Delta::SetReferees { match_id, referees } => {
            if let Some(conduct) = conduct_for(state, match_id) {
                conduct.referees = referees;
            }
        }
        Delta::SetEvents {
            match_id,
            mut events,
        } => {
            // Deltas for a match that is no longer open are dropped rather
            // than applied to whatever screen replaced it.
            if let Some(conduct) = conduct_for(state, match_id) {
                sort_events(&mut events);
                conduct.events = events;
                conduct.score = derive_score(&conduct.events, conduct.team1_id, conduct.team2_id);
                conduct.loading = false;
                conduct.clamp_tape_selection();
            }
        }
        Delta::EventSaved { match_id } => {
            if let Some(conduct) = conduct_for(state, match_id) {
                conduct.draft = None;
                conduct.error = None;
            }
        }
        Delta::EventError { match_id, message } => {
            if let Some(conduct) = conduct_for(state, match_id) {
                conduct.error = Some(message.clone());
                if let Some(draft) = conduct.draft.as_mut() {
                    draft.in_flight = false;
                }
            }
            state.push_log(format!("[WARN] Event save failed: {message}"));
        }
        Delta::MatchFinished {
            match_id,
            score1,
            score2,
        } => {
            if let Some(m) = state.matches.iter_mut().find(|m| m.id == match_id) {
                m.status = MatchStatus::Finished;
                m.score1 = score1;
                m.score2 = score2;
            }
            if let Some(conduct) = conduct_for(state, match_id) {
                conduct.status = MatchStatus::Finished;
                conduct.confirm = None;
                conduct.error = None;
            }
            state.push_log(format!("[INFO] Match finished {score1}:{score2}"));
        }
        Delta::FinishError { match_id, message } => {
            if let Some(conduct) = conduct_for(state, match_id) {
                conduct.error = Some(message.clone());
                conduct.confirm = None;
            }
            state.push_log(format!("[WARN] Finish failed: {message}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

fn conduct_for(state: &mut AppState, match_id: u64) -> Option<&mut ConductState> {
    state
        .conduct
        .as_mut()
        .filter(|conduct| conduct.match_id == match_id)
}
