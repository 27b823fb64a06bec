use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use matchday_terminal::mvp;
use matchday_terminal::provider::spawn_provider;
use matchday_terminal::state::{
    self, AppState, ConductFocus, ConductState, ConfirmAction, Delta, DraftStep, EventKind,
    MatchFilter, MatchStatus, ProviderCommand, Screen, apply_delta, kind_name, status_name,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn send(&mut self, cmd: ProviderCommand) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Backend unavailable");
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Backend request failed");
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            self.state.help_overlay = false;
            return;
        }
        match self.state.screen {
            Screen::Matches => self.on_key_matches(key),
            Screen::Conduct { .. } => self.on_key_conduct(key),
        }
    }

    fn on_key_matches(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('f') => self.state.cycle_filter(),
            KeyCode::Char('r') => {
                self.state.push_log("[INFO] Matches refresh requested");
                self.send(ProviderCommand::FetchMatches);
            }
            KeyCode::Char('d') | KeyCode::Enter => self.open_selected_match(),
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => {}
        }
    }

    fn open_selected_match(&mut self) {
        let Some(summary) = self.state.selected_match().cloned() else {
            self.state.push_log("[INFO] No match selected");
            return;
        };
        self.state.open_conduct(&summary);
        self.send(ProviderCommand::OpenMatch {
            match_id: summary.id,
            league_id: summary.league_id,
            team1_id: summary.team1_id,
            team2_id: summary.team2_id,
        });
    }

    fn on_key_conduct(&mut self, key: KeyEvent) {
        if self.state.conduct.is_none() {
            self.state.close_conduct();
            return;
        }
        let draft_active = self
            .state
            .conduct
            .as_ref()
            .is_some_and(|c| c.confirm.is_none() && !c.mvp_overlay && c.draft.is_some());
        if draft_active {
            self.on_key_draft(key);
            return;
        }

        let mut pending: Option<ProviderCommand> = None;
        let mut log_line: Option<&'static str> = None;
        let mut go_back = false;
        let mut help = false;

        if let Some(conduct) = self.state.conduct.as_mut() {
            if conduct.mvp_overlay {
                conduct.mvp_overlay = false;
                return;
            }

            if let Some(action) = conduct.confirm.take() {
                if matches!(key.code, KeyCode::Char('y') | KeyCode::Enter) {
                    pending = Some(match action {
                        ConfirmAction::DeleteEvent { event_id } => ProviderCommand::DeleteEvent {
                            match_id: conduct.match_id,
                            event_id,
                        },
                        ConfirmAction::FinishMatch => ProviderCommand::FinishMatch {
                            match_id: conduct.match_id,
                            score1: conduct.score.0,
                            score2: conduct.score.1,
                        },
                    });
                }
            } else {
                match key.code {
                    KeyCode::Char('q') => self.should_quit = true,
                    KeyCode::Char('b') | KeyCode::Esc => go_back = true,
                    KeyCode::Tab => conduct.cycle_focus(),
                    KeyCode::Char('1') => conduct.focus = ConductFocus::HomePanel,
                    KeyCode::Char('2') => conduct.focus = ConductFocus::AwayPanel,
                    KeyCode::Char(' ') => conduct.clock.start_pause(Instant::now()),
                    KeyCode::Char(']') => conduct.clock.next_half(),
                    KeyCode::Char('[') => conduct.clock.prev_half(),
                    KeyCode::Char('i') => {
                        pending = Some(ProviderCommand::FetchEvents {
                            match_id: conduct.match_id,
                        });
                        log_line = Some("[INFO] Events refresh requested");
                    }
                    KeyCode::Char('v') => conduct.mvp_overlay = true,
                    KeyCode::Char('F') => conduct.confirm = Some(ConfirmAction::FinishMatch),
                    KeyCode::Char('?') => help = true,
                    KeyCode::Char('j') | KeyCode::Down
                        if conduct.focus == ConductFocus::Tape =>
                    {
                        conduct.select_next_event()
                    }
                    KeyCode::Char('k') | KeyCode::Up if conduct.focus == ConductFocus::Tape => {
                        conduct.select_prev_event()
                    }
                    KeyCode::Char('e') if conduct.focus == ConductFocus::Tape => {
                        conduct.begin_edit_selected()
                    }
                    KeyCode::Char('x') if conduct.focus == ConductFocus::Tape => {
                        conduct.request_delete_selected()
                    }
                    KeyCode::Char('h') => conduct.clock.finish_half(),
                    KeyCode::Char(c) => {
                        if let Some(team_id) = conduct.focused_team_id() {
                            if let Some(kind) = kind_for_key(c) {
                                conduct.start_draft(team_id, kind);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        if go_back {
            self.state.close_conduct();
        }
        if help {
            self.state.help_overlay = true;
        }
        if let Some(line) = log_line {
            self.state.push_log(line);
        }
        if let Some(cmd) = pending {
            self.send(cmd);
        }
    }

    fn on_key_draft(&mut self, key: KeyEvent) {
        let mut submit = None;
        if let Some(conduct) = self.state.conduct.as_mut() {
            let step = conduct.draft.as_ref().map(|d| d.step);
            match step {
                Some(DraftStep::Minute) => match key.code {
                    KeyCode::Esc => conduct.cancel_draft(),
                    KeyCode::Enter => conduct.draft_select(),
                    KeyCode::Backspace => conduct.draft_backspace(),
                    KeyCode::Char(']') => conduct.draft_adjust_half(1),
                    KeyCode::Char('[') => conduct.draft_adjust_half(-1),
                    KeyCode::Char(c) => conduct.draft_input_char(c),
                    _ => {}
                },
                Some(DraftStep::Note) => match key.code {
                    KeyCode::Esc => conduct.cancel_draft(),
                    KeyCode::Enter => submit = conduct.draft_submit(),
                    KeyCode::Backspace => conduct.draft_backspace(),
                    KeyCode::Char(c) => conduct.draft_input_char(c),
                    _ => {}
                },
                Some(_) => match key.code {
                    KeyCode::Esc => conduct.cancel_draft(),
                    KeyCode::Enter => conduct.draft_select(),
                    KeyCode::Char('j') | KeyCode::Down => conduct.draft_move_cursor(1),
                    KeyCode::Char('k') | KeyCode::Up => conduct.draft_move_cursor(-1),
                    KeyCode::Char('n') => conduct.draft_skip(),
                    _ => {}
                },
                None => {}
            }
        }
        if let Some(cmd) = submit {
            self.send(cmd);
        }
    }
}

fn kind_for_key(c: char) -> Option<EventKind> {
    match c {
        'g' => Some(EventKind::Goal),
        'p' => Some(EventKind::PenaltyScored),
        'm' => Some(EventKind::PenaltyMissed),
        'y' => Some(EventKind::YellowCard),
        'r' => Some(EventKind::RedCard),
        's' => Some(EventKind::Substitution),
        _ => None,
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.state.tick_clock(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Matches => render_matches(frame, chunks[1], &app.state),
        Screen::Conduct { .. } => render_conduct(frame, chunks[1], &app.state),
    }

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
    if let Some(conduct) = &app.state.conduct {
        if conduct.mvp_overlay {
            render_mvp_overlay(frame, frame.size(), conduct);
        }
        if let Some(action) = conduct.confirm {
            render_confirm_overlay(frame, frame.size(), conduct, action);
        }
    }
}

fn header_text(state: &AppState) -> String {
    match &state.conduct {
        Some(conduct) if matches!(state.screen, Screen::Conduct { .. }) => {
            let league = conduct
                .league
                .as_ref()
                .map(|l| l.name.as_str())
                .unwrap_or("-");
            format!(
                "MATCHDAY CONDUCT | {} vs {} | {}",
                conduct.team1, conduct.team2, league
            )
        }
        _ => format!("MATCHDAY | Matches | Filter: {}", filter_label(state.filter)),
    }
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Matches => {
            "Enter/d Conduct | j/k Move | f Filter | r Refresh | ? Help | q Quit".to_string()
        }
        Screen::Conduct { .. } => {
            let draft_active = state
                .conduct
                .as_ref()
                .is_some_and(|c| c.draft.is_some());
            if draft_active {
                "j/k Move | Enter Select | n Skip | [/] Half | Esc Cancel".to_string()
            } else {
                "Space Clock | h End half | [/] Half | Tab Focus | g/p/m/y/r/s Event | e Edit | x Del | F Finish | v MVP | b Back"
                    .to_string()
            }
        }
    }
}

fn filter_label(filter: MatchFilter) -> &'static str {
    match filter {
        MatchFilter::All => "ALL",
        MatchFilter::Scheduled => "SCHEDULED",
        MatchFilter::Live => "LIVE",
        MatchFilter::Finished => "FINISHED",
    }
}

fn render_matches(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = match_columns();
    render_match_header(frame, sections[0], &widths);

    let list_area = sections[1];
    let filtered = state.filtered_matches();
    if filtered.is_empty() {
        let empty =
            Paragraph::new("No matches for this filter").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, filtered.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let m = filtered[idx];
        let kickoff = format_kickoff(&m.kickoff);
        let name = format!("{} vs {}", m.team1, m.team2);
        let score = if m.status == MatchStatus::Scheduled {
            "-".to_string()
        } else {
            format!("{}:{}", m.score1, m.score2)
        };

        render_cell_text(frame, cols[0], &kickoff, row_style);
        render_cell_text(frame, cols[1], &name, row_style);
        render_cell_text(frame, cols[2], status_name(m.status), status_style(m.status, selected));
        render_cell_text(frame, cols[3], &score, row_style);
    }
}

fn match_columns() -> [Constraint; 4] {
    [
        Constraint::Length(18),
        Constraint::Min(24),
        Constraint::Length(11),
        Constraint::Length(7),
    ]
}

fn render_match_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "Kickoff", style);
    render_cell_text(frame, cols[1], "Match", style);
    render_cell_text(frame, cols[2], "Status", style);
    render_cell_text(frame, cols[3], "Score", style);
}

fn status_style(status: MatchStatus, selected: bool) -> Style {
    let style = match status {
        MatchStatus::Live => Style::default().fg(Color::Green),
        MatchStatus::Finished => Style::default().fg(Color::Blue),
        MatchStatus::Canceled | MatchStatus::Postponed => Style::default().fg(Color::Red),
        MatchStatus::Scheduled => Style::default(),
    };
    if selected {
        style.bg(Color::DarkGray)
    } else {
        style
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }
    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_conduct(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(conduct) = &state.conduct else {
        let empty = Paragraph::new("No match open");
        frame.render_widget(empty, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(area);

    render_scoreboard(frame, rows[0], conduct);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30),
            Constraint::Min(30),
            Constraint::Length(30),
        ])
        .split(rows[1]);

    render_side_panel(frame, columns[0], conduct, conduct.team1_id, ConductFocus::HomePanel);
    render_event_tape(frame, columns[1], conduct);
    render_side_panel(frame, columns[2], conduct, conduct.team2_id, ConductFocus::AwayPanel);

    render_console(frame, rows[2], state, conduct);
}

fn render_scoreboard(frame: &mut Frame, area: Rect, conduct: &ConductState) {
    let clock = &conduct.clock;
    let running = if clock.is_running() { "RUNNING" } else { "PAUSED" };
    let league_line = match &conduct.league {
        Some(league) => format!(
            "{} | {} min halves x{}",
            league.name,
            league.half_minutes,
            league.halves
        ),
        None => "League settings loading...".to_string(),
    };
    let mut lines = vec![
        format!(
            "{}  {} : {}  {}",
            conduct.team1, conduct.score.0, conduct.score.1, conduct.team2
        ),
        format!(
            "Half {}/{}  {}  {}  next minute {}'",
            clock.current_half(),
            clock.halves(),
            clock.display(),
            running,
            clock.default_minute()
        ),
        format!("Status: {}", status_name(conduct.status)),
        league_line,
    ];
    if conduct.loading {
        lines.push("Loading events...".to_string());
    }

    let board = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Scoreboard").borders(Borders::ALL));
    frame.render_widget(board, area);
}

fn render_side_panel(
    frame: &mut Frame,
    area: Rect,
    conduct: &ConductState,
    team_id: u64,
    panel: ConductFocus,
) {
    let focused = conduct.focus == panel;
    let title = conduct.team_name(team_id).to_string();
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let draft_for_panel = conduct
        .draft
        .as_ref()
        .filter(|d| d.team_id == team_id)
        .is_some();
    if draft_for_panel {
        render_draft(frame, inner, conduct);
        return;
    }

    let mut lines = Vec::new();
    let roster = conduct.roster(team_id);
    if roster.is_empty() {
        lines.push("No roster yet".to_string());
    } else {
        for player in roster.iter().take(inner.height.saturating_sub(1) as usize) {
            let number = player
                .shirt_number
                .map(|n| format!("{n:>2}"))
                .unwrap_or_else(|| "--".to_string());
            lines.push(format!("{number} {}", player.name));
        }
    }
    if focused {
        lines.push("g/p/m/y/r/s new event".to_string());
    }
    let paragraph = Paragraph::new(lines.join("\n"));
    frame.render_widget(paragraph, inner);
}

fn render_draft(frame: &mut Frame, area: Rect, conduct: &ConductState) {
    let Some(draft) = &conduct.draft else {
        return;
    };

    let mut lines = Vec::new();
    let heading = match draft.editing {
        Some(event_id) => format!("Edit #{event_id}: {}", kind_name(draft.kind)),
        None => format!("New event: {}", kind_name(draft.kind)),
    };
    lines.push(heading);
    lines.push(step_prompt(draft.step).to_string());

    match draft.step {
        DraftStep::Minute => {
            let shown = if draft.minute_input.is_empty() {
                format!("({}')", conduct.clock.default_minute())
            } else {
                format!("{}'", draft.minute_input)
            };
            lines.push(format!("Minute: {shown}"));
            lines.push(format!("Half: {}", draft.half));
        }
        DraftStep::Note => {
            lines.push(format!("Note: {}_", draft.note_input));
        }
        _ => {
            let candidates = conduct.draft_candidates();
            if candidates.is_empty() {
                lines.push("Nothing to pick from".to_string());
            } else {
                let visible = area.height.saturating_sub(lines.len() as u16) as usize;
                let (start, end) = visible_range(draft.cursor, candidates.len(), visible.max(1));
                for (idx, (_, label)) in candidates[start..end].iter().enumerate() {
                    let absolute = start + idx;
                    let marker = if absolute == draft.cursor { "> " } else { "  " };
                    lines.push(format!("{marker}{label}"));
                }
            }
        }
    }
    if draft.in_flight {
        lines.push("Saving...".to_string());
    }

    let paragraph = Paragraph::new(lines.join("\n"));
    frame.render_widget(paragraph, area);
}

fn step_prompt(step: DraftStep) -> &'static str {
    match step {
        DraftStep::Kind => "Type:",
        DraftStep::Player => "Player:",
        DraftStep::Assist => "Assist (n to skip):",
        DraftStep::Referee => "Referee (n to skip):",
        DraftStep::Minute => "Minute (blank = clock):",
        DraftStep::Note => "Note (Enter saves):",
    }
}

fn render_event_tape(frame: &mut Frame, area: Rect, conduct: &ConductState) {
    let focused = conduct.focus == ConductFocus::Tape;
    let block = Block::default()
        .title("Event Tape")
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if conduct.events.is_empty() {
        let empty = Paragraph::new("No events yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible = inner.height as usize;
    let (start, end) = visible_range(conduct.tape_selected, conduct.events.len(), visible);
    let mut lines = Vec::new();
    for idx in start..end {
        let event = &conduct.events[idx];
        let marker = if focused && idx == conduct.tape_selected {
            "> "
        } else {
            "  "
        };
        lines.push(format!("{marker}{}", event_line(conduct, event)));
    }

    let paragraph = Paragraph::new(lines.join("\n"));
    frame.render_widget(paragraph, inner);
}

fn event_line(conduct: &ConductState, event: &state::MatchEvent) -> String {
    let team = abbreviate_team(conduct.team_name(event.team_id));
    let player = event
        .player_id
        .map(|id| conduct.player_name(event.team_id, id))
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "H{} {:>2}' {:<8} {} {}",
        event.half,
        event.minute,
        kind_name(event.kind),
        team,
        player
    );
    if let Some(assist_id) = event.assist_player_id {
        line.push_str(&format!(
            " (A: {})",
            conduct.player_name(event.team_id, assist_id)
        ));
    }
    if let Some(referee_id) = event.referee_id {
        line.push_str(&format!(" [{}]", conduct.referee_name(referee_id)));
    }
    if let Some(description) = &event.description {
        line.push_str(&format!(" - {description}"));
    }
    line
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState, conduct: &ConductState) {
    let block = Block::default().title("Console").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let mut lines = Vec::new();
    if let Some(error) = &conduct.error {
        lines.push(format!("[ERROR] {error}"));
    }
    let remaining = (inner.height as usize).saturating_sub(lines.len());
    let recent: Vec<String> = state
        .logs
        .iter()
        .rev()
        .take(remaining)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    lines.extend(recent);

    let paragraph = Paragraph::new(lines.join("\n"));
    frame.render_widget(paragraph, inner);
}

fn render_mvp_overlay(frame: &mut Frame, area: Rect, conduct: &ConductState) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let ranked = mvp::rank_players(
        &conduct.events,
        conduct.team1_id,
        conduct.team2_id,
        &conduct.rosters,
    );
    let title = if conduct.status == MatchStatus::Finished {
        "MVP"
    } else {
        "MVP (provisional)"
    };

    let mut lines = Vec::new();
    if ranked.is_empty() {
        lines.push("No scoring contributions yet".to_string());
    }
    for (idx, entry) in ranked.iter().take(10).enumerate() {
        let team = abbreviate_team(conduct.team_name(entry.team_id));
        lines.push(format!(
            "{:>2}. {:<20} {} {:>3} pts  G{} A{} Y{} R{}",
            idx + 1,
            entry.name,
            team,
            entry.points,
            entry.goals,
            entry.assists,
            entry.yellows,
            entry.reds
        ));
    }

    let popup = Paragraph::new(lines.join("\n"))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(popup, popup_area);
}

fn render_confirm_overlay(
    frame: &mut Frame,
    area: Rect,
    conduct: &ConductState,
    action: ConfirmAction,
) {
    let popup_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup_area);

    let message = match action {
        ConfirmAction::DeleteEvent { event_id } => {
            format!("Delete event #{event_id}?")
        }
        ConfirmAction::FinishMatch => format!(
            "Finish match {}:{} and persist the score?",
            conduct.score.0, conduct.score.1
        ),
    };
    let text = format!("{message}\n\ny confirm - any other key cancels");
    let popup =
        Paragraph::new(text).block(Block::default().title("Confirm").borders(Borders::ALL));
    frame.render_widget(popup, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Matchday Terminal - Help",
        "",
        "Matches:",
        "  Enter / d    Open conduct console",
        "  j/k or ^/v   Move",
        "  f            Cycle status filter",
        "  r            Refresh now",
        "",
        "Conduct:",
        "  Space        Start/pause clock",
        "  h            End current half (clock to 0)",
        "  [ / ]        Previous / next half",
        "  Tab, 1, 2    Panel focus",
        "  g p m y r s  Record goal/penalty/miss/yellow/red/sub",
        "  e / x        Edit / delete selected event (tape)",
        "  i            Reload events",
        "  F            Finish match (persists score)",
        "  v            MVP ranking",
        "  b / Esc      Back",
        "",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

fn abbreviate_team(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.len() <= 3 {
        return trimmed.to_uppercase();
    }
    let mut abbr = String::new();
    for part in trimmed.split_whitespace() {
        if let Some(ch) = part.chars().next() {
            abbr.push(ch);
        }
        if abbr.len() >= 3 {
            break;
        }
    }
    if abbr.len() >= 2 {
        return abbr.to_uppercase();
    }
    trimmed.chars().take(3).collect::<String>().to_uppercase()
}

fn format_kickoff(raw: &str) -> String {
    if raw.is_empty() {
        return "TBD".to_string();
    }
    let cleaned = raw.trim();
    if let Some(dt) = parse_kickoff(cleaned) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if cleaned.len() >= 16 {
        return cleaned[..16].replace('T', " ");
    }
    cleaned.replace('T', " ")
}

fn parse_kickoff(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    None
}
