use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use matchsim_terminal::export;
use matchsim_terminal::monte_carlo::{self, DEFAULT_TRIALS, SimulationResult};
use matchsim_terminal::profile::{self, Metric, TeamProfile};
use matchsim_terminal::state::{AppState, Slot};

struct App {
    state: AppState,
    should_quit: bool,
    export_path: PathBuf,
}

impl App {
    fn new(home_path: PathBuf, away_path: PathBuf) -> Self {
        let trials = std::env::var("SIM_TRIALS")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_TRIALS)
            .max(1);
        let export_path = std::env::var("EXPORT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("simulation_results.xlsx"));
        Self {
            state: AppState::new(home_path, away_path, trials),
            should_quit: false,
            export_path,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('s') | KeyCode::Enter => self.run_simulation(),
            KeyCode::Char('e') => self.export_result(),
            KeyCode::Char('r') => self.reload_profiles(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn reload_profiles(&mut self) {
        for slot in [Slot::Home, Slot::Away] {
            let path = match slot {
                Slot::Home => self.state.home_path.clone(),
                Slot::Away => self.state.away_path.clone(),
            };
            match profile::load_team_profile(&path) {
                Ok(profile) => {
                    self.state.push_log(format!(
                        "[INFO] {} profile: {} ({} matches)",
                        slot.label(),
                        profile.name,
                        profile.matches()
                    ));
                    self.state.set_profile(slot, profile);
                }
                Err(err) => {
                    self.state
                        .push_log(format!("[WARN] {} profile load failed: {err:#}", slot.label()));
                }
            }
        }
    }

    fn run_simulation(&mut self) {
        let (Some(home), Some(away)) = (self.state.home.clone(), self.state.away.clone()) else {
            self.state.push_log("[INFO] Load both team profiles first");
            return;
        };

        // One random source per simulation invocation.
        let mut rng = rand::thread_rng();
        match monte_carlo::simulate_match(&mut rng, &home, &away, self.state.trials) {
            Ok(result) => {
                self.state.push_log(format!(
                    "[INFO] Simulated {} trials: H {:.1}% D {:.1}% A {:.1}%",
                    self.state.trials, result.p_home, result.p_draw, result.p_away
                ));
                self.state.result = Some(result);
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Simulation failed: {err}"));
            }
        }
    }

    fn export_result(&mut self) {
        let Some(result) = self.state.result.clone() else {
            self.state.push_log("[INFO] No result to export, run a simulation first");
            return;
        };
        let (Some(home), Some(away)) = (&self.state.home, &self.state.away) else {
            self.state.push_log("[INFO] Load both team profiles first");
            return;
        };

        match export::write_result_workbook(&self.export_path, &home.name, &away.name, &result) {
            Ok(()) => {
                self.state.push_log(format!(
                    "[INFO] Wrote {}",
                    self.export_path.display()
                ));
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Export failed: {err:#}"));
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let mut args = std::env::args().skip(1);
    let (Some(home_path), Some(away_path)) = (args.next(), args.next()) else {
        eprintln!("usage: matchsim_terminal <home_profile.csv> <away_profile.csv>");
        std::process::exit(2);
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(PathBuf::from(home_path), PathBuf::from(away_path));
    app.reload_profiles();
    let res = run_app(&mut terminal, &mut app);

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

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
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
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_body(frame, chunks[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(
        "s/Enter Simulate | e Export xlsx | r Reload profiles | ? Help | q Quit",
    )
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let line1 = format!("  .-.  MATCHSIM TERMINAL | {}", state.matchup_label());
    let line2 = format!(" /___\\ Trials: {}", state.trials);
    let line3 = "  |_|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(30)])
        .split(area);

    let profiles = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    render_profile_panel(frame, profiles[0], state, Slot::Home);
    render_profile_panel(frame, profiles[1], state, Slot::Away);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(columns[1]);

    let result = Paragraph::new(result_text(state))
        .block(Block::default().title("Result").borders(Borders::ALL));
    frame.render_widget(result, right[0]);

    render_outcome_chart(frame, right[1], state);
}

fn render_profile_panel(frame: &mut Frame, area: Rect, state: &AppState, slot: Slot) {
    let title = format!("{} Profile", slot.label());
    let text = match state.profile(slot) {
        Some(profile) => profile_text(profile),
        None => "Not loaded (press r)".to_string(),
    };
    let panel = Paragraph::new(text).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn profile_text(profile: &TeamProfile) -> String {
    let mut lines = vec![
        format!("Team: {}", profile.name),
        format!("Matches: {}", profile.matches()),
    ];
    for metric in Metric::ALL {
        let series = profile.metric(metric);
        let mean = series.iter().sum::<f64>() / series.len() as f64;
        lines.push(format!("{}: {:.1} avg", metric.column(), mean));
    }
    lines.join("\n")
}

fn result_text(state: &AppState) -> String {
    match &state.result {
        Some(result) => {
            let (h, a) = result.mode_scoreline;
            format!(
                "Home win: {:>5.2}%\nDraw:     {:>5.2}%\nAway win: {:>5.2}%\nMost likely scoreline: {h} - {a}\nMean goals: {:.2} / {:.2}",
                result.p_home, result.p_draw, result.p_away,
                result.mean_home_goals, result.mean_away_goals
            )
        }
        None => "No simulation yet (press s)".to_string(),
    }
}

fn render_outcome_chart(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Win% Bar").borders(Borders::ALL);
    let Some(result) = &state.result else {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let empty = Paragraph::new("Probabilities appear here after a simulation")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    };

    frame.render_widget(outcome_bar_chart(result).block(block), area);
}

fn outcome_bar_chart(result: &SimulationResult) -> BarChart<'static> {
    let bar = |label: &str, value: f64, color: Color| {
        Bar::default()
            .label(label.to_string().into())
            .value(value.round() as u64)
            .text_value(format!("{value:.1}%"))
            .style(Style::default().fg(color))
    };

    let bars = [
        bar("Home", result.p_home, Color::Green),
        bar("Draw", result.p_draw, Color::Yellow),
        bar("Away", result.p_away, Color::Red),
    ];

    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(100)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Matchsim Terminal - Help",
        "",
        "Profiles are CSV files with columns:",
        "  team, possession, shots, efficiency",
        "one row per historical match.",
        "",
        "Keys:",
        "  s / Enter    Simulate the matchup",
        "  e            Export result workbook",
        "  r            Reload both profiles",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Env: SIM_TRIALS, EXPORT_PATH",
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
