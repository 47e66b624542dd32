use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::info;

use crate::client::MovieApi;
use crate::models::NO_PROVIDERS;
use crate::view::{FinderView, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Search(String),
    Select(i64),
    Quit,
}

#[derive(Debug, Clone)]
pub struct TuiState {
    pub view: FinderView,
    pub input: String,
    pub focus: Focus,
    pub highlighted: usize,
    region: String,
}

impl TuiState {
    pub fn new(region: &str) -> Self {
        Self {
            view: FinderView::new(),
            input: String::new(),
            focus: Focus::Search,
            highlighted: 0,
            region: region.to_string(),
        }
    }

    fn highlighted_id(&self) -> Option<i64> {
        self.view.results.get(self.highlighted).map(|m| m.tmdb_id)
    }
}

pub async fn run(api: &dyn MovieApi, region: &str) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = TuiState::new(region);
    let result = event_loop(&mut terminal, &mut state, api).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut TuiState,
    api: &dyn MovieApi,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render(f, state))?;

        let Event::Key(key) = tokio::task::spawn_blocking(event::read).await?? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let action = handle_key_event(state, key);
        if !apply_action(terminal, state, api, action).await? {
            info!("Leaving terminal interface");
            return Ok(());
        }
    }
}

/// Runs one action. The loading frame is drawn before the request and the
/// caller redraws the outcome. Returns `false` on quit.
async fn apply_action<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut TuiState,
    api: &dyn MovieApi,
    action: Action,
) -> anyhow::Result<bool> {
    match action {
        Action::None => {}
        Action::Quit => return Ok(false),
        Action::Search(text) => {
            if let Some(query) = state.view.begin_search(&text) {
                terminal.draw(|f| render(f, state))?;
                let result = api.search(&query).await;
                state.view.finish_search(result);
                state.highlighted = 0;
                if !state.view.results.is_empty() {
                    state.focus = Focus::Results;
                }
            }
        }
        Action::Select(id) => {
            state.view.begin_select(id);
            terminal.draw(|f| render(f, state))?;
            let result = api.fetch_details(id).await;
            state.view.finish_select(result);
        }
    }
    Ok(true)
}

pub fn handle_key_event(state: &mut TuiState, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match (state.focus, key.code) {
        (_, KeyCode::Esc) => Action::Quit,
        (_, KeyCode::Tab) => {
            state.focus = match state.focus {
                Focus::Search => Focus::Results,
                Focus::Results => Focus::Search,
            };
            Action::None
        }
        (Focus::Search, KeyCode::Enter) => {
            if state.input.trim().is_empty() {
                Action::None
            } else {
                Action::Search(state.input.clone())
            }
        }
        (Focus::Search, KeyCode::Backspace) => {
            state.input.pop();
            Action::None
        }
        (Focus::Search, KeyCode::Char(c)) => {
            state.input.push(c);
            Action::None
        }
        (Focus::Results, KeyCode::Char('q')) => Action::Quit,
        (Focus::Results, KeyCode::Up) => {
            state.highlighted = state.highlighted.saturating_sub(1);
            Action::None
        }
        (Focus::Results, KeyCode::Down) => {
            if state.highlighted + 1 < state.view.results.len() {
                state.highlighted += 1;
            }
            Action::None
        }
        (Focus::Results, KeyCode::Enter) => match state.highlighted_id() {
            Some(id) => Action::Select(id),
            None => Action::None,
        },
        _ => Action::None,
    }
}

fn render(f: &mut Frame, state: &TuiState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(vec![
        Span::styled("Movie OTT Finder", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  streaming availability, region {}", state.region)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, layout[0]);

    let search_label = if state.view.loading {
        "Search (searching...)"
    } else {
        "Search"
    };
    render_field(f, layout[1], search_label, &state.input, state.focus == Focus::Search);

    if let Some(ref err) = state.view.error {
        let error = Paragraph::new(Span::styled(err.as_str(), Style::default().fg(Color::Red)));
        f.render_widget(error, layout[2]);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(layout[3]);
    render_results(f, columns[0], state);
    render_details(f, columns[1], state);

    let help = Paragraph::new(Line::from(
        "Enter search/select, Tab switch pane, Up/Down move, Esc quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, layout[4]);
}

fn render_results(f: &mut Frame, area: Rect, state: &TuiState) {
    let active = state.focus == Focus::Results;
    let title = format!("Results ({})", state.view.results.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focus_style(active));

    if state.view.results_placeholder_visible() {
        let placeholder = Paragraph::new("No results yet. Start by searching for a movie above.")
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = state
        .view
        .results
        .iter()
        .map(|movie| {
            let marker = if state.view.is_active(movie.tmdb_id) { "● " } else { "  " };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(movie.title_label().to_string(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  ⭐ {}", movie.rating_label())),
                ]),
                Line::from(Span::styled(
                    format!("  {}", movie.release_label()),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default().with_selected(Some(state.highlighted));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_details(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default().title("Details").borders(Borders::ALL);

    let lines: Vec<Line> = if state.view.phase() == Phase::DetailLoading {
        vec![Line::from("Loading details...")]
    } else if let Some(ref movie) = state.view.selected {
        let mut lines = vec![
            Line::from(Span::styled(
                movie.title_label().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(movie.meta_line()),
            Line::from(""),
            Line::from(movie.overview_text().to_string()),
            Line::from(""),
            Line::from(format!("Genres: {}", movie.genres_label())),
            Line::from(""),
            Line::from(Span::styled(
                format!("OTT Platforms (Region: {})", state.region),
                Style::default().fg(Color::Cyan),
            )),
        ];
        let providers = movie.provider_labels();
        if providers.is_empty() {
            lines.push(Line::from(NO_PROVIDERS));
        } else {
            lines.extend(providers.into_iter().map(|p| Line::from(format!("• {}", p))));
        }
        lines
    } else {
        vec![Line::from(
            "Select a movie from the left to see its details & OTT platforms.",
        )]
    };

    let details = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(details, area);
}

fn focus_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_field(f: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let title = if active {
        format!("{} (editing)", label)
    } else {
        label.to_string()
    };

    let style = focus_style(active);
    let block = Block::default().title(title).borders(Borders::ALL).border_style(style);
    let paragraph = Paragraph::new(value).block(block).style(style);
    f.render_widget(paragraph, area);
}
