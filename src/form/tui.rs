use std::io::{self, Stdout};

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::{debug, warn};

use super::{Field, FormState, InputCollector, RESULT_CHOICES};
use crate::error::Result;
use crate::model::SearchRequest;

const TITLE: &str = "Indeed.com Job Search";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Submit(SearchRequest),
    Cancel,
}

/// Full-screen form drawn with ratatui on the alternate screen.
pub struct TerminalForm {
    states: Vec<String>,
}

impl TerminalForm {
    pub fn new(states: Vec<String>) -> Self {
        Self { states }
    }
}

/// Runs `restore` when dropped, so early returns during setup still undo it.
struct RestoreGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "failed to disable raw mode");
    }
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, LeaveAlternateScreen, Show) {
        warn!(error = %e, "failed to leave alternate screen");
    }
}

impl InputCollector for TerminalForm {
    fn collect_input(&mut self) -> Result<Option<SearchRequest>> {
        // Setup terminal
        enable_raw_mode()?;
        let _restore = RestoreGuard::new(restore_terminal);
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut form = FormState::new(self.states.clone());
        let request = run_form(&mut terminal, &mut form)?;
        debug!(submitted = request.is_some(), "terminal form closed");
        Ok(request)
    }
}

fn run_form(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    form: &mut FormState,
) -> Result<Option<SearchRequest>> {
    loop {
        terminal.draw(|f| ui(f, &*form))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(form, key) {
                FormAction::Continue => {}
                FormAction::Submit(request) => return Ok(Some(request)),
                FormAction::Cancel => return Ok(None),
            }
        }
    }
}

/// Applies one key press to the form.
pub fn handle_key(form: &mut FormState, key: KeyEvent) -> FormAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return FormAction::Cancel;
    }

    match key.code {
        KeyCode::Esc => return FormAction::Cancel,
        KeyCode::Enter => {
            if let Some(request) = form.submit() {
                return FormAction::Submit(request);
            }
        }
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_prev(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Up | KeyCode::Down if form.focus == Field::State => {
            form.move_state(key.code == KeyCode::Down)
        }
        KeyCode::Left | KeyCode::Right if form.focus == Field::Results => {
            form.step_results(key.code == KeyCode::Right)
        }
        KeyCode::Char(' ') if form.focus == Field::State => form.move_state(true),
        KeyCode::Char(c) => form.insert_char(c),
        _ => {}
    }
    FormAction::Continue
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn ui(f: &mut Frame, form: &FormState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(f.size());

    let city = Paragraph::new(form.city.as_str())
        .block(field_block("Input city name:", form.focus == Field::City));
    f.render_widget(city, rows[0]);

    render_states(f, form, rows[1]);

    let terms = Paragraph::new(form.terms.as_str()).block(field_block(
        "Input search terms (separate with commas):",
        form.focus == Field::Terms,
    ));
    f.render_widget(terms, rows[2]);

    let choices: Vec<Line> = RESULT_CHOICES.map(|n| Line::from(n.to_string())).collect();
    let results = Tabs::new(choices)
        .select(form.results - RESULT_CHOICES.start())
        .block(field_block(
            "How many search results to display?",
            form.focus == Field::Results,
        ))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(results, rows[3]);

    let status = match &form.message {
        Some(message) => Line::from(Span::styled(
            format!("ERROR: {message}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            format!("{TITLE}  Tab: next field  Enter: confirm  Esc: quit"),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(status), rows[4]);
}

fn render_states(f: &mut Frame, form: &FormState, area: Rect) {
    let selected = form.selected_state().unwrap_or("");
    let title = format!("Select state abbreviation: (State Selected: {selected})");

    let items: Vec<ListItem> = form
        .states
        .iter()
        .map(|s| ListItem::new(s.as_str()))
        .collect();
    let list = List::new(items)
        .block(field_block(&title, form.focus == Field::State))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED).fg(Color::Yellow))
        .highlight_symbol(">> ");

    let mut list_state = ListState::default();
    list_state.select(form.selected_state.or(Some(form.state_cursor)));
    f.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form() -> FormState {
        FormState::new(vec!["NV".into(), "OH".into()])
    }

    fn setup_with_guard(fail: bool, restored: &std::cell::Cell<u32>) -> io::Result<()> {
        let _restore = RestoreGuard::new(|| restored.set(restored.get() + 1));
        if fail {
            return Err(io::Error::new(io::ErrorKind::Other, "alternate screen unavailable"));
        }
        Ok(())
    }

    #[test]
    fn terminal_is_restored_when_setup_fails() {
        let restored = std::cell::Cell::new(0);
        assert!(setup_with_guard(true, &restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn terminal_is_restored_once_on_normal_exit() {
        let restored = std::cell::Cell::new(0);
        setup_with_guard(false, &restored).unwrap();
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn escape_cancels() {
        assert_eq!(handle_key(&mut form(), press(KeyCode::Esc)), FormAction::Cancel);
        assert_eq!(
            handle_key(&mut form(), KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            FormAction::Cancel
        );
    }

    #[test]
    fn enter_on_incomplete_form_keeps_it_open() {
        let mut form = form();
        assert_eq!(handle_key(&mut form, press(KeyCode::Enter)), FormAction::Continue);
        assert!(form.message.is_some());
    }

    #[test]
    fn keyboard_flow_submits_request() {
        let mut form = form();
        for c in "Reno".chars() {
            handle_key(&mut form, press(KeyCode::Char(c)));
        }
        handle_key(&mut form, press(KeyCode::Tab));
        handle_key(&mut form, press(KeyCode::Down));
        handle_key(&mut form, press(KeyCode::Down));
        handle_key(&mut form, press(KeyCode::Down));
        handle_key(&mut form, press(KeyCode::Tab));
        for c in "rust, web dev".chars() {
            handle_key(&mut form, press(KeyCode::Char(c)));
        }
        handle_key(&mut form, press(KeyCode::Tab));
        handle_key(&mut form, press(KeyCode::Right));

        match handle_key(&mut form, press(KeyCode::Enter)) {
            FormAction::Submit(request) => {
                assert_eq!(request.city, "Reno");
                assert_eq!(request.state, "NV");
                assert_eq!(request.search_terms, vec!["rust", "web dev"]);
                assert_eq!(request.max_results, 4);
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn typing_in_state_list_is_ignored() {
        let mut form = form();
        handle_key(&mut form, press(KeyCode::Tab));
        handle_key(&mut form, press(KeyCode::Char('x')));
        assert!(form.city.is_empty());
        assert!(form.terms.is_empty());
    }
}
