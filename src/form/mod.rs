//! Input collection.
//!
//! The pipeline only sees [`InputCollector`]. Two collectors ship with the binary: a
//! full-screen terminal form and a line-oriented prompt.

pub mod prompt;
pub mod tui;

use std::ops::RangeInclusive;

use crate::error::Result;
use crate::model::{parse_search_terms, SearchRequest};

pub use prompt::PromptForm;
pub use tui::TerminalForm;

/// Result counts offered by the form.
pub const RESULT_CHOICES: RangeInclusive<usize> = 3..=10;

pub const INCOMPLETE_FORM_MESSAGE: &str = "Fill in all of the fields.";

/// Source of a [`SearchRequest`]. `Ok(None)` means the user closed the form.
pub trait InputCollector {
    fn collect_input(&mut self) -> Result<Option<SearchRequest>>;
}

impl<T: InputCollector + ?Sized> InputCollector for Box<T> {
    fn collect_input(&mut self) -> Result<Option<SearchRequest>> {
        (**self).collect_input()
    }
}

/// Hands back a request supplied up front (command line flags), once.
#[derive(Debug, Clone, Default)]
pub struct Preset {
    request: Option<SearchRequest>,
}

impl Preset {
    pub fn new(request: SearchRequest) -> Self {
        Self {
            request: Some(request),
        }
    }
}

impl InputCollector for Preset {
    fn collect_input(&mut self) -> Result<Option<SearchRequest>> {
        Ok(self.request.take())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    City,
    State,
    Terms,
    Results,
}

impl Field {
    const ORDER: [Field; 4] = [Field::City, Field::State, Field::Terms, Field::Results];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Field contents and focus for the terminal form, independent of any rendering.
#[derive(Debug, Clone)]
pub struct FormState {
    pub states: Vec<String>,
    pub city: String,
    pub terms: String,
    pub state_cursor: usize,
    pub selected_state: Option<usize>,
    pub results: usize,
    pub focus: Field,
    pub message: Option<String>,
}

impl FormState {
    pub fn new(states: Vec<String>) -> Self {
        Self {
            states,
            city: String::new(),
            terms: String::new(),
            state_cursor: 0,
            selected_state: None,
            results: *RESULT_CHOICES.start(),
            focus: Field::City,
            message: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            Field::City => self.city.push(c),
            Field::Terms => self.terms.push(c),
            Field::State | Field::Results => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::City => {
                self.city.pop();
            }
            Field::Terms => {
                self.terms.pop();
            }
            Field::State | Field::Results => {}
        }
    }

    /// Moves the state cursor; landing on a state selects it.
    pub fn move_state(&mut self, forward: bool) {
        if self.states.is_empty() {
            return;
        }
        let last = self.states.len() - 1;
        self.state_cursor = match (forward, self.selected_state) {
            (_, None) => self.state_cursor,
            (true, Some(_)) if self.state_cursor >= last => 0,
            (true, Some(_)) => self.state_cursor + 1,
            (false, Some(_)) if self.state_cursor == 0 => last,
            (false, Some(_)) => self.state_cursor - 1,
        };
        self.selected_state = Some(self.state_cursor);
    }

    pub fn step_results(&mut self, up: bool) {
        let (lo, hi) = (*RESULT_CHOICES.start(), *RESULT_CHOICES.end());
        self.results = if up {
            (self.results + 1).min(hi)
        } else {
            self.results.saturating_sub(1).max(lo)
        };
    }

    pub fn selected_state(&self) -> Option<&str> {
        self.selected_state
            .and_then(|i| self.states.get(i))
            .map(String::as_str)
    }

    /// Returns the request when every field is filled, otherwise records the
    /// incomplete-form message and returns `None`.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let city = self.city.trim().to_string();
        let terms = parse_search_terms(&self.terms);
        let state = self.selected_state().map(String::from);

        match state {
            Some(state) if !city.is_empty() && !terms.is_empty() => {
                let request = SearchRequest::new(city, state, terms, self.results).ok();
                if request.is_some() {
                    self.message = None;
                }
                request
            }
            _ => {
                self.message = Some(INCOMPLETE_FORM_MESSAGE.to_string());
                None
            }
        }
    }
}
