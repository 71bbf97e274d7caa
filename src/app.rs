use crate::error::Result;
use crate::models::{ApiResponse, FlightRecord, SearchIntent};
use crate::normalize::{normalize, SoftCondition};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SearchMode {
    #[default]
    FlightNumber,
    Route,
}

impl SearchMode {
    /// Anything other than "route" selects flight-number search.
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("route") {
            SearchMode::Route
        } else {
            SearchMode::FlightNumber
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Field {
    Flight,
    Departure,
    Arrival,
}

/// Where the current search stands.
///
/// Only one search runs at a time: while `Searching`, submissions are ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Success(Vec<FlightRecord>),
    Empty(SoftCondition),
    Failed(String),
}

#[derive(Debug)]
pub struct App {
    pub mode: SearchMode,
    pub focus: Field,
    pub flight_input: String,
    pub departure_input: String,
    pub arrival_input: String,
    pub state: SearchState,
    /// Index of the first card shown.
    pub scroll: usize,
    /// Shown under the search bar when a submission was rejected.
    pub hint: Option<String>,
    pub tick_count: usize,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(SearchMode::default())
    }
}

impl App {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            focus: Self::first_field(mode),
            flight_input: String::new(),
            departure_input: String::new(),
            arrival_input: String::new(),
            state: SearchState::Idle,
            scroll: 0,
            hint: None,
            tick_count: 0,
            should_quit: false,
        }
    }

    fn first_field(mode: SearchMode) -> Field {
        match mode {
            SearchMode::FlightNumber => Field::Flight,
            SearchMode::Route => Field::Departure,
        }
    }

    pub fn on_tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    pub fn is_searching(&self) -> bool {
        self.state == SearchState::Searching
    }

    /// Returns the search to dispatch, if this key submitted one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchIntent> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return None;
            }
            _ => {}
        }

        // The form is disabled until the outstanding request resolves.
        if self.is_searching() {
            return None;
        }

        match key.code {
            KeyCode::Char('r') if ctrl => self.retry(),
            KeyCode::Tab => self.toggle_mode(),
            KeyCode::Up | KeyCode::Down | KeyCode::BackTab if self.mode == SearchMode::Route => {
                self.focus = match self.focus {
                    Field::Departure => Field::Arrival,
                    _ => Field::Departure,
                };
            }
            KeyCode::PageDown => self.scroll_down(),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Enter => return self.submit(),
            KeyCode::Backspace => {
                self.focused_input().pop();
            }
            KeyCode::Char(c) if !ctrl => {
                self.focused_input().push(c);
                self.hint = None;
            }
            _ => {}
        }
        None
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Field::Flight => &mut self.flight_input,
            Field::Departure => &mut self.departure_input,
            Field::Arrival => &mut self.arrival_input,
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            SearchMode::FlightNumber => SearchMode::Route,
            SearchMode::Route => SearchMode::FlightNumber,
        };
        self.focus = Self::first_field(self.mode);
        self.hint = None;
    }

    fn scroll_down(&mut self) {
        if let SearchState::Success(records) = &self.state {
            if self.scroll + 1 < records.len() {
                self.scroll += 1;
            }
        }
    }

    /// Builds an intent from the form. Blank required fields issue nothing.
    pub fn submit(&mut self) -> Option<SearchIntent> {
        if self.is_searching() {
            return None;
        }

        let intent = match self.mode {
            SearchMode::FlightNumber => SearchIntent::flight_number(&self.flight_input),
            SearchMode::Route => {
                SearchIntent::route(&self.departure_input, Some(&self.arrival_input))
            }
        };

        match intent {
            Ok(intent) => {
                self.begin_search();
                info!("Searching: {:?}", intent);
                Some(intent)
            }
            Err(e) => {
                debug!("Rejected submission: {}", e);
                self.hint = Some(e.to_string());
                None
            }
        }
    }

    /// Drops the previous results and errors before the new request goes out.
    pub fn begin_search(&mut self) {
        self.state = SearchState::Searching;
        self.scroll = 0;
        self.hint = None;
    }

    pub fn finish_search(&mut self, result: Result<ApiResponse>) {
        self.state = match result {
            Ok(response) => {
                let normalized = normalize(&response);
                match normalized.condition {
                    Some(condition) => SearchState::Empty(condition),
                    None => {
                        info!("Search returned {} flight(s)", normalized.records.len());
                        SearchState::Success(normalized.records)
                    }
                }
            }
            Err(e) => SearchState::Failed(e.user_message()),
        };
        self.scroll = 0;
    }

    /// Back to the start screen, discarding any results or error.
    pub fn retry(&mut self) {
        self.state = SearchState::Idle;
        self.scroll = 0;
        self.hint = None;
    }
}
