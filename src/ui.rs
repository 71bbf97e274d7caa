//! TUI rendering for the flight lookup.
//!
//! Search bar on top, then whichever panel matches the current
//! [`SearchState`]: start prompt, spinner, flight cards, "no flights" or error.

use crate::app::{App, Field, SearchMode, SearchState};
use crate::display::{format_date, format_time};
use crate::models::FlightRecord;
use crate::normalize::SoftCondition;
use crate::status::StatusClass;
use ratatui::{prelude::*, widgets::*};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const CARD_HEIGHT: u16 = 7;

/// Renders one frame of the TUI based on current application state.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Tabs
            Constraint::Length(3), // Inputs
            Constraint::Length(1), // Hint
            Constraint::Min(0),    // Results
            Constraint::Length(1), // Help
        ])
        .split(f.size());

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " ✈ Flight Lookup ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "│ live data from AirLabs",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    f.render_widget(title, chunks[0]);

    render_tabs(f, app, chunks[1]);
    render_inputs(f, app, chunks[2]);

    if let Some(ref hint) = app.hint {
        let p = Paragraph::new(format!(" {}", hint)).style(Style::default().fg(Color::Yellow));
        f.render_widget(p, chunks[3]);
    }

    match &app.state {
        SearchState::Idle => render_start(f, chunks[4]),
        SearchState::Searching => render_loading(f, app, chunks[4]),
        SearchState::Success(records) => render_results(f, records, app.scroll, chunks[4]),
        SearchState::Empty(condition) => render_empty(f, *condition, chunks[4]),
        SearchState::Failed(message) => render_error(f, message, chunks[4]),
    }

    let help = Paragraph::new(
        " Tab search type   ↑/↓ field   Enter search   PgUp/PgDn scroll   Ctrl+R reset   Esc quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[5]);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let selected = match app.mode {
        SearchMode::FlightNumber => 0,
        SearchMode::Route => 1,
    };
    let tabs = Tabs::new(vec![" Flight Number ", " Route "])
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
    f.render_widget(tabs, area);
}

fn render_inputs(f: &mut Frame, app: &App, area: Rect) {
    match app.mode {
        SearchMode::FlightNumber => {
            let input = input_box(
                app,
                Field::Flight,
                &app.flight_input,
                " Flight number (e.g., AA100, VN220) ",
            );
            f.render_widget(input, area);
        }
        SearchMode::Route => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(48),
                    Constraint::Length(3),
                    Constraint::Percentage(48),
                ])
                .split(area);
            f.render_widget(
                input_box(
                    app,
                    Field::Departure,
                    &app.departure_input,
                    " Departure (e.g., JFK, LAX) ",
                ),
                halves[0],
            );
            f.render_widget(
                Paragraph::new("\n →").style(Style::default().fg(Color::DarkGray)),
                halves[1],
            );
            f.render_widget(
                input_box(
                    app,
                    Field::Arrival,
                    &app.arrival_input,
                    " Arrival (optional) ",
                ),
                halves[2],
            );
        }
    }
}

fn input_box<'a>(app: &App, field: Field, value: &'a str, title: &'a str) -> Paragraph<'a> {
    let border = if app.is_searching() {
        Style::default().fg(Color::DarkGray)
    } else if app.focus == field {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let cursor = if app.focus == field && !app.is_searching() {
        "▏"
    } else {
        ""
    };

    Paragraph::new(Line::from(vec![Span::raw(value), Span::raw(cursor)])).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border),
    )
}

fn render_start(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Start Searching",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Enter a flight number or select a route to search for flight information",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let frame = SPINNER[app.tick_count % SPINNER.len()];
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Searching...", frame),
            Style::default().fg(Color::Cyan),
        )),
    ];
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn render_empty(f: &mut Frame, condition: SoftCondition, area: Rect) {
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from(condition.message()),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" No Flights Found ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(p, area);
}

fn render_error(f: &mut Frame, message: &str, area: Rect) {
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+R to try again",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(p, area);
}

fn render_results(f: &mut Frame, records: &[FlightRecord], scroll: usize, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let noun = if records.len() == 1 { "flight" } else { "flights" };
    let header = Line::from(vec![
        Span::styled(
            " Search Results ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} {}", records.len(), noun),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let list_area = chunks[1];
    let visible = (list_area.height / CARD_HEIGHT).max(1) as usize;

    for (slot, record) in records.iter().skip(scroll).take(visible).enumerate() {
        let y = list_area.y + slot as u16 * CARD_HEIGHT;
        if y + CARD_HEIGHT > list_area.y + list_area.height {
            break;
        }
        let card_area = Rect::new(list_area.x, y, list_area.width, CARD_HEIGHT);
        render_card(f, record, card_area);
    }
}

fn render_card(f: &mut Frame, flight: &FlightRecord, area: Rect) {
    let status = flight.display_status();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut airline = vec![Span::styled(
        flight.airline_label(),
        Style::default().fg(Color::Cyan),
    )];
    if let Some(ref aircraft) = flight.aircraft {
        airline.push(Span::styled(
            format!("  │ {}", aircraft),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let dep_time = flight.dep_time.as_deref();
    let arr_time = flight.arr_time.as_deref();
    let route = Line::from(vec![
        Span::styled(format!("{:<5}", flight.dep_label()), bold),
        Span::raw(format!("{} {:<5}", format_time(dep_time), format_date(dep_time))),
        Span::styled("  ───✈───  ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:<5}", flight.arr_label()), bold),
        Span::raw(format!("{} {}", format_time(arr_time), format_date(arr_time))),
    ]);

    let names = Line::from(Span::styled(
        format!(
            "{}  →  {}",
            flight.dep_name.as_deref().unwrap_or(""),
            flight.arr_name.as_deref().unwrap_or("")
        ),
        Style::default().fg(Color::DarkGray),
    ));

    let mut details = Vec::new();
    if let Some(minutes) = flight.shown_duration() {
        details.push(Span::raw(format!("⏱ {} minutes   ", minutes)));
    }
    if let Some(minutes) = flight.shown_delay() {
        details.push(Span::styled(
            format!("⚠ Delayed {} minutes", minutes),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Line::from(vec![
        Span::styled(format!("✈ {}  ", flight.flight_label()), bold),
        Span::styled(
            format!(" {} ", status.label),
            Style::default()
                .fg(Color::Black)
                .bg(status_color(status.class)),
        ),
    ]);

    let card = Paragraph::new(vec![
        header,
        Line::from(airline),
        route,
        names,
        Line::from(details),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(card, area);
}

fn status_color(class: StatusClass) -> Color {
    match class {
        StatusClass::OnTime => Color::Green,
        StatusClass::Landed => Color::Blue,
        StatusClass::Delayed => Color::Yellow,
        StatusClass::Cancelled => Color::Red,
        StatusClass::Unknown => Color::Gray,
    }
}
