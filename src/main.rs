use color_eyre::Result;
use flight_lookup_tui::{
    api::AirLabsClient,
    app::{App, SearchMode},
    config::{Config, CONFIG_PATH},
    events::{Event, EventHandler},
    logging, ui,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, config_problem) = Config::load();

    // Instrumentation and safety
    let _log_guard = logging::initialize_logging(&config.logging);
    color_eyre::install()?;
    install_panic_hook();

    if let Some(ref problem) = config_problem {
        warn!("{}", problem);
    }
    if config.api.api_key.is_empty() {
        warn!("No api_key set in {}; AirLabs will reject requests.", CONFIG_PATH);
    }

    let client = Arc::new(AirLabsClient::new(&config.api)?);

    // Ready terminal and state
    let mut terminal = setup_terminal()?;
    let mut app = App::new(SearchMode::from_config(&config.ui.default_search));
    app.hint = config_problem;
    let mut events = EventHandler::new(config.ui.tick_rate_ms);

    // Main loop
    while !app.should_quit {
        terminal.draw(|f| ui::render(f, &app))?;

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Tick => app.on_tick(),
            Event::Input(key) => {
                // The app only hands out an intent when nothing is in flight.
                if let Some(intent) = app.handle_key(key) {
                    let client = Arc::clone(&client);
                    let tx = events.tx.clone();
                    tokio::spawn(async move {
                        let result = client.search(&intent).await;
                        let _ = tx.send(Event::SearchFinished(result));
                    });
                }
            }
            Event::SearchFinished(result) => app.finish_search(result),
        }
    }

    restore_terminal(terminal)?;
    info!("Exiting.");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen, crossterm::cursor::Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen, crossterm::cursor::Show)?;
    Ok(())
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Leave the alternate screen before the panic message prints.
        crossterm::terminal::disable_raw_mode().ok();
        crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen, crossterm::cursor::Show).ok();
        original_hook(panic_info);
    }));
}
