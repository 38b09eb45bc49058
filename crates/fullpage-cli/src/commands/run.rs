use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use fullpage_core::location::{Location, MemoryLocation};
use fullpage_core::AppConfig;
use fullpage_tui::{
    app::{App, Viewport},
    content::{demo_deck, load_deck},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    keymap::Keymap,
    ui,
};

pub async fn run(
    config: Arc<AppConfig>,
    deck_path: Option<PathBuf>,
    fragment: Option<String>,
) -> Result<()> {
    let deck = match deck_path.or_else(|| config.deck_path()) {
        Some(path) => load_deck(&path)?,
        None => demo_deck()?,
    };
    let keymap = Keymap::from_config(&config.keymap);
    let location = MemoryLocation::with_fragment(fragment.as_deref())?;

    let (cols, rows) = crossterm::terminal::size()?;
    let viewport = Viewport::measure(cols, rows, &config.ui);
    let mut app = App::new(config.clone(), deck, location, viewport)?;

    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("fullpage"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &keymap, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(
        section = app.engine.current_section(),
        fragment = ?app.engine.location().fragment(),
        "Viewer closed"
    );
    app.close();
    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    // Checked at the END of each iteration to pick the NEXT poll interval
    let mut needs_fast_update = false;

    loop {
        app.on_tick();

        terminal.draw(|frame| ui::draw(frame, app))?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.apply_action(action);
                }
                AppEvent::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse, app);
                    app.apply_action(action);
                }
                AppEvent::Resize(cols, rows) => {
                    let viewport = Viewport::measure(cols, rows, &app.config.ui);
                    app.resize(viewport);
                }
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            return Ok(());
        }
    }
}
