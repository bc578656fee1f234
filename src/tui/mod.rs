pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

/// Run the interactive report until the user quits.
pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::try_init()?;

    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // 250ms tick drives flash-message expiry
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            Some(Event::Resize) => {}
            None => break Ok(()),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Views
            KeyCode::Tab => app.next_view(),
            KeyCode::BackTab => app.previous_view(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                app.select_view(app::View::ALL[index]);
            }

            // Parameters
            KeyCode::Char('l') | KeyCode::Right => app.next_field(),
            KeyCode::Char('h') | KeyCode::Left => app.previous_field(),
            KeyCode::Char('+') | KeyCode::Char('=') => app.step_selected(1),
            KeyCode::Char('-') | KeyCode::Char('_') => app.step_selected(-1),
            KeyCode::Char('e') | KeyCode::Enter => app.start_edit(),
            KeyCode::Char('r') => app.reset_params(),

            // Scrolling
            KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),

            // Help
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::EditValue => match key.code {
            KeyCode::Enter => app.confirm_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => {
                app.edit_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | '%') => {
                app.edit_input.push(c);
            }
            // Ignore all other keys (don't propagate to Normal mode)
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
