use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use sudoku_engine::Difficulty;
use tokio::time::MissedTickBehavior;

use crate::game::{Game, Screen};
use crate::ui;

pub fn run(start_difficulty: Option<Difficulty>) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async_run(start_difficulty))
}

async fn async_run(start_difficulty: Option<Difficulty>) -> Result<(), Box<dyn std::error::Error>> {
    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut game = Game::new();
    if let Some(difficulty) = start_difficulty {
        game.difficulty = difficulty;
    }

    let result = run_loop(&mut terminal, &mut game).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut event_stream = EventStream::new();
    let redraw_rate = Duration::from_millis(250);

    // The game clock. The select branch below is disarmed whenever the
    // clock is stopped, so a cancelled timer can never deliver another
    // tick; the reset on a stop-to-running transition restarts the 1 Hz
    // cadence from the moment the game (re)starts.
    let mut clock = tokio::time::interval(Duration::from_secs(1));
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut clock_was_running = false;

    loop {
        terminal.draw(|f| ui::draw(f, game))?;

        let clock_running = game.timer_running();
        if clock_running && !clock_was_running {
            clock.reset();
        }
        clock_was_running = clock_running;

        tokio::select! {
            maybe_event = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    // Only handle Press events (crossterm sends Press+Release on Windows)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key(game, key) {
                        return Ok(());
                    }
                }
            }
            _ = clock.tick(), if clock_running => {
                game.on_tick();
            }
            _ = tokio::time::sleep(redraw_rate) => {
                game.on_ui_tick();
            }
        }
    }
}

/// Handle a key event. Returns true if the app should quit.
fn handle_key(game: &mut Game, key: KeyEvent) -> bool {
    match game.screen {
        Screen::Menu => handle_menu_key(game, key),
        Screen::Playing => handle_playing_key(game, key),
        Screen::Won => handle_won_key(game, key),
    }
}

fn handle_menu_key(game: &mut Game, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Left => {
            game.difficulty = game.difficulty.prev();
        }
        KeyCode::Down | KeyCode::Right => {
            game.difficulty = game.difficulty.next();
        }
        KeyCode::Enter => {
            game.start_new_game();
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            return true;
        }
        _ => {}
    }
    false
}

fn handle_playing_key(game: &mut Game, key: KeyEvent) -> bool {
    if game.show_quit_confirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
            _ => {
                game.show_quit_confirm = false;
            }
        }
        return false;
    }

    match key.code {
        KeyCode::Up => game.move_cursor(-1, 0),
        KeyCode::Down => game.move_cursor(1, 0),
        KeyCode::Left => game.move_cursor(0, -1),
        KeyCode::Right => game.move_cursor(0, 1),

        KeyCode::Char(c) => return handle_playing_char(game, c),

        KeyCode::Delete | KeyCode::Backspace => game.erase(),

        KeyCode::Esc => {
            game.show_quit_confirm = true;
        }

        _ => {}
    }
    false
}

fn handle_playing_char(game: &mut Game, c: char) -> bool {
    match c {
        '1'..='9' => {
            let num = c as u8 - b'0';
            game.place_number(num);
        }
        '0' => game.erase(),

        'c' | 'C' => game.check(),
        'h' | 'H' => game.request_hint(),
        'x' | 'X' => game.clear_inputs(),
        'r' | 'R' => game.reset(),
        'n' | 'N' => game.start_new_game(),

        'q' | 'Q' => {
            game.show_quit_confirm = true;
        }

        _ => {}
    }
    false
}

fn handle_won_key(game: &mut Game, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Char('n') => {
            game.screen = Screen::Menu;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            return true;
        }
        _ => {}
    }
    false
}
