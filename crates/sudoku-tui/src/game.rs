use sudoku_engine::validation::get_all_conflicts;
use sudoku_engine::{Difficulty, GameSession, GameStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Transient status banner. Ages out after a fixed number of redraw ticks
/// (12 ticks at 250ms each, roughly three seconds).
#[derive(Clone, Debug)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
    ttl: u8,
}

const MESSAGE_TTL: u8 = 12;

pub struct Game {
    pub session: GameSession,
    pub screen: Screen,
    pub difficulty: Difficulty,
    pub selected_row: usize,
    pub selected_col: usize,
    /// Seconds counter driven by the app loop's 1 Hz tick.
    pub elapsed_secs: u64,
    timer_running: bool,
    pub message: Option<Message>,
    /// Cell revealed by the most recent hint, kept highlighted.
    pub hint_cell: Option<(usize, usize)>,
    /// After a check action, color user cells as correct/incorrect.
    pub show_check: bool,
    pub conflicts: Vec<(usize, usize)>,
    pub show_quit_confirm: bool,
}

impl Game {
    pub fn new() -> Self {
        Self {
            session: GameSession::new(),
            screen: Screen::Menu,
            difficulty: Difficulty::default(),
            selected_row: 4,
            selected_col: 4,
            elapsed_secs: 0,
            timer_running: false,
            message: None,
            hint_cell: None,
            show_check: false,
            conflicts: Vec::new(),
            show_quit_confirm: false,
        }
    }

    pub fn start_new_game(&mut self) {
        self.session.new_game(self.difficulty);
        self.screen = Screen::Playing;
        self.selected_row = 4;
        self.selected_col = 4;
        self.elapsed_secs = 0;
        self.timer_running = true;
        self.hint_cell = None;
        self.show_check = false;
        self.conflicts.clear();
        self.show_quit_confirm = false;
        self.set_message("New game started! Good luck!", Severity::Info);
    }

    pub fn move_cursor(&mut self, dr: i32, dc: i32) {
        self.selected_row = (self.selected_row as i32 + dr).rem_euclid(9) as usize;
        self.selected_col = (self.selected_col as i32 + dc).rem_euclid(9) as usize;
    }

    pub fn place_number(&mut self, num: u8) {
        if self.screen != Screen::Playing {
            return;
        }
        let r = self.selected_row;
        let c = self.selected_col;
        if self.session.is_given(r, c) {
            return;
        }

        self.session.set_cell(r, c, num);
        if self.hint_cell == Some((r, c)) {
            self.hint_cell = None;
        }
        self.show_check = false;
        self.refresh_conflicts();

        if self.session.status() == GameStatus::Solved {
            self.on_solved();
        }
    }

    pub fn erase(&mut self) {
        self.place_number(0);
    }

    pub fn check(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        let result = self.session.check_complete();
        if !result.complete {
            self.show_check = true;
            self.set_message("Puzzle is not complete yet!", Severity::Info);
        } else if result.correct {
            self.on_solved();
        } else {
            self.show_check = true;
            self.set_message("Some cells are incorrect. Keep trying!", Severity::Error);
        }
    }

    pub fn request_hint(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        match self.session.hint_cell() {
            Some((r, c)) => {
                self.session.apply_hint(r, c);
                self.hint_cell = Some((r, c));
                self.show_check = false;
                self.refresh_conflicts();
                self.set_message("Hint provided! Check the highlighted cell.", Severity::Info);
                if self.session.status() == GameStatus::Solved {
                    self.on_solved();
                }
            }
            None => {
                self.set_message(
                    "No hints available! All filled cells are correct.",
                    Severity::Info,
                );
            }
        }
    }

    pub fn clear_inputs(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        self.session.clear_user_inputs();
        self.hint_cell = None;
        self.show_check = false;
        self.refresh_conflicts();
        self.set_message("All user inputs cleared!", Severity::Info);
    }

    /// Put the original puzzle back and restart the clock from zero.
    pub fn reset(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        self.session.reset_to_initial();
        self.elapsed_secs = 0;
        self.timer_running = true;
        self.hint_cell = None;
        self.show_check = false;
        self.conflicts.clear();
        self.set_message("Game reset!", Severity::Info);
    }

    /// One-second clock tick from the app loop.
    pub fn on_tick(&mut self) {
        if self.timer_running {
            self.elapsed_secs += 1;
        }
    }

    /// Redraw-rate tick; ages the message banner.
    pub fn on_ui_tick(&mut self) {
        if let Some(msg) = &mut self.message {
            msg.ttl = msg.ttl.saturating_sub(1);
            if msg.ttl == 0 {
                self.message = None;
            }
        }
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn format_time(&self) -> String {
        format!("{:02}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }

    pub fn set_message(&mut self, text: &str, severity: Severity) {
        self.message = Some(Message {
            text: text.to_string(),
            severity,
            ttl: MESSAGE_TTL,
        });
    }

    fn on_solved(&mut self) {
        self.timer_running = false;
        self.screen = Screen::Won;
        self.set_message("Congratulations! You solved the puzzle correctly!", Severity::Success);
        log::info!("solved in {}", self.format_time());
    }

    fn refresh_conflicts(&mut self) {
        self.conflicts = get_all_conflicts(self.session.working_grid());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fill every open cell from the solution, leaving `skip` untouched.
    fn fill_all_but(game: &mut Game, skip: Option<(usize, usize)>) {
        let solution = *game.session.solution();
        for r in 0..9 {
            for c in 0..9 {
                if Some((r, c)) == skip || game.session.is_given(r, c) {
                    continue;
                }
                game.selected_row = r;
                game.selected_col = c;
                game.place_number(solution[r][c]);
            }
        }
    }

    fn first_open_cell(game: &Game) -> (usize, usize) {
        for r in 0..9 {
            for c in 0..9 {
                if !game.session.is_given(r, c) {
                    return (r, c);
                }
            }
        }
        unreachable!()
    }

    #[test]
    fn starts_on_menu_with_stopped_clock() {
        let game = Game::new();
        assert_eq!(game.screen, Screen::Menu);
        assert!(!game.timer_running());
        assert_eq!(game.format_time(), "00:00");
    }

    #[test]
    fn cursor_wraps_at_edges() {
        let mut game = Game::new();
        game.selected_row = 0;
        game.selected_col = 8;
        game.move_cursor(-1, 1);
        assert_eq!((game.selected_row, game.selected_col), (8, 0));
    }

    #[test]
    fn new_game_starts_clock_from_zero() {
        let mut game = Game::new();
        game.elapsed_secs = 99;
        game.start_new_game();
        assert_eq!(game.screen, Screen::Playing);
        assert_eq!(game.elapsed_secs, 0);
        assert!(game.timer_running());
    }

    #[test]
    fn tick_only_advances_running_clock() {
        let mut game = Game::new();
        game.on_tick();
        assert_eq!(game.elapsed_secs, 0);

        game.start_new_game();
        game.on_tick();
        game.on_tick();
        assert_eq!(game.elapsed_secs, 2);
        assert_eq!(game.format_time(), "00:02");
    }

    #[test]
    fn format_time_zero_pads_minutes() {
        let mut game = Game::new();
        game.elapsed_secs = 61;
        assert_eq!(game.format_time(), "01:01");
        game.elapsed_secs = 600;
        assert_eq!(game.format_time(), "10:00");
    }

    #[test]
    fn placing_on_given_cell_is_ignored() {
        let mut game = Game::new();
        game.start_new_game();

        'outer: for r in 0..9 {
            for c in 0..9 {
                if game.session.is_given(r, c) {
                    let before = game.session.working(r, c);
                    game.selected_row = r;
                    game.selected_col = c;
                    game.place_number(before % 9 + 1);
                    assert_eq!(game.session.working(r, c), before);
                    break 'outer;
                }
            }
        }
    }

    #[test]
    fn completing_the_grid_wins_and_stops_clock() {
        let mut game = Game::new();
        game.start_new_game();
        game.on_tick();

        fill_all_but(&mut game, None);
        assert_eq!(game.screen, Screen::Won);
        assert!(!game.timer_running());

        let frozen = game.elapsed_secs;
        game.on_tick();
        assert_eq!(game.elapsed_secs, frozen);
    }

    #[test]
    fn check_reports_incomplete_and_incorrect() {
        let mut game = Game::new();
        game.start_new_game();

        game.check();
        assert!(game.message.as_ref().unwrap().text.contains("not complete"));

        let (r, c) = first_open_cell(&game);
        fill_all_but(&mut game, Some((r, c)));
        let wrong = game.session.solution()[r][c] % 9 + 1;
        game.selected_row = r;
        game.selected_col = c;
        game.place_number(wrong);

        game.check();
        assert_eq!(game.screen, Screen::Playing);
        assert!(game.show_check);
        assert_eq!(game.message.as_ref().unwrap().severity, Severity::Error);
    }

    #[test]
    fn hint_reveals_a_cell() {
        let mut game = Game::new();
        game.start_new_game();

        game.request_hint();
        let (r, c) = game.hint_cell.expect("fresh puzzle always has a hint");
        assert_eq!(game.session.working(r, c), game.session.solution()[r][c]);
    }

    #[test]
    fn reset_restarts_clock_and_board() {
        let mut game = Game::new();
        game.start_new_game();
        let (r, c) = first_open_cell(&game);
        game.selected_row = r;
        game.selected_col = c;
        game.place_number(game.session.solution()[r][c]);
        game.on_tick();

        game.reset();
        assert_eq!(game.elapsed_secs, 0);
        assert!(game.timer_running());
        assert_eq!(game.session.working_grid(), game.session.initial_grid());
    }

    #[test]
    fn message_expires_after_ttl() {
        let mut game = Game::new();
        game.set_message("hello", Severity::Info);
        for _ in 0..MESSAGE_TTL {
            game.on_ui_tick();
        }
        assert!(game.message.is_none());
    }

    #[test]
    fn conflicting_entry_is_flagged() {
        let mut game = Game::new();
        game.start_new_game();

        // Duplicate some given's value within its row on an open cell
        'outer: for r in 0..9 {
            for c in 0..9 {
                if game.session.is_given(r, c) {
                    let val = game.session.working(r, c);
                    if let Some(cc) = (0..9).find(|&cc| !game.session.is_given(r, cc)) {
                        game.selected_row = r;
                        game.selected_col = cc;
                        game.place_number(val);
                        assert!(game.conflicts.contains(&(r, c)));
                        assert!(game.conflicts.contains(&(r, cc)));
                        break 'outer;
                    }
                }
            }
        }
    }
}
