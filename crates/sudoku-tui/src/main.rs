mod app;
mod game;
mod ui;

use std::str::FromStr;

use sudoku_engine::Difficulty;

fn main() {
    env_logger::init();

    let mut start_difficulty = None;
    if let Some(arg) = std::env::args().nth(1) {
        match Difficulty::from_str(&arg) {
            Ok(d) => start_difficulty = Some(d),
            Err(e) => {
                eprintln!("{e} (expected easy, medium or hard)");
                std::process::exit(2);
            }
        }
    }

    if let Err(e) = app::run(start_difficulty) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
