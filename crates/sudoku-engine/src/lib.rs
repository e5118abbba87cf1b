pub mod board;
pub mod difficulty;
pub mod puzzle;
pub mod session;
pub mod validation;

pub use board::Grid;
pub use difficulty::Difficulty;
pub use session::{CheckResult, GameSession, GameStatus};
