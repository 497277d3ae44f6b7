//! vl-quiz: the knowledge-check side of the lab.
//!
//! A built-in pool of multiple-choice questions, randomly drawn rounds with
//! scoring, and a mistake book persisted as a JSON file so missed questions
//! survive across sessions until the learner resolves them.

pub mod error;
pub mod mistakes;
pub mod pool;
pub mod round;

pub use error::{QuizError, QuizResult};
pub use mistakes::{MistakeBook, MistakeEntry, MistakeStore};
pub use pool::{builtin_pool, Question};
pub use round::{AnswerOutcome, QuizRound, RoundSummary, DEFAULT_ROUND_SIZE};
