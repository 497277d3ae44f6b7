use thiserror::Error;

pub type QuizResult<T> = Result<T, QuizError>;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Cannot draw a round from an empty pool")]
    EmptyPool,

    #[error("Round size must be at least 1")]
    EmptyRound,

    #[error("Choice {choice} is out of range (question has {options} options)")]
    ChoiceOutOfRange { choice: usize, options: usize },

    #[error("No active question (round finished or already answered)")]
    NoActiveQuestion,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mistake book is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
