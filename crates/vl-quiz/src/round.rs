//! Quiz rounds: a shuffled handful of questions with scoring.

use crate::error::{QuizError, QuizResult};
use crate::pool::Question;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of questions drawn per round by default.
pub const DEFAULT_ROUND_SIZE: usize = 4;

/// A round in progress. Questions are answered in order; each must be
/// answered exactly once before advancing.
#[derive(Debug, Clone)]
pub struct QuizRound {
    questions: Vec<Question>,
    current: usize,
    score: usize,
    answered_current: bool,
}

/// Outcome of answering the active question.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Index of the right option, for display.
    pub correct_answer: usize,
    pub explanation: String,
    /// The question itself, so misses can be recorded in the mistake book.
    pub question: Question,
}

/// Final card shown when a round completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: usize,
    pub total: usize,
    pub verdict: String,
}

impl QuizRound {
    /// Draw `count` distinct questions from the pool, Fisher-Yates shuffled.
    pub fn draw(pool: &[Question], count: usize, rng: &mut impl Rng) -> QuizResult<Self> {
        if pool.is_empty() {
            return Err(QuizError::EmptyPool);
        }
        if count == 0 {
            return Err(QuizError::EmptyRound);
        }
        let mut questions = pool.to_vec();
        questions.shuffle(rng);
        questions.truncate(count.min(pool.len()));
        Ok(Self {
            questions,
            current: 0,
            score: 0,
            answered_current: false,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 0-based index of the active question.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// The question currently awaiting an answer.
    pub fn current_question(&self) -> Option<&Question> {
        if self.answered_current {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Answer the active question.
    pub fn answer(&mut self, choice: usize) -> QuizResult<AnswerOutcome> {
        let question = self
            .current_question()
            .ok_or(QuizError::NoActiveQuestion)?
            .clone();
        if choice >= question.options.len() {
            return Err(QuizError::ChoiceOutOfRange {
                choice,
                options: question.options.len(),
            });
        }
        self.answered_current = true;
        let correct = choice == question.answer;
        if correct {
            self.score += 1;
        }
        Ok(AnswerOutcome {
            correct,
            correct_answer: question.answer,
            explanation: question.explanation.clone(),
            question,
        })
    }

    /// Move past an answered question. Returns `false` once the round is over.
    pub fn advance(&mut self) -> bool {
        if self.answered_current {
            self.current += 1;
            self.answered_current = false;
        }
        !self.is_finished()
    }

    /// Result card for a finished (or abandoned) round.
    pub fn summary(&self) -> RoundSummary {
        let total = self.questions.len();
        let verdict = if self.score == total {
            "Perfect! You are ready for real electronic circuit design."
        } else if self.score * 2 >= total {
            "Nice work! A few more experiments and you will master this."
        } else {
            "Every miss is a lesson: the mistake book has them saved for review."
        };
        RoundSummary {
            score: self.score,
            total,
            verdict: verdict.to_string(),
        }
    }
}
