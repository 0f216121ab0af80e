//! Quiz questions: lenient parsing of model output and a scoring session.
//!
//! Models are asked for a bare JSON array but often wrap it in a fence or
//! surround it with prose, give `correct_answer` as a string, or leave out
//! fields. [`parse_quiz`] repairs what it can and drops what it cannot.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use tutor_render_config::QuizConfig;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    pub explanation: String,
    pub improvement_suggestions: Vec<String>,
}

impl QuizQuestion {
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("quiz output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("quiz output contains no usable questions")]
    NoQuestions,

    #[error("only {found} usable questions, at least {required} required")]
    TooFewQuestions { found: usize, required: usize },

    #[error("question {question} does not exist (quiz has {count})")]
    QuestionOutOfRange { question: usize, count: usize },

    #[error("option {answer} does not exist for question {question}")]
    AnswerOutOfRange { question: usize, answer: usize },

    #[error("{remaining} questions are still unanswered")]
    Unanswered { remaining: usize },

    #[error("the quiz has already been submitted")]
    AlreadySubmitted,

    #[error("page {page} does not exist (quiz has {pages})")]
    PageOutOfRange { page: usize, pages: usize },
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Strip a surrounding ```json / ``` fence and any prose around the array.
fn json_candidate(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    let text = text.trim();

    if text.starts_with('[') {
        return text;
    }
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

fn string_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => fallback.to_string(),
        Some(other) => other.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn answer_index(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => Some(s.trim().parse::<i64>().unwrap_or_else(|_| {
            log::warn!("Invalid correct_answer format: {s:?}, defaulting to 0");
            0
        })),
        _ => None,
    }
}

pub fn default_suggestions(topic: &str) -> Vec<String> {
    vec![
        format!("Review the concept of {topic} in more detail."),
        format!("Practice with more examples to better understand {topic}."),
        format!("Consider reviewing the documentation for {topic}."),
    ]
}

fn question_from_value(item: &Value, topic: &str) -> Option<QuizQuestion> {
    let Value::Object(obj) = item else {
        log::warn!("Skipping quiz entry that is not an object");
        return None;
    };

    let options = string_list(obj.get("options"));
    if options.is_empty() {
        log::warn!("Skipping quiz question with no options");
        return None;
    }

    let correct_answer = match answer_index(obj.get("correct_answer")) {
        Some(i) if i >= 0 && (i as usize) < options.len() => i as usize,
        other => {
            log::warn!("Invalid correct_answer {other:?}, defaulting to 0");
            0
        }
    };

    let mut improvement_suggestions = string_list(obj.get("improvement_suggestions"));
    if improvement_suggestions.is_empty() {
        improvement_suggestions = default_suggestions(topic);
    }

    Some(QuizQuestion {
        question: string_or(obj.get("question"), "Question text not provided"),
        options,
        correct_answer,
        explanation: string_or(obj.get("explanation"), "Explanation not provided"),
        improvement_suggestions,
    })
}

/// Parse model quiz output into at most `max_questions` questions.
///
/// Fails when the JSON is unreadable or fewer than `min_questions` usable
/// questions remain after repair.
pub fn parse_quiz(
    raw: &str,
    topic: &str,
    config: &QuizConfig,
) -> Result<Vec<QuizQuestion>, QuizError> {
    let candidate = json_candidate(raw);
    crate::debug_trace!("QUIZ", "parsing candidate: {:.100}", candidate);

    let value: Value = serde_json::from_str(candidate)?;
    let Value::Array(items) = value else {
        return Err(QuizError::NoQuestions);
    };

    let mut questions: Vec<QuizQuestion> = items
        .iter()
        .filter_map(|item| question_from_value(item, topic))
        .collect();

    if questions.is_empty() {
        return Err(QuizError::NoQuestions);
    }
    if questions.len() < config.min_questions {
        return Err(QuizError::TooFewQuestions {
            found: questions.len(),
            required: config.min_questions,
        });
    }
    questions.truncate(config.max_questions);
    log::info!("Parsed {} quiz questions for topic {topic:?}", questions.len());
    Ok(questions)
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Feedback band for a submitted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreVerdict {
    /// Every answer correct.
    Perfect,
    /// More than 70% correct.
    OnTrack,
    KeepPracticing,
}

impl ScoreVerdict {
    pub fn for_score(score: usize, total: usize) -> Self {
        if score == total {
            Self::Perfect
        } else if score as f64 > total as f64 * 0.7 {
            Self::OnTrack
        } else {
            Self::KeepPracticing
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Perfect => "Excellent work! You've mastered all the concepts.",
            Self::OnTrack => "Good job! You're on the right track.",
            Self::KeepPracticing => "Keep practicing! You'll improve with more study.",
        }
    }
}

/// Answers, score, expanded explanations and the current page of one quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<usize>>,
    expanded: Vec<bool>,
    score: Option<usize>,
    per_page: usize,
    /// 1-based.
    page: usize,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>, config: &QuizConfig) -> Self {
        let n = questions.len();
        Self {
            questions,
            answers: vec![None; n],
            expanded: vec![false; n],
            score: None,
            per_page: config.questions_per_page.max(1),
            page: 1,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    fn check_question(&self, question: usize) -> Result<&QuizQuestion, QuizError> {
        self.questions
            .get(question)
            .ok_or(QuizError::QuestionOutOfRange {
                question,
                count: self.questions.len(),
            })
    }

    /// Record (or change) the chosen option for a question.
    pub fn answer(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        if self.score.is_some() {
            return Err(QuizError::AlreadySubmitted);
        }
        if option >= self.check_question(question)?.options.len() {
            return Err(QuizError::AnswerOutOfRange {
                question,
                answer: option,
            });
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// Score the quiz. Every question must be answered first.
    pub fn submit(&mut self) -> Result<usize, QuizError> {
        if self.score.is_some() {
            return Err(QuizError::AlreadySubmitted);
        }
        let remaining = self.answers.iter().filter(|a| a.is_none()).count();
        if remaining > 0 {
            return Err(QuizError::Unanswered { remaining });
        }
        let score = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct_answer))
            .count();
        crate::debug_info!("QUIZ", "submitted: {}/{}", score, self.questions.len());
        self.score = Some(score);
        Ok(score)
    }

    pub fn score(&self) -> Option<usize> {
        self.score
    }

    pub fn verdict(&self) -> Option<ScoreVerdict> {
        self.score
            .map(|s| ScoreVerdict::for_score(s, self.questions.len()))
    }

    pub fn is_submitted(&self) -> bool {
        self.score.is_some()
    }

    /// Clear answers, score and expanded explanations; back to page 1.
    pub fn try_again(&mut self) {
        self.answers.fill(None);
        self.expanded.fill(false);
        self.score = None;
        self.page = 1;
    }

    pub fn toggle_explanation(&mut self, question: usize) -> Result<bool, QuizError> {
        self.check_question(question)?;
        self.expanded[question] = !self.expanded[question];
        Ok(self.expanded[question])
    }

    pub fn is_explanation_expanded(&self, question: usize) -> bool {
        self.expanded.get(question).copied().unwrap_or(false)
    }

    pub fn page_count(&self) -> usize {
        self.questions.len().div_ceil(self.per_page)
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) -> Result<(), QuizError> {
        let pages = self.page_count();
        if page == 0 || page > pages {
            return Err(QuizError::PageOutOfRange { page, pages });
        }
        self.page = page;
        Ok(())
    }

    /// Index of the first question on the current page, and the page's questions.
    pub fn current_questions(&self) -> (usize, &[QuizQuestion]) {
        let start = ((self.page - 1) * self.per_page).min(self.questions.len());
        let end = (start + self.per_page).min(self.questions.len());
        (start, &self.questions[start..end])
    }
}
