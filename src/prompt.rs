//! Tutor request/response wire types and prompt text.
//!
//! Field names match the JSON the chat backend exchanges with the browser.

use serde::{Deserialize, Serialize};

use crate::quiz::QuizQuestion;

/// A chat (or quiz) request from the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub topic: String,
    pub language: String,
    pub model: String,
    pub query: String,
    pub familiarity_level: String,
    pub conversation_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Instructions sent ahead of every chat query.
pub fn system_prompt() -> &'static str {
    "You are an expert Python tutor. Always use UI-friendly markdown formatting.

Instructions:
- Use code blocks with triple backticks and language identifiers (e.g., ```python).
- Use headings (##, ###), bold text (**text**), and italic text (*text*).
- Use numbered or bulleted lists where appropriate.
- Structure responses clearly.

Modes:
- If Conversation Mode is 'Socratic', guide the user with questions and hints.
- If Conversation Mode is 'Informative', provide clear and direct explanations.

Also include:
1. A detailed explanation of the topic.
2. Relevant code examples.
3. Best practices.
4. Common pitfalls to avoid.
"
}

/// The per-query part of the prompt.
pub fn build_user_message(request: &ChatRequest) -> String {
    format!(
        "
Explain the following Python concept:
- Topic: {}
- User Query: {}
- Familiarity Level: {}
- Language: {}
- Conversation Mode: {}
",
        request.topic,
        request.query,
        request.familiarity_level,
        request.language,
        request.conversation_mode
    )
}

/// System prompt followed by the user message, as one string.
pub fn combined_prompt(request: &ChatRequest) -> String {
    format!("{}\n\n{}", system_prompt(), build_user_message(request))
}

/// Instructions sent ahead of a quiz generation request.
pub fn quiz_system_prompt() -> &'static str {
    "You are a Python quiz generator that ALWAYS returns valid JSON.
Your output must be parseable by Python's json.loads() function.
Never include explanatory text outside the JSON structure.
Never use markdown code blocks.
Always ensure the correct_answer field is a number (0-3)."
}

/// Ask for `count` four-option questions on the request's topic.
pub fn build_quiz_prompt(request: &ChatRequest, count: usize) -> String {
    let topic = &request.topic;
    let level = &request.familiarity_level;
    let language = &request.language;
    format!(
        r#"Generate a quiz to test knowledge on the Python topic: {topic}

The quiz should be appropriate for a learner with {level} level of Python familiarity.
Create {count} multiple-choice questions with 4 options each.

For each question, provide:
1. A clear explanation of why the correct answer is right
2. 3-4 specific improvement suggestions in {language} for someone who got it wrong

IMPORTANT FORMATTING INSTRUCTIONS:
- Your response must be VALID JSON that can be parsed with json.loads()
- Do not include any text before or after the JSON
- Do not include markdown formatting like ```json or ```
- Do not include any explanations outside the JSON structure
- The correct_answer field must be a number (0, 1, 2, or 3) representing the index of the correct option

Format your response as a JSON array of objects with the following structure:
[
  {{
    "question": "Question text here",
    "options": ["Option 1", "Option 2", "Option 3", "Option 4"],
    "correct_answer": 0,
    "explanation": "Detailed explanation of why this answer is correct",
    "improvement_suggestions": [
      "Suggestion 1 in {language}",
      "Suggestion 2 in {language}",
      "Suggestion 3 in {language}"
    ]
  }},
  ...
]

Ensure the questions are challenging but appropriate for the {level} level.
The quiz should be in {language} language.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChatRequest {
        ChatRequest {
            topic: "Variables".to_string(),
            language: "Spanish".to_string(),
            model: "gemini-1.5-flash".to_string(),
            query: "What is a variable?".to_string(),
            familiarity_level: "Novice".to_string(),
            conversation_mode: "Socratic".to_string(),
            api_key: None,
        }
    }

    #[test]
    fn test_user_message_carries_request_fields() {
        let msg = build_user_message(&request());
        assert!(msg.contains("- Topic: Variables"));
        assert!(msg.contains("- User Query: What is a variable?"));
        assert!(msg.contains("- Familiarity Level: Novice"));
        assert!(msg.contains("- Language: Spanish"));
        assert!(msg.contains("- Conversation Mode: Socratic"));
    }

    #[test]
    fn test_combined_prompt_order() {
        let prompt = combined_prompt(&request());
        assert!(prompt.starts_with(system_prompt()));
        assert!(prompt.ends_with(&build_user_message(&request())));
    }

    #[test]
    fn test_quiz_prompt() {
        let prompt = build_quiz_prompt(&request(), 5);
        assert!(prompt.contains("Python topic: Variables"));
        assert!(prompt.contains("Create 5 multiple-choice questions"));
        assert!(prompt.contains("The quiz should be in Spanish language."));
        assert!(prompt.contains("\"correct_answer\": 0,"));
    }

    #[test]
    fn test_request_json_omits_missing_key() {
        let json = serde_json::to_value(request()).unwrap();
        assert!(json.get("api_key").is_none());
        assert_eq!(json["familiarity_level"], "Novice");
    }

    #[test]
    fn test_response_error_defaults_to_none() {
        let resp: ChatResponse = serde_json::from_str(r#"{"response": "hi"}"#).unwrap();
        assert_eq!(resp.error, None);
        let quiz: QuizResponse = serde_json::from_str(r#"{"questions": []}"#).unwrap();
        assert!(quiz.questions.is_empty());
    }
}
