//! Tutoring catalog: the selectable models, languages, chapters, topics,
//! familiarity levels, and conversation modes.
//!
//! Consumed read-only by the selection UI; the renderer never looks at it.

use serde::{Deserialize, Serialize};

/// A syllabus chapter and its ordered topics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Chapter {
    fn new(name: &str, topics: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Model used when a request names none.
    #[serde(default = "default_model")]
    pub default_model: String,

    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    #[serde(default = "default_chapters")]
    pub chapters: Vec<Chapter>,

    #[serde(default = "default_familiarity_levels")]
    pub familiarity_levels: Vec<String>,

    #[serde(default = "default_conversation_modes")]
    pub conversation_modes: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            models: default_models(),
            default_model: default_model(),
            languages: default_languages(),
            chapters: default_chapters(),
            familiarity_levels: default_familiarity_levels(),
            conversation_modes: default_conversation_modes(),
        }
    }
}

impl Catalog {
    /// All topics across all chapters, in syllabus order.
    pub fn topics(&self) -> Vec<&str> {
        self.chapters
            .iter()
            .flat_map(|c| c.topics.iter().map(String::as_str))
            .collect()
    }

    /// Topics of one chapter, or `None` when the chapter is unknown.
    pub fn topics_for(&self, chapter: &str) -> Option<&[String]> {
        self.chapters
            .iter()
            .find(|c| c.name == chapter)
            .map(|c| c.topics.as_slice())
    }

    /// The chapter a topic belongs to.
    pub fn chapter_of(&self, topic: &str) -> Option<&str> {
        self.chapters
            .iter()
            .find(|c| c.topics.iter().any(|t| t == topic))
            .map(|c| c.name.as_str())
    }

    pub fn has_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_models() -> Vec<String> {
    strings(&[
        "gemini-2.0-flash",
        "gemini-1.5-flash",
        "gemini-1.5-pro",
        "gemini-1.0-pro",
    ])
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_languages() -> Vec<String> {
    strings(&["English", "Hindi", "Spanish", "French", "German", "Bengali"])
}

fn default_familiarity_levels() -> Vec<String> {
    strings(&[
        "Novice",
        "Advanced Beginner",
        "Competent",
        "Proficient",
        "Expert",
    ])
}

fn default_conversation_modes() -> Vec<String> {
    strings(&["Informative", "Socratic"])
}

fn default_chapters() -> Vec<Chapter> {
    vec![
        Chapter::new(
            "Familiarization with the basics of Python programming",
            &[
                "Introduction to Python",
                "Features of Python",
                "Executing a simple 'hello world' program",
                "Execution modes; interactive mode and script mode",
                "Python character set",
                "Python tokens (keyword, identifier, literal, operator, punctuator)",
                "Variables",
                "Concept of L-value and R-value",
                "Use of comments",
            ],
        ),
        Chapter::new(
            "Knowledge of data types",
            &[
                "Number (integer, floating point, complex)",
                "Boolean",
                "Sequence (string, list, tuple)",
                "None",
                "Mapping (dictionary)",
                "mutable and immutable data types",
            ],
        ),
        Chapter::new(
            "Operators",
            &[
                "Arithmetic operators",
                "Relational operators",
                "Bitwise operators",
                "Logical operators",
                "Assignment operators",
                "Augmented assignment operators",
                "Identity operators (is, is not)",
                "Membership operators (in, not in)",
            ],
        ),
        Chapter::new(
            "Expressions, statement, type conversion and input/output",
            &[
                "Precedence of operators",
                "Expression",
                "Evaluation of an expression",
                "Type-conversion (explicit and implicit conversion)",
                "Accepting data as input from the console and displaying output",
            ],
        ),
        Chapter::new(
            "Errors",
            &["Syntax errors", "Logical errors", "Run-time errors"],
        ),
        Chapter::new(
            "Flow of Control",
            &[
                "Introduction to flow of control",
                "Use of indentation in control flow",
                "Sequential flow in control flow",
                "Conditional and iterative flow",
            ],
        ),
        Chapter::new(
            "Conditional statements",
            &[
                "if-statement",
                "if-else statement",
                "if-elif-else statement",
                "Nested if-else statement",
            ],
        ),
        Chapter::new(
            "Iterative Statement",
            &[
                "while loop",
                "for loop",
                "range() function",
                "break statement",
                "continue statement",
                "pass statement",
                "nested loops",
            ],
        ),
        Chapter::new(
            "Strings",
            &[
                "Introduction to strings",
                "String literals",
                "String operations",
                "String methods",
                "String formatting",
                "Traversing a string using loops",
                "Built in functions/methods for strings",
            ],
        ),
        Chapter::new(
            "Lists",
            &[
                "Introduction to lists",
                "List literals",
                "List operations (concatenation, repetition, membership and slicing)",
                "List methods",
                "List comprehensions",
                "Traversing a list using loops",
                "Built in functions/methods for lists",
            ],
        ),
        Chapter::new(
            "Introduction to Python modules",
            &[
                "Introduction to modules",
                "Importing modules",
                "Built-in modules",
                "User-defined modules",
                "Importing math module",
                "Statistics module (mean(), median(), mode())",
            ],
        ),
        Chapter::new(
            "Functions",
            &[
                "Introduction to functions",
                "Types of function (built-in functions, functions defined in module, user defined functions)",
                "Creating user defined function",
                "Arguments and parameters",
                "Default parameters",
                "Positional parameters",
                "Function returning value(s)",
                "Flow of execution",
                "Scope of a variable (global scope, local scope)",
            ],
        ),
    ]
}
