use serde::{Deserialize, Serialize};

/// A single recommended step in a structured answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub task_name: String,
    /// Optional further explanation; serialized as `null` when absent.
    pub details: Option<String>,
}

impl Subtask {
    pub fn new(task_name: &str, details: &str) -> Self {
        Self {
            task_name: task_name.to_string(),
            details: Some(details.to_string()),
        }
    }

}

/// A language-tagged block of ready-to-paste example code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub language: String,
    pub code: String,
}

impl CodeSnippet {
    pub fn new(language: &str, code: &str) -> Self {
        Self {
            language: language.to_string(),
            code: code.to_string(),
        }
    }
}

/// The structured answer produced for every query.
///
/// Field names are the wire contract: external consumers rely on this exact
/// JSON shape, including `details: null` for detail-less subtasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub query: String,
    pub category: String,
    pub difficulty: String,
    pub subtasks: Vec<Subtask>,
    pub code_snippet: CodeSnippet,
    pub best_practices: Vec<String>,
    pub documentation_link: String,
}
