use std::fmt;

use thiserror::Error;

use crate::schema::ResponseRecord;

/// One field-level schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A resolved record failed the declared shape check.
///
/// Under the builtin catalog this is unreachable: the resolver only emits
/// templates that already satisfy the schema. The check guards template
/// sources added later.
#[derive(Debug, Clone, Error)]
#[error("response record failed schema validation with {} violation(s)", .violations.len())]
pub struct SchemaValidationError {
    pub violations: Vec<Violation>,
}

/// Check field presence, required non-empty strings, and nesting.
///
/// `documentation_link`, the snippet body, and subtask details are allowed
/// to be empty or absent.
pub fn validate(record: &ResponseRecord) -> Result<(), SchemaValidationError> {
    let mut violations = Vec::new();

    require(&mut violations, "query", &record.query);
    require(&mut violations, "category", &record.category);
    require(&mut violations, "difficulty", &record.difficulty);

    if record.subtasks.is_empty() {
        violations.push(Violation::new("subtasks", "at least one subtask is required"));
    }
    for (i, subtask) in record.subtasks.iter().enumerate() {
        if subtask.task_name.trim().is_empty() {
            violations.push(Violation::new(
                &format!("subtasks[{}].task_name", i),
                "required non-empty string",
            ));
        }
    }

    require(
        &mut violations,
        "code_snippet.language",
        &record.code_snippet.language,
    );

    if record.best_practices.is_empty() {
        violations.push(Violation::new(
            "best_practices",
            "at least one entry is required",
        ));
    }
    for (i, practice) in record.best_practices.iter().enumerate() {
        if practice.trim().is_empty() {
            violations.push(Violation::new(
                &format!("best_practices[{}]", i),
                "required non-empty string",
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError { violations })
    }
}

fn require(violations: &mut Vec<Violation>, field: &str, value: &str) {
    if value.trim().is_empty() {
        violations.push(Violation::new(field, "required non-empty string"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CodeSnippet, Subtask};

    fn valid_record() -> ResponseRecord {
        ResponseRecord {
            query: "how do I bake lighting".to_string(),
            category: "General".to_string(),
            difficulty: "N/A".to_string(),
            subtasks: vec![Subtask {
                task_name: "Query not recognized".to_string(),
                details: None,
            }],
            code_snippet: CodeSnippet::new("text", "No code to display."),
            best_practices: vec!["Try a supported query.".to_string()],
            documentation_link: String::new(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(validate(&valid_record()).is_ok());
    }

    #[test]
    fn test_empty_link_and_empty_code_are_allowed() {
        let mut record = valid_record();
        record.documentation_link = String::new();
        record.code_snippet.code = String::new();
        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_collects_every_violation() {
        let mut record = valid_record();
        record.category = String::new();
        record.subtasks.clear();
        record.best_practices = vec!["  ".to_string()];

        let err = validate(&record).unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["category", "subtasks", "best_practices[0]"]);
    }

    #[test]
    fn test_blank_task_name_is_flagged_with_index() {
        let mut record = valid_record();
        record.subtasks.push(Subtask {
            task_name: " ".to_string(),
            details: None,
        });

        let err = validate(&record).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "subtasks[1].task_name");
    }
}
