use serde::{Deserialize, Serialize};

use crate::schema::{CodeSnippet, ResponseRecord, Subtask};

/// A canned answer body: everything in a [`ResponseRecord`] except the query
/// text, which is attached per resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTemplate {
    pub category: String,
    pub difficulty: String,
    pub subtasks: Vec<Subtask>,
    pub code_snippet: CodeSnippet,
    pub best_practices: Vec<String>,
    pub documentation_link: String,
}

impl ResponseTemplate {
    /// Instantiate the template with the verbatim query text.
    pub fn to_record(&self, query: &str) -> ResponseRecord {
        ResponseRecord {
            query: query.to_string(),
            category: self.category.clone(),
            difficulty: self.difficulty.clone(),
            subtasks: self.subtasks.clone(),
            code_snippet: self.code_snippet.clone(),
            best_practices: self.best_practices.clone(),
            documentation_link: self.documentation_link.clone(),
        }
    }
}

/// A conjunctive keyword rule: every keyword must appear as a contiguous
/// substring of the case-folded query. No word-boundary or stemming logic.
#[derive(Debug, Clone)]
struct MatchRule {
    keywords: Vec<String>,
    template: ResponseTemplate,
}

impl MatchRule {
    fn matches(&self, folded_query: &str) -> bool {
        self.keywords.iter().all(|kw| folded_query.contains(kw.as_str()))
    }
}

/// Ordered, immutable rule registry with a guaranteed fallback.
///
/// Built once at startup and never mutated afterwards. Registration order is
/// a contract: when a query satisfies several rules, the earliest registered
/// rule wins.
pub struct Resolver {
    rules: Vec<MatchRule>,
    fallback: ResponseTemplate,
}

impl Resolver {
    pub fn new(fallback: ResponseTemplate) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Register a rule. Keywords are folded at registration so matching is
    /// case-insensitive on both sides.
    pub fn rule(mut self, keywords: &[&str], template: ResponseTemplate) -> Self {
        self.rules.push(MatchRule {
            keywords: keywords.iter().map(|kw| kw.to_lowercase()).collect(),
            template,
        });
        self
    }

    /// Resolve a query to a structured record.
    ///
    /// Total and deterministic: evaluation walks the rules in registration
    /// order, stops at the first full match, and falls back to the default
    /// template when nothing matches. Case folding is used for matching
    /// only; the output carries the original query text untouched.
    #[allow(dead_code)]
    pub fn resolve(&self, query: &str) -> ResponseRecord {
        self.resolve_matched(query).0
    }

    /// Like [`resolve`](Self::resolve), but also reports whether a rule
    /// matched. `false` means the fallback template was used.
    pub fn resolve_matched(&self, query: &str) -> (ResponseRecord, bool) {
        let folded = query.to_lowercase();
        match self.rules.iter().find(|rule| rule.matches(&folded)) {
            Some(rule) => (rule.template.to_record(query), true),
            None => (self.fallback.to_record(query), false),
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(category: &str) -> ResponseTemplate {
        ResponseTemplate {
            category: category.to_string(),
            difficulty: "Intermediate".to_string(),
            subtasks: vec![Subtask {
                task_name: "step one".to_string(),
                details: None,
            }],
            code_snippet: CodeSnippet::new("text", "code"),
            best_practices: vec!["tip".to_string()],
            documentation_link: String::new(),
        }
    }

    fn resolver() -> Resolver {
        Resolver::new(template("General"))
            .rule(&["teleport", "unity"], template("Unity"))
            .rule(&["multiplayer", "unreal"], template("Unreal"))
    }

    #[test]
    fn test_first_full_match_wins() {
        let record = resolver().resolve("teleport locomotion in unity");
        assert_eq!(record.category, "Unity");
    }

    #[test]
    fn test_all_keywords_required() {
        // "teleport" alone does not satisfy the Unity rule.
        let record = resolver().resolve("teleport locomotion in godot");
        assert_eq!(record.category, "General");
    }

    #[test]
    fn test_case_insensitive_matching() {
        let r = resolver();
        let upper = r.resolve("TELEPORT UNITY");
        let lower = r.resolve("teleport unity");
        assert_eq!(upper.category, lower.category);
        assert_eq!(upper.subtasks, lower.subtasks);
    }

    #[test]
    fn test_registration_order_breaks_overlap() {
        // Both rules are satisfied by the query; the earlier one must win.
        let r = Resolver::new(template("General"))
            .rule(&["unity"], template("First"))
            .rule(&["unity", "teleport"], template("Second"));
        let record = r.resolve("teleport in unity");
        assert_eq!(record.category, "First");
    }

    #[test]
    fn test_substring_not_token_matching() {
        // "unrealistic" contains "unreal"; no word-boundary check is applied.
        let record = resolver().resolve("unrealistic multiplayer latency");
        assert_eq!(record.category, "Unreal");
    }

    #[test]
    fn test_unmatched_query_yields_fallback() {
        let record = resolver().resolve("how do I bake lighting");
        assert_eq!(record.category, "General");
    }

    #[test]
    fn test_deterministic_resolution() {
        let r = resolver();
        assert_eq!(r.resolve("teleport unity"), r.resolve("teleport unity"));
    }

    #[test]
    fn test_query_echoed_verbatim() {
        let input = "  Teleport IN Unity?!  ";
        let record = resolver().resolve(input);
        assert_eq!(record.query, input);
    }
}
