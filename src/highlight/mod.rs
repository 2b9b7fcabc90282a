//! Directive token classification for syntax highlighting.
//!
//! Every directive falls into exactly one [`TokenClass`] based on whether it is
//! legal in the top-level context and whether it opens a block. Each class is
//! compiled into one line-anchored alternation that an editor highlighter can
//! apply to configuration lines.

pub mod theme;

use crate::dataset::DirectiveRecord;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Context name that marks directives usable outside any block.
pub const DEFAULT_TOP_LEVEL_CONTEXT: &str = "main";

/// Highlighting category of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TokenClass {
    TopLevel,
    TopLevelBlock,
    NestedBlock,
    PlainDirective,
}

impl TokenClass {
    /// Fixed output order of the token table.
    pub const ALL: [Self; 4] = [
        Self::TopLevel,
        Self::TopLevelBlock,
        Self::NestedBlock,
        Self::PlainDirective,
    ];

    /// Highlighter token label. Themes key their style rules on this.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopLevel => "nginx.toplevel",
            Self::TopLevelBlock => "nginx.top.block",
            Self::NestedBlock => "nginx.block",
            Self::PlainDirective => "nginx.directives",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.label() == label)
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Assigns token classes relative to a configurable top-level context.
#[derive(Debug, Clone)]
pub struct Classifier {
    top_level_context: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_LEVEL_CONTEXT)
    }
}

impl Classifier {
    pub fn new(top_level_context: impl Into<String>) -> Self {
        Self {
            top_level_context: top_level_context.into(),
        }
    }

    pub fn top_level_context(&self) -> &str {
        &self.top_level_context
    }

    pub fn classify(&self, record: &DirectiveRecord) -> TokenClass {
        match (record.allowed_in(&self.top_level_context), record.is_block) {
            (true, true) => TokenClass::TopLevelBlock,
            (true, false) => TokenClass::TopLevel,
            (false, true) => TokenClass::NestedBlock,
            (false, false) => TokenClass::PlainDirective,
        }
    }

    /// Group directive names by class. Names shared across modules collapse.
    pub fn partition<'a>(
        &self,
        records: impl IntoIterator<Item = &'a DirectiveRecord>,
    ) -> BTreeMap<TokenClass, BTreeSet<String>> {
        let mut classes: BTreeMap<TokenClass, BTreeSet<String>> = BTreeMap::new();
        for record in records {
            classes
                .entry(self.classify(record))
                .or_default()
                .insert(record.name.clone());
        }
        classes
    }
}

/// One compiled highlighter rule.
#[derive(Debug, Clone)]
pub struct TokenRule {
    pub pattern: Regex,
    pub class: TokenClass,
    /// Sorted directive names behind `pattern`
    pub names: Vec<String>,
}

impl TokenRule {
    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

/// Compiled rules in [`TokenClass::ALL`] order. Classes without names are omitted.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    rules: Vec<TokenRule>,
}

impl TokenTable {
    /// Classify `records` and compile one pattern per non-empty class.
    pub fn build<'a>(
        classifier: &Classifier,
        records: impl IntoIterator<Item = &'a DirectiveRecord>,
    ) -> Result<Self, regex::Error> {
        let mut classes = classifier.partition(records);
        let mut rules = Vec::with_capacity(TokenClass::ALL.len());

        for class in TokenClass::ALL {
            let Some(names) = classes.remove(&class) else {
                tracing::debug!("No directives in token class {}", class);
                continue;
            };
            let names: Vec<String> = names.into_iter().collect();
            let pattern = Regex::new(&alternation(&names))?;
            rules.push(TokenRule {
                pattern,
                class,
                names,
            });
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    pub fn rule(&self, class: TokenClass) -> Option<&TokenRule> {
        self.rules.iter().find(|r| r.class == class)
    }

    /// (pattern, label) pairs in table order.
    pub fn pairs(&self) -> Vec<(&str, &'static str)> {
        self.rules
            .iter()
            .map(|r| (r.pattern.as_str(), r.class.label()))
            .collect()
    }

    /// First class whose pattern matches the line.
    pub fn classify_line(&self, line: &str) -> Option<TokenClass> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(line))
            .map(|rule| rule.class)
    }
}

/// `^\s*(a|b|...)\b` over escaped names. Callers never pass an empty list.
fn alternation(names: &[String]) -> String {
    let escaped: Vec<String> = names.iter().map(|n| regex::escape(n)).collect();
    format!(r"^\s*({})\b", escaped.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn record(name: &str, contexts: &[&str], is_block: bool) -> DirectiveRecord {
        DirectiveRecord {
            name: name.to_string(),
            module: "m".to_string(),
            description_html: String::new(),
            description_markdown: String::new(),
            syntax_html: vec![],
            syntax_markdown: vec![],
            contexts: contexts.iter().map(|c| (*c).to_string()).collect(),
            is_block,
            default_value: None,
        }
    }

    #[rstest]
    #[case(&["main"], true, TokenClass::TopLevelBlock)]
    #[case(&["main", "http"], false, TokenClass::TopLevel)]
    #[case(&["http"], true, TokenClass::NestedBlock)]
    #[case(&["server", "location"], false, TokenClass::PlainDirective)]
    #[case(&[], false, TokenClass::PlainDirective)]
    fn test_classify(#[case] contexts: &[&str], #[case] is_block: bool, #[case] expected: TokenClass) {
        let classifier = Classifier::default();
        check!(classifier.classify(&record("d", contexts, is_block)) == expected);
    }

    #[test]
    fn test_custom_top_level_context() {
        let classifier = Classifier::new("root");
        check!(classifier.classify(&record("d", &["root"], false)) == TokenClass::TopLevel);
        check!(classifier.classify(&record("d", &["main"], false)) == TokenClass::PlainDirective);
    }

    #[test]
    fn test_partition_collapses_shared_names() {
        let records = [
            record("server", &["http"], true),
            record("server", &["stream"], true),
            record("listen", &["server"], false),
        ];
        let classes = Classifier::default().partition(&records);
        check!(classes[&TokenClass::NestedBlock].len() == 1);
        check!(classes[&TokenClass::PlainDirective].len() == 1);
        check!(!classes.contains_key(&TokenClass::TopLevel));
    }

    #[test]
    fn test_table_order_and_empty_classes_omitted() {
        let records = [
            record("listen", &["server"], false),
            record("events", &["main"], true),
        ];
        let table = TokenTable::build(&Classifier::default(), &records).unwrap();
        let labels: Vec<_> = table.pairs().into_iter().map(|(_, label)| label).collect();
        check!(labels == vec!["nginx.top.block", "nginx.directives"]);
        check!(table.rule(TokenClass::TopLevel).is_none());
    }

    #[test]
    fn test_names_sorted_in_pattern() {
        let records = [
            record("root", &["http"], false),
            record("allow", &["http"], false),
            record("deny", &["http"], false),
        ];
        let table = TokenTable::build(&Classifier::default(), &records).unwrap();
        let_assert!(Some(rule) = table.rule(TokenClass::PlainDirective));
        check!(rule.pattern.as_str() == r"^\s*(allow|deny|root)\b");
    }

    #[rstest]
    #[case("allow 10.0.0.0/8;", true)]
    #[case("  allow http;", true)]
    #[case("\tallow all;", true)]
    #[case("foo_allow bar;", false)]
    #[case("allow_list on;", false)]
    #[case("deny allow;", false)]
    #[case("# allow all;", false)]
    fn test_pattern_anchoring(#[case] line: &str, #[case] expected: bool) {
        let records = [record("allow", &["http"], false)];
        let table = TokenTable::build(&Classifier::default(), &records).unwrap();
        check!(table.rules()[0].is_match(line) == expected);
    }

    #[test]
    fn test_prefix_names_in_same_class() {
        let records = [
            record("server", &["server"], false),
            record("server_name", &["server"], false),
        ];
        let table = TokenTable::build(&Classifier::default(), &records).unwrap();
        check!(table.classify_line("    server_name example.com;") == Some(TokenClass::PlainDirective));
        check!(table.classify_line("server_names_hash_size 64;").is_none());
    }

    #[test]
    fn test_classify_line_uses_table_order() {
        let records = [
            record("http", &["main"], true),
            record("worker_processes", &["main"], false),
            record("location", &["server"], true),
        ];
        let table = TokenTable::build(&Classifier::default(), &records).unwrap();
        check!(table.classify_line("http {") == Some(TokenClass::TopLevelBlock));
        check!(table.classify_line("worker_processes auto;") == Some(TokenClass::TopLevel));
        check!(table.classify_line("  location / {") == Some(TokenClass::NestedBlock));
        check!(table.classify_line("}").is_none());
    }

    #[test]
    fn test_empty_input_builds_empty_table() {
        let table = TokenTable::build(&Classifier::default(), std::iter::empty::<&DirectiveRecord>()).unwrap();
        check!(table.rules().is_empty());
        check!(table.classify_line("anything at all").is_none());
    }

    #[test]
    fn test_label_round_trip() {
        for class in TokenClass::ALL {
            check!(TokenClass::from_label(class.label()) == Some(class));
        }
        check!(TokenClass::from_label("nginx.unknown").is_none());
    }
}
