//! Text renderings of catalog data for tool responses.

use crate::dataset::DirectiveRecord;
use crate::highlight::TokenTable;
use crate::highlight::theme::Theme;
use crate::index::{Format, ResolvedDirective, syntax};
use crate::listing::ModuleListing;
use std::fmt::Write as _;

/// One syntax form as it appears in a config file: `name syntax;`.
pub fn syntax_line(name: &str, form: &str) -> String {
    if form.is_empty() {
        format!("`{};`", name)
    } else {
        format!("`{}` {}`;`", name, form)
    }
}

/// Markdown detail view of one directive.
pub fn format_directive(record: &DirectiveRecord, format: Format) -> String {
    let mut output = format!("## `{}`\n\nModule: `{}`\n\n", record.name, record.module);

    output.push_str("**Syntax:**\n");
    for form in syntax(record, format) {
        let _ = writeln!(output, "- {}", syntax_line(&record.name, form));
    }

    if let Some(default) = &record.default_value {
        let _ = writeln!(output, "\n**Default:** `{}`", default);
    }

    if !record.contexts.is_empty() {
        let contexts: Vec<String> = record.contexts.iter().map(|c| format!("`{}`", c)).collect();
        let _ = writeln!(output, "\n**Contexts:** {}", contexts.join(", "));
    }

    if record.is_block {
        output.push_str("\nOpens a block.\n");
    }

    let description = crate::index::description(record, format);
    if !description.is_empty() {
        output.push('\n');
        output.push_str(description.trim_end());
        output.push('\n');
    }

    output
}

/// One line per directive: `module::name` followed by its first syntax form.
pub fn format_directive_list(directives: &[ResolvedDirective]) -> String {
    let mut output = String::new();
    for directive in directives {
        let _ = write!(output, "{}::{}", directive.module, directive.name);
        if let Some(form) = directive.syntax.first() {
            let _ = write!(output, " {}", form);
        }
        output.push('\n');
    }
    output
}

/// Module tree with per-module counts.
pub fn format_listing(listing: &ModuleListing) -> String {
    if listing.is_empty() {
        return "No matches found\n".to_string();
    }

    let mut output = String::new();
    for module in listing.modules() {
        let _ = writeln!(output, "{} ({})", module.name, module.count());
        for directive in &module.directives {
            let _ = writeln!(output, "  {}", directive);
        }
    }
    output
}

/// Highlighter rule table, one `[/pattern/, "label"],` entry per line.
pub fn format_token_rules(table: &TokenTable) -> String {
    let mut output = String::new();
    for (pattern, label) in table.pairs() {
        let _ = writeln!(output, "[/{}/, \"{}\"],", pattern, label);
    }
    output
}

/// Theme rules, one `label: colour style` per line.
pub fn format_theme(theme: &Theme) -> String {
    let mut output = format!("base: {}\n", theme.base);
    for rule in &theme.rules {
        let _ = writeln!(
            output,
            "{}: {} {}",
            rule.token, rule.foreground, rule.font_style
        );
    }
    output
}
