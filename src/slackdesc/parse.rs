// src/slackdesc/parse.rs

//! slack-desc parser
//!
//! Recovers the summary and description from an existing `install/slack-desc`.
//! Only lines tagged with the package name carry data; comments, the ruler and
//! anything else are ignored. Parsing never fails: missing or unusable input
//! falls back to [`FALLBACK_SUMMARY`].

use tracing::debug;

/// Summary used when a package carries no usable description
pub const FALLBACK_SUMMARY: &str = "Converted package";

/// Summary and description recovered from a slack-desc
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDesc {
    pub summary: String,
    pub description: String,
}

impl ParsedDesc {
    fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            description: FALLBACK_SUMMARY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectSummary,
    InDescription,
}

/// How a single physical line relates to the package tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    /// `name: name (text)`; `content` is everything after `name: `
    Summary { text: &'a str, content: &'a str },
    /// `name: text`
    Content(&'a str),
    /// `name:`
    Blank,
    /// Anything not tagged with the package name
    Untagged,
}

fn classify<'a>(line: &'a str, name: &str) -> LineKind<'a> {
    let Some(rest) = line.strip_prefix(name).and_then(|r| r.strip_prefix(':')) else {
        return LineKind::Untagged;
    };

    if rest.is_empty() {
        return LineKind::Blank;
    }

    let Some(content) = rest.strip_prefix(' ') else {
        return LineKind::Untagged;
    };

    let summary = content
        .strip_prefix(name)
        .and_then(|r| r.strip_prefix(" ("))
        .and_then(|r| r.strip_suffix(')'));

    match summary {
        Some(text) => LineKind::Summary { text, content },
        None => LineKind::Content(content),
    }
}

/// Parse a slack-desc body for package `name`
pub fn parse(raw: Option<&str>, name: &str) -> ParsedDesc {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        debug!("No slack-desc for {}, using fallback summary", name);
        return ParsedDesc::fallback();
    };

    let mut state = State::ExpectSummary;
    let mut summary: Option<String> = None;
    let mut lines: Vec<&str> = Vec::new();

    for line in raw.lines() {
        let line = line.trim_end();
        let kind = classify(line, name);

        match (state, kind) {
            (_, LineKind::Untagged) => continue,
            (State::ExpectSummary, LineKind::Summary { text, .. }) => {
                summary = Some(text.to_string());
            }
            // A summary-shaped line after the first tagged line is content.
            (State::InDescription, LineKind::Summary { content, .. })
            | (_, LineKind::Content(content)) => lines.push(content),
            (_, LineKind::Blank) => lines.push(""),
        }
        state = State::InDescription;
    }

    while lines.first() == Some(&"") {
        lines.remove(0);
    }
    while lines.last() == Some(&"") {
        lines.pop();
    }

    let summary = summary.unwrap_or_else(|| FALLBACK_SUMMARY.to_string());
    let description = if lines.is_empty() {
        summary.clone()
    } else {
        lines.join("\n")
    };

    debug!(
        "Parsed slack-desc for {}: {} description lines",
        name,
        lines.len()
    );

    ParsedDesc {
        summary,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slackdesc::SlackDesc;

    const STOCK: &str = "\
# HOW TO EDIT THIS FILE:
# The \"handy ruler\" below makes it easier to edit a package description.

   |-----handy-ruler------------------------------------------------------|
ply: ply (Light-weight dynamic tracer for Linux)
ply:
ply: ply dynamically instruments the running kernel to aggregate and
ply: extract user-defined data.
ply:
ply: Inspired by awk and dtrace.
ply:
ply:
ply:
ply:
ply:
";

    #[test]
    fn test_absent_or_blank_input_falls_back() {
        for raw in [None, Some(""), Some("  \n\t\n")] {
            let parsed = parse(raw, "foo");
            assert_eq!(parsed.summary, FALLBACK_SUMMARY);
            assert_eq!(parsed.description, FALLBACK_SUMMARY);
        }
    }

    #[test]
    fn test_stock_file() {
        let parsed = parse(Some(STOCK), "ply");
        assert_eq!(parsed.summary, "Light-weight dynamic tracer for Linux");
        assert_eq!(
            parsed.description,
            "ply dynamically instruments the running kernel to aggregate and\n\
             extract user-defined data.\n\
             \n\
             Inspired by awk and dtrace."
        );
    }

    #[test]
    fn test_first_tagged_line_without_summary_is_description() {
        let raw = "foo: just a description\nfoo: continued\n";
        let parsed = parse(Some(raw), "foo");
        assert_eq!(parsed.summary, FALLBACK_SUMMARY);
        assert_eq!(parsed.description, "just a description\ncontinued");
    }

    #[test]
    fn test_untagged_lines_dropped() {
        let raw = "foo: foo (sum)\nfoo:\nfoo: kept\nbar: other package\nstray text\nfoo:bad\nfoo: also kept\n";
        let parsed = parse(Some(raw), "foo");
        assert_eq!(parsed.summary, "sum");
        assert_eq!(parsed.description, "kept\nalso kept");
    }

    #[test]
    fn test_summary_only_copies_summary_into_description() {
        let raw = "foo: foo (only a summary)\nfoo:\nfoo:\n";
        let parsed = parse(Some(raw), "foo");
        assert_eq!(parsed.summary, "only a summary");
        assert_eq!(parsed.description, "only a summary");
    }

    #[test]
    fn test_nothing_tagged_falls_back() {
        let parsed = parse(Some("# comment only\n\n"), "foo");
        assert_eq!(parsed, ParsedDesc::fallback());
    }

    #[test]
    fn test_trailing_space_on_blank_tag_is_a_break() {
        let raw = "foo: foo (s)\nfoo: \nfoo: a\nfoo:   \nfoo: b\n";
        let parsed = parse(Some(raw), "foo");
        assert_eq!(parsed.description, "a\n\nb");
    }

    #[test]
    fn test_later_summary_shaped_line_is_content() {
        let raw = "foo: foo (s)\nfoo: foo (not a summary)\n";
        let parsed = parse(Some(raw), "foo");
        assert_eq!(parsed.summary, "s");
        assert_eq!(parsed.description, "foo (not a summary)");
    }

    #[test]
    fn test_name_prefix_of_other_name_not_matched() {
        let raw = "foobar: foobar (x)\nfoobar: y\n";
        let parsed = parse(Some(raw), "foo");
        assert_eq!(parsed, ParsedDesc::fallback());
    }

    #[test]
    fn test_round_trip_is_stable() {
        let layout = SlackDesc::default();
        let description = "ply dynamically instruments the running kernel to aggregate and\n\
extract user-defined data. It compiles an input program to one or more\n\
Linux bpf programs and attaches them to the kernel.\n\n\
The language is inspired by awk and dtrace.";

        let first = layout
            .render("ply", "Light-weight dynamic tracer for Linux", description)
            .unwrap();
        let parsed = parse(Some(&first), "ply");
        let second = layout
            .render("ply", &parsed.summary, &parsed.description)
            .unwrap();

        assert_eq!(parsed.summary, "Light-weight dynamic tracer for Linux");
        assert_eq!(first, second);
    }
}
