// src/slackdesc/layout.rs

//! slack-desc layout engine
//!
//! Renders a package summary and description into the fixed layout that
//! Slackware's pkgtools expect in `install/slack-desc`:
//!
//! ```text
//! # HOW TO EDIT THIS FILE:
//! # ...
//!
//!    |-----handy-ruler------------------------------------------------------|
//! ply: ply (Light-weight dynamic tracer for Linux)
//! ply:
//! ply: ply dynamically instruments the running kernel to aggregate and
//! ...                                        (9 description lines in total)
//! ```
//!
//! Every tagged line fits under the ruler. Text that does not fit in the
//! line budget is dropped, and short text is padded with bare `name:` lines,
//! so the block always has the same number of lines.

use crate::error::{Error, Result};

/// Width of the ruler and of every tagged line, not counting the name
pub const BASE_WIDTH: usize = 72;

/// Number of description lines below the summary and separator
pub const DESCRIPTION_LINES: usize = 9;

/// Floor for the per-line content budget
pub const MIN_CONTENT_WIDTH: usize = 10;

const RULER_TOKEN: &str = "|-----handy-ruler--";

/// Layout tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlackDesc {
    /// Ruler width excluding the package name
    pub base_width: usize,
    /// Lines in the description section
    pub description_lines: usize,
}

impl Default for SlackDesc {
    fn default() -> Self {
        Self {
            base_width: BASE_WIDTH,
            description_lines: DESCRIPTION_LINES,
        }
    }
}

/// One piece of preprocessed description text
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    /// Running text; soft line breaks already folded into spaces
    Text(String),
    /// Paragraph boundary, rendered as a bare tag line
    Break,
}

impl SlackDesc {
    pub fn new(base_width: usize, description_lines: usize) -> Self {
        Self {
            base_width,
            description_lines,
        }
    }

    /// Total width of the ruler line for `name`
    pub fn screen_width(&self, name: &str) -> usize {
        self.base_width + char_len(name)
    }

    /// Characters allowed after the `name: ` prefix
    pub fn max_content_len(&self, name: &str) -> usize {
        let prefix = char_len(name) + 2;
        self.screen_width(name)
            .saturating_sub(prefix)
            .max(MIN_CONTENT_WIDTH)
    }

    /// Render the complete slack-desc file
    ///
    /// The summary is cut at its first line break. Fails only when `name`
    /// cannot serve as a line tag.
    pub fn render(&self, name: &str, summary: &str, description: &str) -> Result<String> {
        validate_name(name)?;

        let summary = summary.lines().next().unwrap_or("");
        let summary_text = format!("{} ({})", name, summary);

        let mut lines = self.header(name);
        lines.extend(self.render_section(name, &summary_text, 1));
        lines.extend(self.render_section(name, "", 1));
        lines.extend(self.render_section(name, description, self.description_lines));

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    /// Comment block plus ruler line
    pub fn header(&self, name: &str) -> Vec<String> {
        let mut lines: Vec<String> = header_comment(self.description_lines + 2)
            .into_iter()
            .collect();
        lines.push(String::new());
        lines.push(self.ruler(name));
        lines
    }

    /// The handy ruler, with its right edge at column `screen_width`
    pub fn ruler(&self, name: &str) -> String {
        let indent = char_len(name);
        let fill = self
            .screen_width(name)
            .saturating_sub(1)
            .saturating_sub(indent + RULER_TOKEN.len());

        let mut ruler = " ".repeat(indent);
        ruler.push_str(RULER_TOKEN);
        ruler.push_str(&"-".repeat(fill));
        ruler.push('|');
        ruler
    }

    /// Wrap `text` into exactly `target` lines tagged with `name`
    pub fn render_section(&self, name: &str, text: &str, target: usize) -> Vec<String> {
        let max_len = self.max_content_len(name);
        let mut section = Section::new(name, target);

        for block in split_blocks(text) {
            if section.is_full() {
                break;
            }
            match block {
                Block::Break => section.bare(),
                Block::Text(paragraph) => section.wrap(&paragraph, max_len),
            }
        }

        section.finish()
    }
}

/// Line accumulator that stops accepting lines once the budget is met
struct Section<'a> {
    name: &'a str,
    target: usize,
    lines: Vec<String>,
}

impl<'a> Section<'a> {
    fn new(name: &'a str, target: usize) -> Self {
        Self {
            name,
            target,
            lines: Vec::with_capacity(target),
        }
    }

    fn is_full(&self) -> bool {
        self.lines.len() >= self.target
    }

    fn bare(&mut self) {
        if !self.is_full() {
            self.lines.push(format!("{}:", self.name));
        }
    }

    fn emit(&mut self, content: &str) {
        if !self.is_full() {
            self.lines.push(format!("{}: {}", self.name, content));
        }
    }

    /// Greedy word packing of one paragraph
    fn wrap(&mut self, paragraph: &str, max_len: usize) {
        let mut buffer = String::new();
        let mut buffer_len = 0;

        for word in paragraph.split_ascii_whitespace() {
            if self.is_full() {
                return;
            }

            let word_len = char_len(word);
            if word_len > max_len {
                if !buffer.is_empty() {
                    self.emit(&buffer);
                    buffer.clear();
                    buffer_len = 0;
                }
                let cut: String = word.chars().take(max_len).collect();
                self.emit(&cut);
                continue;
            }

            if buffer.is_empty() {
                buffer.push_str(word);
                buffer_len = word_len;
            } else if buffer_len + 1 + word_len <= max_len {
                buffer.push(' ');
                buffer.push_str(word);
                buffer_len += 1 + word_len;
            } else {
                self.emit(&buffer);
                buffer.clear();
                buffer.push_str(word);
                buffer_len = word_len;
            }
        }

        if !buffer.is_empty() {
            self.emit(&buffer);
        }
    }

    fn finish(mut self) -> Vec<String> {
        while !self.is_full() {
            self.bare();
        }
        self.lines
    }
}

/// Split description text into paragraphs and paragraph breaks
///
/// A run of two or more newlines is one break; a single newline is a space.
/// Whitespace-only paragraphs are dropped.
fn split_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut rest = text;

    loop {
        match find_break(rest) {
            Some((start, end)) => {
                push_text(&mut blocks, &rest[..start]);
                blocks.push(Block::Break);
                rest = &rest[end..];
            }
            None => {
                push_text(&mut blocks, rest);
                return blocks;
            }
        }
    }
}

fn push_text(blocks: &mut Vec<Block>, paragraph: &str) {
    if paragraph.trim().is_empty() {
        return;
    }
    blocks.push(Block::Text(paragraph.replace('\n', " ")));
}

/// Byte range of the first run of 2+ newlines
fn find_break(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\n' {
            let start = i;
            while i < bytes.len() && bytes[i] == b'\n' {
                i += 1;
            }
            if i - start >= 2 {
                return Some((start, i));
            }
        } else {
            i += 1;
        }
    }
    None
}

fn header_comment(total_lines: usize) -> [String; 6] {
    [
        "# HOW TO EDIT THIS FILE:".to_string(),
        "# The \"handy ruler\" below makes it easier to edit a package description.  Line"
            .to_string(),
        "# up the first '|' above the ':' following the base package name, and the '|' on"
            .to_string(),
        "# the right side marks the last column you can put a character in.  You must make"
            .to_string(),
        format!(
            "# exactly {} lines for the formatting to be correct.  It's also customary to",
            total_lines
        ),
        "# leave one space after the ':' except on otherwise blank lines.".to_string(),
    ]
}

/// Reject names that would break the `name:` line prefix
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(':') || name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
