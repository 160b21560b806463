//! # Note Text Format and Parsing
//!
//! Notes are plain text. One file may hold several notes, each introduced by a
//! heading and fenced by delimiter lines:
//!
//! ```text
//! # <heading-name>
//! ====================
//! :<description>
//!
//! <body lines...>
//!
//! <Sub heading>:
//! :<sub-heading description>
//!
//! {textwidth:60}
//! {tag1} {tag2}
//! ====================
//! ```
//!
//! ## Blocks
//!
//! A block is everything from the opening delimiter through the closing
//! delimiter, inclusive. Offsets inside a block (sub-heading spans) count from
//! the opening delimiter at offset 0, and a block's `length` is its line count.
//! A block whose closing delimiter is missing runs to the end of the input.
//!
//! ## Markup
//!
//! | Line | Meaning |
//! |------|---------|
//! | `# name` followed by a delimiter | starts a block |
//! | `:text` (first one) | block description |
//! | `{a} {b, c}` | tags |
//! | `{key:value}` | directive, never a tag |
//! | `Title:` followed by `:text` | sub-heading |
//! | `>text` | moving line, dropped before parsing |

use crate::model::SubHeading;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of transient "moving" lines.
pub const MOVING_MARKER: char = '>';

const HEADING_PREFIX: &str = "# ";
const DELIMITER_MIN_LEN: usize = 3;
const UNTITLED: &str = "untitled";

static TAG_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:\{[^{}]*\}\s*)+$").unwrap());
static BRACE_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());
static DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_][\w-]*)\s*:\s*(.*?)\s*$").unwrap());
static TAG_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]+").unwrap());

/// One note block found in raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock {
    /// Heading text as written, without the `# ` prefix.
    pub heading: String,
    /// Block lines, opening delimiter through closing delimiter.
    pub lines: Vec<String>,
}

impl ParsedBlock {
    pub fn length(&self) -> usize {
        self.lines.len()
    }

    pub fn description(&self) -> String {
        note_description(&self.lines)
    }

    pub fn tags(&self) -> IndexSet<String> {
        note_tags(&self.lines)
    }

    pub fn directives(&self) -> Vec<(String, String)> {
        note_directives(&self.lines)
    }

    pub fn sub_headings(&self) -> Vec<SubHeading> {
        sub_headings(&self.lines)
    }

    pub fn content(&self) -> Vec<String> {
        body_content(&self.lines)
    }
}

/// Drops every moving line. Idempotent.
pub fn remove_moving_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.starts_with(MOVING_MARKER))
        .map(str::to_string)
        .collect()
}

pub fn is_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= DELIMITER_MIN_LEN && trimmed.chars().all(|c| c == '=')
}

fn heading_text(line: &str) -> Option<&str> {
    line.trim_start()
        .strip_prefix(HEADING_PREFIX)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn is_tag_line(line: &str) -> bool {
    TAG_LINE.is_match(line)
}

/// Splits raw text into blocks, in document order.
pub fn parse_blocks<S: AsRef<str>>(lines: &[S]) -> Vec<ParsedBlock> {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let heading = match heading_text(lines[i]) {
            Some(heading) if lines.get(i + 1).is_some_and(|l| is_delimiter(l)) => heading,
            _ => {
                i += 1;
                continue;
            }
        };

        let open = i + 1;
        let close = (open + 1..lines.len()).find(|&j| is_delimiter(lines[j]));
        let end = close.map(|j| j + 1).unwrap_or(lines.len());

        blocks.push(ParsedBlock {
            heading: heading.to_string(),
            lines: lines[open..end].iter().map(|l| l.to_string()).collect(),
        });
        i = end;
    }

    blocks
}

/// The first `:` line of a block, colon stripped. Empty when there is none.
pub fn note_description<S: AsRef<str>>(block: &[S]) -> String {
    block
        .iter()
        .map(AsRef::as_ref)
        .find_map(|line| line.trim_start().strip_prefix(':'))
        .map(|desc| desc.trim().to_string())
        .unwrap_or_default()
}

/// Tags from every tag line; directive groups are skipped.
pub fn note_tags<S: AsRef<str>>(block: &[S]) -> IndexSet<String> {
    let mut tags = IndexSet::new();
    for line in block.iter().map(AsRef::as_ref).filter(|l| is_tag_line(l)) {
        for group in BRACE_GROUP.captures_iter(line) {
            let inner = &group[1];
            if DIRECTIVE.is_match(inner) {
                continue;
            }
            tags.extend(
                TAG_SEPARATOR
                    .split(inner)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
        }
    }
    tags
}

/// `{key:value}` directives, in the order written.
pub fn note_directives<S: AsRef<str>>(block: &[S]) -> Vec<(String, String)> {
    let mut directives = Vec::new();
    for line in block.iter().map(AsRef::as_ref).filter(|l| is_tag_line(l)) {
        for group in BRACE_GROUP.captures_iter(line) {
            if let Some(caps) = DIRECTIVE.captures(&group[1]) {
                directives.push((caps[1].to_string(), caps[2].to_string()));
            }
        }
    }
    directives
}

pub fn sub_headings<S: AsRef<str>>(block: &[S]) -> Vec<SubHeading> {
    let lines: Vec<&str> = block.iter().map(AsRef::as_ref).collect();
    let closing = match lines.last() {
        Some(last) if lines.len() > 1 && is_delimiter(last) => lines.len() - 1,
        _ => lines.len(),
    };

    let starts: Vec<usize> = (1..closing)
        .filter(|&k| {
            let line = lines[k].trim();
            line.ends_with(':')
                && !line.starts_with(':')
                && !is_tag_line(line)
                && lines
                    .get(k + 1)
                    .is_some_and(|next| next.trim_start().starts_with(':'))
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(closing);
            SubHeading::new(lines[start].trim(), lines[start + 1].trim(), start, end)
        })
        .collect()
}

/// Block lines with the structural markup removed.
pub fn body_content<S: AsRef<str>>(block: &[S]) -> Vec<String> {
    let mut seen_description = false;
    block
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| {
            if is_delimiter(line) || is_tag_line(line) {
                return false;
            }
            if !seen_description && line.trim_start().starts_with(':') {
                seen_description = true;
                return false;
            }
            true
        })
        .map(str::to_string)
        .collect()
}

/// Index of the first heading line that opens a block.
fn block_heading_line(lines: &[&str]) -> Option<usize> {
    (0..lines.len()).find(|&i| {
        heading_text(lines[i]).is_some() && lines.get(i + 1).is_some_and(|l| is_delimiter(l))
    })
}

/// Heading name of the first block in the text. Stray `# ` lines are skipped.
pub fn get_title<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    block_heading_line(&lines)
        .and_then(|i| heading_text(lines[i]))
        .map(str::to_string)
}

/// Turns a heading into a note name usable as an index key and a file stem.
pub fn restrict_title(title: &str) -> String {
    let mut name = String::with_capacity(title.len());
    let mut pending_sep = false;
    for c in title.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            pending_sep = !name.is_empty();
            continue;
        }
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            continue;
        }
        if pending_sep {
            name.push('_');
            pending_sep = false;
        }
        name.push(c);
    }

    if name.is_empty() {
        UNTITLED.to_string()
    } else {
        name
    }
}

/// Rewrites the first block's heading line to `# <name>`. Other lines are kept.
pub fn replace_title<S: AsRef<str>>(lines: &[S], name: &str) -> Vec<String> {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    let target = block_heading_line(&lines);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if Some(i) == target {
                format!("{HEADING_PREFIX}{name}")
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Full note text for a named block.
pub fn render_note<S: AsRef<str>>(name: &str, block: &[S]) -> String {
    let mut text = format!("{HEADING_PREFIX}{name}\n");
    for line in block {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text
}
