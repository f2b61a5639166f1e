//! Best-effort parsing of free-form model output.
//!
//! The generation server returns unconstrained text, so every routine here is
//! a heuristic. `parse_batch` tries an ordered list of pure splitting
//! strategies and the first one that yields exactly the expected item count
//! wins; callers detect a count mismatch and fall back to per-item
//! generation. All functions are deterministic: same input, same output.

/// Boilerplate fragments stripped from model responses, matched
/// case-insensitively as substrings of a line.
const UNWANTED_PATTERNS: &[&str] = &[
    "I'm sorry for misunderstanding",
    "I'm sorry for any confusion",
    "as an AI model",
    "as an AI Programming Assistant",
    "designed to assist with computer science",
    "specializing in computer science",
    "Please note",
    "(Note:",
    "(Please note",
    "Enhanced paragraph:",
    "Enhanced paragraphs:",
    "Enhanced text:",
    "Enhanced texts:",
    "Output:",
    "Result:",
];

fn is_unwanted(line: &str) -> bool {
    let lowered = line.to_lowercase();
    UNWANTED_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(&pattern.to_lowercase()))
}

/// Trimmed, non-empty lines with denylisted boilerplate removed.
fn cleaned_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_unwanted(line))
        .collect()
}

/// True when a line opens a numbered item: a leading ASCII digit with a `.`
/// somewhere in the first three characters (`1. foo`, `12. bar`).
fn is_numbered(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_ascii_digit())
        && line.chars().take(3).any(|c| c == '.')
}

/// Group lines into numbered items. A numbered line starts a new item with
/// everything after its first `.`; subsequent unnumbered lines are appended
/// with single spaces. Lines before the first numbered line are dropped.
fn group_numbered(lines: &[&str]) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();

    for line in lines {
        if is_numbered(line) {
            if !current.is_empty() {
                items.push(current.trim().to_string());
            }
            current = line
                .splitn(2, '.')
                .nth(1)
                .map(str::trim)
                .unwrap_or(line)
                .to_string();
        } else if !current.is_empty() {
            current.push(' ');
            current.push_str(line);
        }
    }

    if !current.is_empty() {
        items.push(current.trim().to_string());
    }
    items
}

fn numbered_cleaned(text: &str) -> Vec<String> {
    group_numbered(&cleaned_lines(text))
}

fn numbered_raw(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    group_numbered(&lines)
}

/// Split on blank-line-delimited paragraphs.
fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split everything after a literal `Enhanced:` marker on single newlines.
/// Yields nothing when the marker is absent.
fn split_after_marker(text: &str) -> Vec<String> {
    match text.split_once("Enhanced:") {
        Some((_, rest)) => rest
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Split one batch response into the `expected` discrete items.
///
/// Strategies, in order:
/// 1. numbered-item grouping over denylist-cleaned lines,
/// 2. blank-line paragraph split of the raw response,
/// 3. single-newline split after a literal `Enhanced:` marker,
/// 4. numbered-item grouping over the raw, uncleaned response.
///
/// The first strategy producing exactly `expected` items wins. When none
/// does, the final strategy's output is returned as-is and the caller is
/// responsible for detecting the mismatch.
pub fn parse_batch(raw: &str, expected: usize) -> Vec<String> {
    let raw = raw.trim();

    let strategies: [fn(&str) -> Vec<String>; 4] = [
        numbered_cleaned,
        split_paragraphs,
        split_after_marker,
        numbered_raw,
    ];

    let mut last = Vec::new();
    for strategy in strategies {
        last = strategy(raw);
        if last.len() == expected {
            return last;
        }
    }
    last
}

/// Clean a single-item response: strip surrounding quotes, drop denylisted
/// lines, and join the survivors into one space-separated paragraph.
pub fn clean_single(raw: &str) -> String {
    let trimmed = raw
        .trim()
        .trim_matches('"')
        .trim_matches('\'');

    cleaned_lines(trimmed).join(" ")
}
