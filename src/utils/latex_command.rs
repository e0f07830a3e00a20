//! Heuristic, line-based recognition of LaTeX command usages.
//!
//! There is no grammar here: a line is cut at its comment, searched for a
//! command token, and the first brace-delimited argument after it is taken.

/// Commands that introduce a macro definition
const DEFINITION_COMMANDS: [&str; 7] = [
    r"\def",
    r"\gdef",
    r"\edef",
    r"\xdef",
    r"\newcommand",
    r"\renewcommand",
    r"\providecommand",
];

/// Which lines a search accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFilter {
    /// Uses of the command; its own definition is rejected
    Usages,
    /// Only lines defining the command
    Definitions,
}

/// Cut a line at its first unescaped `%`
pub fn strip_comment(line: &str) -> &str {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' => escaped = !escaped,
            '%' if !escaped => return &line[..i],
            _ => escaped = false,
        }
    }
    line
}

/// Byte offsets just past each occurrence of `command` as a whole control word
fn command_positions(haystack: &str, command: &str) -> Vec<usize> {
    let needs_boundary = command
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphabetic());

    haystack
        .match_indices(command)
        .map(|(i, _)| i + command.len())
        .filter(|&end| {
            !needs_boundary || !haystack[end..].starts_with(|c: char| c.is_ascii_alphabetic())
        })
        .collect()
}

/// Whether `line` defines `command` rather than using it
pub fn is_definition(line: &str, command: &str) -> bool {
    DEFINITION_COMMANDS.iter().any(|definer| {
        [
            format!("{definer}{command}"),
            format!("{definer}*{command}"),
            format!("{definer}{{{command}"),
            format!("{definer}*{{{command}"),
        ]
        .iter()
        .any(|form| !command_positions(line, form).is_empty())
    })
}

/// Extract the argument from the text following a command token.
///
/// Skips the closing brace of `\newcommand{\cmd}` and one optional `[...]`
/// argument, then takes the braced argument, or the bare text up to the
/// first `}` when there is no brace.
pub fn extract_argument(rest: &str) -> Option<String> {
    let mut s = rest.trim_start();

    if let Some(after) = s.strip_prefix('}') {
        s = after.trim_start();
    }
    if s.starts_with('[') {
        let close = s.find(']')?;
        s = s[close + 1..].trim_start();
    }

    let arg = match s.strip_prefix('{') {
        Some(braced) => braced.split('}').next().unwrap_or(braced),
        None => s.split('}').next().unwrap_or(s),
    };

    let arg = arg.trim();
    if arg.is_empty() {
        None
    } else {
        Some(arg.to_string())
    }
}

/// All arguments of `command` on one line, honoring comments and `filter`
pub fn command_arguments(line: &str, command: &str, filter: LineFilter) -> Vec<String> {
    let code = strip_comment(line).trim();
    if code.is_empty() {
        return Vec::new();
    }

    let defines = is_definition(code, command);
    match filter {
        LineFilter::Usages if defines => return Vec::new(),
        LineFilter::Definitions if !defines => return Vec::new(),
        _ => {}
    }

    command_positions(code, command)
        .into_iter()
        .filter_map(|end| {
            let arg = extract_argument(&code[end..]);
            if arg.is_none() {
                tracing::debug!("no argument after {} in line: {}", command, code);
            }
            arg
        })
        .collect()
}
