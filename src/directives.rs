//! Recognisers for the MyST constructs the reader turns into special nodes.
//!
//! Only the surface syntax lives here. Building nodes is the reader's job.

/// Role name introducing an abstract-aware cross-reference.
pub const LINK_ROLE: &str = "link";

#[derive(Debug, PartialEq, Eq)]
/// Fenced-block directive named in a code fence's info string.
pub enum Directive<'a> {
    /// `{abstract}`: the body is a summary of the enclosing section.
    Abstract,
    /// `{rubric} Heading`: a non-nesting heading.
    Rubric(&'a str),
    /// Any other `{name}` directive; rendered as a literal block.
    Other(&'a str),
}

#[must_use]
/// Parse a `(label)=` target line.
pub fn target_label(line: &str) -> Option<&str> {
    let label = line.trim().strip_prefix('(')?.strip_suffix(")=")?;
    if label.is_empty() || label.contains(char::is_whitespace) {
        None
    } else {
        Some(label)
    }
}

#[must_use]
/// Parse a fence info string such as `{rubric} Further reading`.
pub fn directive(info: &str) -> Option<Directive<'_>> {
    let (name, args) = role_name(info.trim_start())?;
    Some(match name {
        "abstract" => Directive::Abstract,
        "rubric" => Directive::Rubric(args.trim()),
        other => Directive::Other(other),
    })
}

#[must_use]
/// Whether the text preceding a code span ends with the `{link}` role marker.
///
/// Returns the text with the marker removed.
pub fn strip_link_role(preceding: &str) -> Option<&str> {
    let head = preceding.strip_suffix('}')?;
    let head = head.strip_suffix(LINK_ROLE)?;
    head.strip_suffix('{')
}

fn role_name(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('{')?;
    let end = rest.find('}')?;
    let name = &rest[..end];
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((name, &rest[end + 1..]))
}

#[cfg(test)]
#[path = "tests/directives.rs"]
mod tests;
