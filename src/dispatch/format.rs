//! Positional message formatting.
//!
//! Templates use `{N}` placeholders indexing into the argument list,
//! optionally with a width: `{N,W}` right-aligns, `{N,-W}` left-aligns.
//! `{{` and `}}` are literal braces.
//!
//! Formatting is strict: every placeholder must name an argument and every
//! argument must be referenced at least once.

use std::fmt::{self, Display, Write};

/// Errors raised while applying arguments to a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("placeholder {{{index}}} has no argument ({available} supplied)")]
    MissingArgument { index: usize, available: usize },

    #[error("argument {index} is never referenced by the template")]
    UnusedArgument { index: usize },

    #[error("unbalanced '}}' at byte {position}")]
    UnbalancedBrace { position: usize },

    #[error("malformed placeholder at byte {position}")]
    InvalidPlaceholder { position: usize },
}

/// Largest width `std::fmt` accepts at runtime.
const MAX_WIDTH: usize = u16::MAX as usize;

struct Placeholder {
    index: usize,
    width: Option<isize>,
}

/// Substitute `args` into `template`.
pub fn format_message(template: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut used = vec![false; args.len()];
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }

                let mut body = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    body.push(inner);
                }
                if !closed {
                    return Err(FormatError::InvalidPlaceholder { position: pos });
                }

                let placeholder = parse_placeholder(&body)
                    .ok_or(FormatError::InvalidPlaceholder { position: pos })?;
                let arg = args.get(placeholder.index).ok_or(FormatError::MissingArgument {
                    index: placeholder.index,
                    available: args.len(),
                })?;
                used[placeholder.index] = true;
                write_arg(&mut out, *arg, placeholder.width);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(FormatError::UnbalancedBrace { position: pos });
                }
            }
            other => out.push(other),
        }
    }

    if let Some(index) = used.iter().position(|u| !u) {
        return Err(FormatError::UnusedArgument { index });
    }

    Ok(out)
}

fn parse_placeholder(body: &str) -> Option<Placeholder> {
    let (index, width) = match body.split_once(',') {
        Some((index, width)) => (index, Some(width.trim().parse::<isize>().ok()?)),
        None => (body, None),
    };
    if width.is_some_and(|w: isize| w.unsigned_abs() > MAX_WIDTH) {
        return None;
    }
    let index = index.trim();
    if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(Placeholder {
        index: index.parse().ok()?,
        width,
    })
}

fn write_arg(out: &mut String, arg: &dyn Display, width: Option<isize>) {
    // Writing into a String cannot fail.
    let _ = match width {
        Some(w) if w < 0 => write!(out, "{:<width$}", Arg(arg), width = w.unsigned_abs()),
        Some(w) => write!(out, "{:>width$}", Arg(arg), width = w as usize),
        None => write!(out, "{}", arg),
    };
}

/// Renders the argument first so width padding applies to the whole text.
struct Arg<'a>(&'a dyn Display);

impl Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}
