//! Internal utility functions.
//!
//! Helpers for argument scanning that do not belong in any single public
//! module.

use std::ffi::OsString;

/// Parse a leading base-10 integer the way `%d` scanning does.
///
/// Leading whitespace and a single sign are accepted, at least one digit is
/// required, and anything after the digits is ignored. Returns `None` when no
/// digits are present or the value does not fit in an `i32`.
pub fn parse_leading_integer(value: &str) -> Option<i32> {
    let trimmed = value.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digit_len = unsigned
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digit_len == 0 {
        return None;
    }

    trimmed[..sign_len + digit_len].parse::<i32>().ok()
}

/// A long option the command line accepts.
#[derive(Debug, Clone, Copy)]
pub struct LongOption {
    pub name: &'static str,
    pub takes_value: bool,
}

/// A single-dash token that prefixes more than one long option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousOption {
    /// Position of the token in the normalized arguments.
    pub index: usize,
    pub token: String,
    pub candidates: Vec<&'static str>,
}

/// Arguments after [`normalize_long_options`].
#[derive(Debug, Default)]
pub struct Normalized {
    pub arguments: Vec<OsString>,
    /// The first ambiguous single-dash token, left as it was.
    pub ambiguous: Option<AmbiguousOption>,
}

/// Rewrite single-dash long options to the double-dash form.
///
/// `-album X` and `-album=X` become `--album X` and `--album=X`; `-desc X`
/// becomes `--description X`. A token is rewritten when its body is a long
/// name or a prefix of exactly one long name. Single letters are short
/// options and stay as they are. Tokens that are the value of the preceding
/// option, and everything after `--`, pass through untouched. The first
/// element (program name) is never rewritten.
pub fn normalize_long_options<I>(
    arguments: I,
    long_options: &[LongOption],
    short_with_value: &[char],
) -> Normalized
where
    I: IntoIterator<Item = OsString>,
{
    let mut arguments = arguments.into_iter();
    let mut normalized = Normalized {
        arguments: arguments.next().into_iter().collect(),
        ambiguous: None,
    };
    let mut expecting_value = false;
    let mut options_done = false;

    for argument in arguments {
        if options_done || expecting_value {
            expecting_value = false;
            normalized.arguments.push(argument);
            continue;
        }

        let Some(text) = argument.to_str() else {
            normalized.arguments.push(argument);
            continue;
        };

        if text == "--" {
            options_done = true;
            normalized.arguments.push(argument);
            continue;
        }

        if let Some(body) = text.strip_prefix("--") {
            let (name, inline_value) = split_inline_value(body);
            if let Resolution::Found(option) = resolve_long(name, long_options) {
                expecting_value = option.takes_value && inline_value.is_none();
            }
            normalized.arguments.push(argument);
            continue;
        }

        let Some(body) = text.strip_prefix('-') else {
            normalized.arguments.push(argument);
            continue;
        };

        let (name, inline_value) = split_inline_value(body);
        if name.chars().count() >= 2 {
            match resolve_long(name, long_options) {
                Resolution::Found(option) => {
                    expecting_value = option.takes_value && inline_value.is_none();
                    let rewritten = match inline_value {
                        Some(value) => format!("--{}={value}", option.name),
                        None => format!("--{}", option.name),
                    };
                    normalized.arguments.push(OsString::from(rewritten));
                    continue;
                }
                Resolution::Ambiguous(candidates) => {
                    if normalized.ambiguous.is_none() {
                        normalized.ambiguous = Some(AmbiguousOption {
                            index: normalized.arguments.len(),
                            token: text.to_string(),
                            candidates,
                        });
                    }
                    normalized.arguments.push(argument);
                    continue;
                }
                Resolution::Missing => {}
            }
        }

        // A lone short flag that takes a value consumes the next token.
        let mut letters = body.chars();
        if let (Some(letter), None) = (letters.next(), letters.next()) {
            expecting_value = short_with_value.contains(&letter);
        }
        normalized.arguments.push(argument);
    }

    normalized
}

fn split_inline_value(body: &str) -> (&str, Option<&str>) {
    match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    }
}

enum Resolution {
    Found(LongOption),
    Ambiguous(Vec<&'static str>),
    Missing,
}

fn resolve_long(name: &str, long_options: &[LongOption]) -> Resolution {
    if name.is_empty() {
        return Resolution::Missing;
    }
    if let Some(option) = long_options.iter().find(|option| option.name == name) {
        return Resolution::Found(*option);
    }

    let candidates: Vec<&LongOption> = long_options
        .iter()
        .filter(|option| option.name.starts_with(name))
        .collect();
    match candidates.as_slice() {
        [] => Resolution::Missing,
        [option] => Resolution::Found(**option),
        _ => Resolution::Ambiguous(candidates.iter().map(|option| option.name).collect()),
    }
}
