use std::convert::Infallible;
use std::env::{self, VarError};

/// Environment variables that may be injected into the target file, in the
/// order they are reported.
pub const PLACEHOLDERS: [&str; 7] = [
    "SORYN_USER",
    "SORYN_PASS",
    "GUEST_USER",
    "GUEST_PASS",
    "JSONBIN_API_KEY",
    "JSONBIN_BIN_ID",
    "IMGBB_API_KEY",
];

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Literal token marking a substitution point for `name`.
pub fn token(name: &str) -> String {
    format!("{OPEN}{name}{CLOSE}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderUsage {
    pub name: &'static str,
    pub occurrences: usize,
    pub value_set: bool,
}

#[derive(Debug, Clone)]
pub struct Substitution {
    pub content: String,
    pub usage: Vec<PlaceholderUsage>,
}

impl Substitution {
    pub fn replaced(&self) -> usize {
        self.usage.iter().map(|usage| usage.occurrences).sum()
    }

    /// Placeholders present in the input whose variable was not set. These
    /// were replaced with an empty string.
    pub fn missing(&self) -> impl Iterator<Item = &PlaceholderUsage> {
        self.usage
            .iter()
            .filter(|usage| usage.occurrences > 0 && !usage.value_set)
    }
}

/// Replace every recognized `{{NAME}}` token in `content` with `lookup(NAME)`,
/// or with an empty string when the lookup yields nothing.
///
/// Matching is literal and happens in one left-to-right pass over the input,
/// so inserted values are never scanned for further tokens. Unrecognized
/// tokens are copied through unchanged.
pub fn substitute<F>(content: &str, mut lookup: F) -> Substitution
where
    F: FnMut(&str) -> Option<String>,
{
    match try_substitute(content, |name| Ok::<_, Infallible>(lookup(name))) {
        Ok(substitution) => substitution,
        Err(never) => match never {},
    }
}

/// Like [`substitute`], but stops at the first failed lookup. Every name is
/// resolved before the content is touched.
pub fn try_substitute<F, E>(content: &str, lookup: F) -> Result<Substitution, E>
where
    F: FnMut(&str) -> Result<Option<String>, E>,
{
    let values = PLACEHOLDERS
        .into_iter()
        .map(lookup)
        .collect::<Result<Vec<_>, E>>()?;
    let mut counts = [0usize; PLACEHOLDERS.len()];

    let mut output = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let candidate = &rest[start + OPEN.len()..];
        match match_placeholder(candidate) {
            Some(index) => {
                output.push_str(values[index].as_deref().unwrap_or_default());
                counts[index] += 1;
                rest = &candidate[PLACEHOLDERS[index].len() + CLOSE.len()..];
            }
            None => {
                // Step over a single brace so `{{{NAME}}` still matches.
                output.push('{');
                rest = &rest[start + 1..];
            }
        }
    }
    output.push_str(rest);

    let usage = PLACEHOLDERS
        .into_iter()
        .zip(counts)
        .zip(&values)
        .map(|((name, occurrences), value)| PlaceholderUsage {
            name,
            occurrences,
            value_set: value.is_some(),
        })
        .collect();

    Ok(Substitution {
        content: output,
        usage,
    })
}

fn match_placeholder(candidate: &str) -> Option<usize> {
    PLACEHOLDERS.iter().position(|name| {
        candidate
            .strip_prefix(*name)
            .is_some_and(|tail| tail.starts_with(CLOSE))
    })
}

/// Reads `name` from the process environment. An unset variable is `None`;
/// a value that is not valid Unicode is an error rather than a mangled secret.
pub fn env_lookup(name: &str) -> Result<Option<String>, VarError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err),
    }
}
