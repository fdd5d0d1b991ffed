use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z0-9_]+)").expect("placeholder pattern is valid"));

/// Replace every `$NAME` token in `input` with `lookup(NAME)`.
///
/// Unknown names become the empty string. Matching is a single left-to-right
/// pass, so text produced by a replacement is never scanned again.
pub fn substitute<F>(input: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    if !input.contains('$') {
        return input.to_owned();
    }

    PLACEHOLDER
        .replace_all(input, |caps: &Captures<'_>| lookup(&caps[1]).unwrap_or_default())
        .into_owned()
}
