// Mon Oct 19 2026 - Alex

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()]*\)").expect("paren pattern"));
static TEMPLATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").expect("template pattern"));

/// Drops compiler-generated suffixes such as `.part.12` or `.isra.3`.
pub fn strip_dotted(name: &str) -> &str {
    match name.find('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Removes argument lists and template parameter lists from a demangled
/// name, innermost groups first, until nothing changes.
pub fn strip_type_noise(name: &str) -> String {
    let mut current = name.to_string();
    loop {
        let without_args = remove_all(&PAREN_RE, &current);
        let stripped = remove_all(&TEMPLATE_RE, &without_args);
        if stripped == current {
            return stripped;
        }
        current = stripped;
    }
}

fn remove_all(re: &Regex, text: &str) -> String {
    let mut current = text.to_string();
    loop {
        match re.replace_all(&current, "") {
            Cow::Borrowed(_) => return current,
            Cow::Owned(next) => current = next,
        }
    }
}
