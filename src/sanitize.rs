/// Characters that are not allowed to appear in a path segment
const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '/', '\\', '|', '?', '*', '\''];

/// Prefix given to archived boards, lists and cards
pub const CLOSED_PREFIX: &str = "[closed] ";

/// Strip problematic characters from a file name
///
/// Every occurrence of `< > : / \ | ? * '` is replaced by `_`, one for one.
/// Everything else, unicode included, is left untouched.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Directory name for a remote resource
///
/// The name is sanitized first and archived resources get the `[closed] ` prefix.
pub fn resource_dir_name(name: &str, closed: bool) -> String {
    let sanitized = sanitize(name);
    if closed {
        format!("{CLOSED_PREFIX}{sanitized}")
    } else {
        sanitized
    }
}
