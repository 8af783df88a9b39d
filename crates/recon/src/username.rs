/// Derive a directory account name from an email address.
///
/// Only the exact local-part shape `first.last` (one period, two non-empty
/// segments) yields a suggestion: the first letter of the first segment
/// joined to the second segment, all lower-cased. Every other shape returns
/// `None` — the heuristic is deliberately narrow.
pub fn suggest_username(email: &str) -> Option<String> {
    let email = email.to_lowercase();
    let local_part = match email.split_once('@') {
        Some((local, _)) => local,
        None => email.as_str(),
    };

    let (first, last) = local_part.split_once('.')?;
    if first.is_empty() || last.is_empty() || last.contains('.') {
        return None;
    }

    let initial = first.chars().next()?;
    Some(format!("{initial}.{last}"))
}
