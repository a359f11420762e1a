use std::collections::HashSet;

/// Derives an OS username from an employee name, unique against
/// `existing_usernames` at the moment of the call.
///
/// The base candidate is the lowercased last name followed by the lowercased
/// first character of the first name, no separator. If taken, numeric
/// suffixes `1`, `2`, `3`, … are probed in order until a free candidate is
/// found. The set is never modified here; the caller inserts the returned
/// value before allocating for the next record so that two employees with
/// the same base candidate receive different suffixes.
///
/// Precondition: `first_name` is non-empty (enforced by record validation
/// upstream).
pub fn generate_username(
    first_name: &str,
    last_name: &str,
    existing_usernames: &HashSet<String>,
) -> String {
    let initial = first_name
        .to_lowercase()
        .chars()
        .next()
        .map(String::from)
        .unwrap_or_default();
    let base = format!("{}{}", last_name.to_lowercase(), initial);

    if !existing_usernames.contains(&base) {
        return base;
    }

    let mut count = 1;
    loop {
        let candidate = format!("{}{}", base, count);
        if !existing_usernames.contains(&candidate) {
            return candidate;
        }
        count += 1;
    }
}
