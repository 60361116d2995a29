//! Client-side search over the users already fetched for the current page.

use crate::features::users::types::User;

/// Users whose first name, last name or email contains `term`, ignoring case.
/// An empty term keeps every user. Order is preserved.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|user| matches_term(user, &needle))
        .collect()
}

fn matches_term(user: &User, needle: &str) -> bool {
    needle.is_empty()
        || [&user.first_name, &user.last_name, &user.email]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}
