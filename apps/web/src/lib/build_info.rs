//! Build metadata recorded by `build.rs`.

pub fn git_commit_hash() -> &'static str {
    non_empty_or_unknown(option_env!("USERS_ADMIN_GIT_SHA"))
}

pub fn build_profile() -> &'static str {
    non_empty_or_unknown(option_env!("USERS_ADMIN_BUILD_PROFILE"))
}

/// Footer label, e.g. `a1b2c3d (release)`.
pub fn build_label() -> String {
    format!("{} ({})", git_commit_hash(), build_profile())
}

fn non_empty_or_unknown(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::non_empty_or_unknown;

    #[test]
    fn missing_or_blank_values_read_as_unknown() {
        assert_eq!(non_empty_or_unknown(None), "unknown");
        assert_eq!(non_empty_or_unknown(Some("  ")), "unknown");
        assert_eq!(non_empty_or_unknown(Some("a1b2c3d")), "a1b2c3d");
    }
}
