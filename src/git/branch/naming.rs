//! Branch name normalization

const STRIPPED_PREFIXES: [&str; 4] = ["refs/", "heads/", "remotes/", "origin/"];

/// Strip ref prefixes (`refs/`, `heads/`, `remotes/`, `origin/`) from a branch name.
///
/// Prefixes are stripped until none is left, so the result is stable:
/// `normalize_branch_name(normalize_branch_name(x)) == normalize_branch_name(x)`.
pub fn normalize_branch_name(name: &str) -> String {
    let mut rest = name.trim();
    while let Some(stripped) = STRIPPED_PREFIXES
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = stripped.trim();
    }
    rest.to_string()
}
