//! `${name}` placeholder interpolation
//!
//! Names are looked up in the [`CliContext`] first; `env.NAME` reads an
//! environment variable. A placeholder that cannot be resolved is replaced
//! with the sentinel `<$name_not_applicable>`, leaving the decision of what
//! to do with it to whoever executes the text.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::context::CliContext;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}").expect("placeholder pattern is valid")
});

static SENTINEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\$([A-Za-z_][A-Za-z0-9_.]*)_not_applicable>").expect("sentinel pattern is valid")
});

/// Sentinel inserted for an unresolvable variable
pub fn sentinel(name: &str) -> String {
    format!("<${name}_not_applicable>")
}

/// Replace every `${name}` in `text`
pub fn interpolate(text: &str, context: &CliContext) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            lookup(name, context).unwrap_or_else(|| sentinel(name))
        })
        .into_owned()
}

fn lookup(name: &str, context: &CliContext) -> Option<String> {
    if let Some(value) = context.get(name).filter(|v| !v.is_empty()) {
        return Some(value.to_string());
    }
    let var = name.strip_prefix("env.")?;
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

pub fn contains_sentinel(text: &str) -> bool {
    SENTINEL.is_match(text)
}

/// Names of the unresolved variables left in `text`, in order of appearance
pub fn unresolved_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in SENTINEL.captures_iter(text) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextVar;

    fn context() -> CliContext {
        let mut context = CliContext::new();
        context.set(ContextVar::RepoRoot, "/src/app");
        context.set(ContextVar::Cwd, "/src/app/web");
        context
    }

    #[test]
    fn test_interpolate_known_variables() {
        assert_eq!(
            interpolate("cp ${repoRoot}/.env ${ cwd }/.env", &context()),
            "cp /src/app/.env /src/app/web/.env"
        );
    }

    #[test]
    fn test_unknown_variable_becomes_sentinel() {
        let text = interpolate("cd ${newWorktreeRoot} && ls", &context());
        assert_eq!(text, "cd <$newWorktreeRoot_not_applicable> && ls");
        assert!(contains_sentinel(&text));
        assert_eq!(unresolved_names(&text), vec!["newWorktreeRoot"]);
    }

    #[test]
    fn test_empty_value_is_not_applicable() {
        let mut ctx = context();
        ctx.set(ContextVar::WorktreeRoot, "");
        assert_eq!(interpolate("${worktreeRoot}", &ctx), "<$worktreeRoot_not_applicable>");
    }

    #[test]
    fn test_env_lookup() {
        let path = std::env::var("PATH").unwrap();
        assert_eq!(interpolate("${env.PATH}", &context()), path);
        assert_eq!(
            interpolate("${env.TWIG_SURELY_UNSET_VARIABLE}", &context()),
            "<$env.TWIG_SURELY_UNSET_VARIABLE_not_applicable>"
        );
    }

    #[test]
    fn test_text_without_placeholders_is_unchanged() {
        assert_eq!(interpolate("echo $HOME {x}", &context()), "echo $HOME {x}");
        assert!(!contains_sentinel("echo <$>"));
    }

    #[test]
    fn test_interpolation_is_deterministic() {
        let ctx = context();
        let text = "${repoRoot} ${missing} ${cwd}";
        assert_eq!(interpolate(text, &ctx), interpolate(text, &ctx));
    }
}
