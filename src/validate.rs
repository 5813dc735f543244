// ABOUTME: Validation of the two positional inputs (base URL and access token)
// ABOUTME: Purely syntactic: no network checks and no URL scheme checks

use crate::context::CommandContext;
use crate::error::{MigrationError, Result};

/// Number of positional arguments every migration command takes.
pub const REQUIRED_ARGUMENTS: usize = 2;

/// Suffix stripped from the base URL, exactly once and case-sensitively.
pub const ARTIFACTORY_SUFFIX: &str = "/artifactory";

/// Check that exactly two positionals were supplied.
pub fn check_argument_count(ctx: &dyn CommandContext) -> Result<()> {
    let count = ctx.argument_count();
    if count != REQUIRED_ARGUMENTS {
        return Err(MigrationError::MissingArgumentCount { count });
    }
    Ok(())
}

/// Validate the base URL and strip a trailing `/artifactory` if present.
///
/// # Examples
///
/// ```
/// # use federation_migrator::validate::normalize_url;
/// assert_eq!(normalize_url("http://host:8081/artifactory").unwrap(), "http://host:8081");
/// assert_eq!(normalize_url("http://host:8081").unwrap(), "http://host:8081");
/// assert!(normalize_url("").is_err());
/// ```
pub fn normalize_url(raw: &str) -> Result<String> {
    let url = raw.strip_suffix(ARTIFACTORY_SUFFIX).unwrap_or(raw);
    // a bare "/artifactory" would leave nothing to connect to
    if url.is_empty() {
        return Err(MigrationError::EmptyUrl);
    }
    Ok(url.to_string())
}

pub fn validate_token(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(MigrationError::EmptyToken);
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::InMemoryContext;

    #[test]
    fn test_argument_count() {
        assert!(check_argument_count(&InMemoryContext::new(["a", "b"])).is_ok());

        let err = check_argument_count(&InMemoryContext::new(["a"])).unwrap_err();
        assert!(matches!(err, MigrationError::MissingArgumentCount { count: 1 }));

        let err = check_argument_count(&InMemoryContext::new(["a", "b", "c"])).unwrap_err();
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_url_suffix_stripped_once() {
        assert_eq!(
            normalize_url("http://host/artifactory/artifactory").unwrap(),
            "http://host/artifactory"
        );
    }

    #[test]
    fn test_url_suffix_is_case_sensitive() {
        assert_eq!(
            normalize_url("http://host/Artifactory").unwrap(),
            "http://host/Artifactory"
        );
        assert_eq!(
            normalize_url("http://host/artifactory/").unwrap(),
            "http://host/artifactory/"
        );
    }

    #[test]
    fn test_url_is_not_otherwise_checked() {
        assert_eq!(normalize_url("not a url").unwrap(), "not a url");
    }

    #[test]
    fn test_bare_suffix_is_an_empty_url() {
        assert!(matches!(normalize_url(""), Err(MigrationError::EmptyUrl)));
        assert!(matches!(
            normalize_url("/artifactory"),
            Err(MigrationError::EmptyUrl)
        ));
    }

    #[test]
    fn test_empty_token() {
        assert!(matches!(validate_token(""), Err(MigrationError::EmptyToken)));
        assert_eq!(validate_token(" t ").unwrap(), " t ");
    }
}
