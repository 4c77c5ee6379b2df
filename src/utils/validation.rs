//! Input validation and normalization utilities
//!
//! Validates the values collected by `connect` and the arguments passed to
//! the table commands before any request is built.

use crate::error::CliError;

/// Reduce user input such as `https://dev1.service-now.com/` to the bare
/// instance name `dev1`.
pub fn normalize_instance(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let host = without_scheme.split('/').next().unwrap_or_default();
    host.split('.').next().unwrap_or_default().to_string()
}

/// Validate that an instance name is usable as a subdomain label
pub fn validate_instance(instance: &str) -> crate::Result<()> {
    if instance.is_empty() {
        return Err(CliError::InvalidArguments("Instance name cannot be empty".to_string()).into());
    }

    if !instance
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(CliError::InvalidArguments(format!(
            "Invalid instance '{}': only letters, digits and '-' are allowed",
            instance
        ))
        .into());
    }

    Ok(())
}

/// Validate a table name before it is interpolated into an endpoint path
pub fn validate_table_name(table: &str) -> crate::Result<()> {
    if table.is_empty() {
        return Err(CliError::InvalidArguments("Table name cannot be empty".to_string()).into());
    }

    if !table
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(CliError::InvalidArguments(format!(
            "Invalid table name '{}': only letters, digits and '_' are allowed",
            table
        ))
        .into());
    }

    Ok(())
}

/// Validate that a scope argument is present
pub fn validate_scope(scope: &str) -> crate::Result<()> {
    if scope.trim().is_empty() {
        return Err(CliError::InvalidArguments("Scope cannot be empty".to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_instance() {
        assert_eq!(normalize_instance("dev123"), "dev123");
        assert_eq!(normalize_instance("dev123.service-now.com"), "dev123");
        assert_eq!(normalize_instance("https://dev123.service-now.com/"), "dev123");
        assert_eq!(normalize_instance("  http://acme-test.service-now.com/nav  "), "acme-test");
        assert_eq!(normalize_instance(""), "");
    }

    #[test]
    fn test_validate_instance() {
        assert!(validate_instance("dev123").is_ok());
        assert!(validate_instance("acme-test").is_ok());
        assert!(validate_instance("").is_err());
        assert!(validate_instance("dev 123").is_err());
        assert!(validate_instance("dev.123").is_err());
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("incident").is_ok());
        assert!(validate_table_name("x_acme_app_request").is_ok());
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("incident?sysparm_limit=1").is_err());
    }

    #[test]
    fn test_validate_scope() {
        assert!(validate_scope("global").is_ok());
        assert!(validate_scope("  ").is_err());
    }
}
