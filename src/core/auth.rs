use crate::error::{AppError, CliError};
use crate::utils::validation::{normalize_instance, validate_instance};
use rpassword::read_password;
use std::io::{self, Write};

/// Connection input collected by `connect`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub instance: String,
    pub username: String,
    pub password: String,
}

fn prompt_line(label: &str) -> Result<String, AppError> {
    print!("{}: ", label);
    io::stdout().flush().map_err(|e| {
        AppError::Cli(CliError::Input(format!("Failed to flush stdout: {}", e)))
    })?;

    let mut line = String::new();
    io::stdin().read_line(&mut line).map_err(|e| {
        AppError::Cli(CliError::Input(format!(
            "Failed to read {}: {}",
            label.to_lowercase(),
            e
        )))
    })?;
    Ok(line.trim().to_string())
}

fn prompt_password() -> Result<String, AppError> {
    print!("Password: ");
    io::stdout().flush().map_err(|e| {
        AppError::Cli(CliError::Input(format!("Failed to flush stdout: {}", e)))
    })?;

    let password = read_password().map_err(|e| {
        AppError::Cli(CliError::Input(format!("Failed to read password: {}", e)))
    })?;
    Ok(password_from_prompt(&password))
}

/// Drop only the line terminator; spaces are part of the password
fn password_from_prompt(raw: &str) -> String {
    raw.trim_end_matches(['\r', '\n']).to_string()
}

impl LoginInput {
    /// Use the values given on the command line and prompt for the rest
    pub fn from_args_or_prompt(
        instance: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, AppError> {
        let instance = match instance.filter(|v| !v.trim().is_empty()) {
            Some(value) => value,
            None => prompt_line("Instance")?,
        };
        let username = match username.filter(|v| !v.trim().is_empty()) {
            Some(value) => value,
            None => prompt_line("Username")?,
        };
        let password = match password.filter(|v| !v.is_empty()) {
            Some(value) => value,
            None => prompt_password()?,
        };

        Ok(Self::new(&instance, &username, &password))
    }

    /// Normalizes the instance (`dev1.service-now.com` becomes `dev1`)
    pub fn new(instance: &str, username: &str, password: &str) -> Self {
        Self {
            instance: normalize_instance(instance),
            username: username.trim().to_string(),
            password: password.to_string(),
        }
    }

    /// Validate that credentials are not empty
    pub fn validate(&self) -> Result<(), AppError> {
        validate_instance(&self.instance)?;
        if self.username.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Username cannot be empty".to_string(),
            )));
        }
        if self.password.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Password cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_instance() {
        let input = LoginInput::new("https://dev1.service-now.com/", " admin ", "pw");
        assert_eq!(input.instance, "dev1");
        assert_eq!(input.username, "admin");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_from_args_without_prompt() {
        let input = LoginInput::from_args_or_prompt(
            Some("dev1".to_string()),
            Some("admin".to_string()),
            Some("pw".to_string()),
        )
        .expect("all values supplied");
        assert_eq!(input, LoginInput::new("dev1", "admin", "pw"));
    }

    #[test]
    fn test_password_whitespace_is_preserved() {
        assert_eq!(password_from_prompt("  pass word  "), "  pass word  ");
        assert_eq!(password_from_prompt(" pw \r\n"), " pw ");

        let input = LoginInput::from_args_or_prompt(
            Some("dev1".to_string()),
            Some("admin".to_string()),
            Some(" pw ".to_string()),
        )
        .expect("all values supplied");
        assert_eq!(input.password, " pw ");
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(LoginInput::new("", "admin", "pw").validate().is_err());
        assert!(LoginInput::new("dev1", "", "pw").validate().is_err());
        assert!(LoginInput::new("dev1", "admin", "").validate().is_err());
    }
}
