use thiserror::Error;

/// Errors raised while reading process environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The variable is not set at all.
    #[error("Missing environment variable: {0}")]
    Missing(String),

    /// The variable is set but holds only whitespace.
    #[error("Environment variable {0} is set but empty")]
    Empty(String),

    /// The variable holds bytes that are not valid unicode.
    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(String),
}

/// Reads an environment variable, returning a structured error if it's missing or blank.
///
/// The returned value is trimmed. Credentials pasted into `.env` files tend to
/// carry trailing whitespace, and the platform rejects those keys outright.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, EnvError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(EnvError::Empty(name.to_string())),
        Ok(value) => Ok(value.trim().to_string()),
        Err(std::env::VarError::NotPresent) => Err(EnvError::Missing(name.to_string())),
        Err(std::env::VarError::NotUnicode(_)) => Err(EnvError::NotUnicode(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VAR: &str = "SHARED_UTILS_ENV_TEST_VAR";

    #[test]
    #[serial]
    fn missing_variable_is_reported_by_name() {
        unsafe { std::env::remove_var(VAR) };
        let err = get_env_var(VAR).unwrap_err();
        assert!(matches!(err, EnvError::Missing(ref n) if n == VAR));
        assert_eq!(err.to_string(), format!("Missing environment variable: {VAR}"));
    }

    #[test]
    #[serial]
    fn blank_variable_counts_as_empty() {
        unsafe { std::env::set_var(VAR, "   ") };
        assert!(matches!(get_env_var(VAR), Err(EnvError::Empty(_))));
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn value_is_trimmed() {
        unsafe { std::env::set_var(VAR, " abc123\n") };
        assert_eq!(get_env_var(VAR).unwrap(), "abc123");
        unsafe { std::env::remove_var(VAR) };
    }
}
