pub mod prompt;

use crate::board::Authorization;
use anyhow::Result;

/// Environment variable holding the board administrator password
pub const ENV_ADMIN_PASSWORD_VAR: &str = "MINSIM_ADMIN_PASSWORD";

pub use prompt::{confirm, confirm_or, prompt_line, prompt_line_with_default, prompt_secret, prompt_text};

/// Check for an admin password in the MINSIM_ADMIN_PASSWORD environment variable.
/// Returns Some(password) if the env var is set and non-empty, None otherwise.
pub fn get_admin_password_from_env() -> Option<String> {
    match std::env::var(ENV_ADMIN_PASSWORD_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Obtain the password that authorizes an edit or delete.
///
/// Admin mode takes MINSIM_ADMIN_PASSWORD when set and prompts otherwise;
/// author mode always prompts.
pub fn resolve_authorization(admin: bool) -> Result<Authorization> {
    if admin {
        if let Some(password) = get_admin_password_from_env() {
            log::debug!("Using admin password from {}", ENV_ADMIN_PASSWORD_VAR);
            return Ok(Authorization::Admin(password));
        }
        Ok(Authorization::Admin(prompt_secret("관리자 비밀번호")?))
    } else {
        Ok(Authorization::Author(prompt_secret("비밀번호")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_password_from_env() {
        std::env::set_var(ENV_ADMIN_PASSWORD_VAR, "  board-admin  ");
        assert_eq!(get_admin_password_from_env().as_deref(), Some("board-admin"));

        let auth = resolve_authorization(true).unwrap();
        assert_eq!(auth, Authorization::Admin("board-admin".to_string()));

        std::env::set_var(ENV_ADMIN_PASSWORD_VAR, "   ");
        assert!(get_admin_password_from_env().is_none());
        std::env::remove_var(ENV_ADMIN_PASSWORD_VAR);
    }
}
