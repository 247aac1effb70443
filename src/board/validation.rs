use super::types::{Authorization, CommentForm, PostForm};
use std::fmt;
use std::ops::RangeInclusive;

pub const TITLE_CHARS: RangeInclusive<usize> = 1..=100;
pub const CONTENT_CHARS: RangeInclusive<usize> = 1..=5000;
pub const NICKNAME_CHARS: RangeInclusive<usize> = 1..=20;
pub const PASSWORD_CHARS: RangeInclusive<usize> = 4..=20;
pub const COMMENT_CHARS: RangeInclusive<usize> = 1..=500;

/// A form field that failed its client-side check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Length is counted in characters, so Hangul syllables count as one each.
/// Whitespace-only values count as empty.
fn check_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    bounds: RangeInclusive<usize>,
) {
    let len = value.chars().count();
    if value.trim().is_empty() && *bounds.start() > 0 {
        errors.push(FieldError {
            field,
            message: "must not be empty".to_string(),
        });
    } else if !bounds.contains(&len) {
        errors.push(FieldError {
            field,
            message: format!(
                "must be {}-{} characters (got {})",
                bounds.start(),
                bounds.end(),
                len
            ),
        });
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a new post.
/// Returns all validation errors at once (not just the first).
pub fn validate_post_form(form: &PostForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_length(&mut errors, "title", &form.title, TITLE_CHARS);
    check_length(&mut errors, "content", &form.content, CONTENT_CHARS);
    check_length(&mut errors, "nickname", &form.nickname, NICKNAME_CHARS);
    check_length(&mut errors, "password", &form.password, PASSWORD_CHARS);
    finish(errors)
}

/// Validate an edit to an existing post
pub fn validate_post_edit(
    title: &str,
    content: &str,
    auth: &Authorization,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_length(&mut errors, "title", title, TITLE_CHARS);
    check_length(&mut errors, "content", content, CONTENT_CHARS);
    push_authorization_errors(&mut errors, auth);
    finish(errors)
}

pub fn validate_comment_form(form: &CommentForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_length(&mut errors, "content", &form.content, COMMENT_CHARS);
    check_length(&mut errors, "nickname", &form.nickname, NICKNAME_CHARS);
    check_length(&mut errors, "password", &form.password, PASSWORD_CHARS);
    finish(errors)
}

pub fn validate_comment_edit(content: &str, auth: &Authorization) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_length(&mut errors, "content", content, COMMENT_CHARS);
    push_authorization_errors(&mut errors, auth);
    finish(errors)
}

/// Author passwords must meet the length bounds; the admin password only needs to be non-empty.
pub fn validate_authorization(auth: &Authorization) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    push_authorization_errors(&mut errors, auth);
    finish(errors)
}

fn push_authorization_errors(errors: &mut Vec<FieldError>, auth: &Authorization) {
    match auth {
        Authorization::Author(password) => {
            check_length(errors, "password", password, PASSWORD_CHARS)
        }
        Authorization::Admin(password) => {
            if password.is_empty() {
                errors.push(FieldError {
                    field: "adminPassword",
                    message: "must not be empty".to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_form() -> PostForm {
        PostForm {
            title: "지역 공약 이행 현황".to_string(),
            content: "본문".to_string(),
            nickname: "시민".to_string(),
            password: "1234".to_string(),
        }
    }

    #[test]
    fn test_valid_post_form() {
        assert!(validate_post_form(&post_form()).is_ok());
    }

    #[test]
    fn test_title_bounds_count_characters() {
        let mut form = post_form();
        form.title = "가".repeat(100);
        assert!(validate_post_form(&form).is_ok());

        form.title = "가".repeat(101);
        let errors = validate_post_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
        assert!(errors[0].message.contains("got 101"));
    }

    #[test]
    fn test_blank_fields_reported_together() {
        let form = PostForm {
            title: "   ".to_string(),
            content: String::new(),
            nickname: String::new(),
            password: "12".to_string(),
        };
        let errors = validate_post_form(&form).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "content", "nickname", "password"]);
        assert_eq!(errors[0].message, "must not be empty");
    }

    #[test]
    fn test_password_bounds() {
        let mut form = post_form();
        form.password = "a".repeat(20);
        assert!(validate_post_form(&form).is_ok());
        form.password = "a".repeat(21);
        assert!(validate_post_form(&form).is_err());
        form.password = "abc".to_string();
        assert!(validate_post_form(&form).is_err());
    }

    #[test]
    fn test_content_limit() {
        let mut form = post_form();
        form.content = "x".repeat(5000);
        assert!(validate_post_form(&form).is_ok());
        form.content.push('x');
        assert!(validate_post_form(&form).is_err());
    }

    #[test]
    fn test_comment_limit() {
        let form = CommentForm {
            content: "댓".repeat(501),
            nickname: "n".to_string(),
            password: "1234".to_string(),
        };
        let errors = validate_comment_form(&form).unwrap_err();
        assert_eq!(errors[0].to_string(), "content: must be 1-500 characters (got 501)");
    }

    #[test]
    fn test_admin_password_only_needs_content() {
        assert!(validate_authorization(&Authorization::Admin("x".to_string())).is_ok());
        let errors = validate_authorization(&Authorization::Admin(String::new())).unwrap_err();
        assert_eq!(errors[0].field, "adminPassword");
    }

    #[test]
    fn test_author_password_checked_on_edit() {
        let errors =
            validate_post_edit("제목", "내용", &Authorization::Author("12".to_string())).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");

        assert!(validate_comment_edit("좋아요", &Authorization::Author("1234".to_string())).is_ok());
    }
}
