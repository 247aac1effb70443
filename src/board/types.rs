use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub nickname: String,
    #[serde(default)]
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Only present in list responses
    #[serde(default)]
    pub comment_count: Option<u64>,
}

impl Post {
    /// True when the post was changed after it was created
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some_and(|u| u > self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_posts: u64,
    pub limit: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostDetailResponse {
    pub post: Post,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post_id: String,
}

/// New post as submitted by the author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub nickname: String,
    pub password: String,
}

/// New comment as submitted by the author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentForm {
    pub content: String,
    pub nickname: String,
    pub password: String,
}

/// Proof that the caller may edit or delete a post or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// The password the author set when writing
    Author(String),
    /// The board administrator password
    Admin(String),
}

impl Authorization {
    pub fn secret(&self) -> &str {
        match self {
            Authorization::Author(p) | Authorization::Admin(p) => p,
        }
    }

    /// Wire form: exactly one of `password` / `adminPassword`
    pub fn fields(&self) -> AuthFields<'_> {
        match self {
            Authorization::Author(p) => AuthFields {
                password: Some(p),
                admin_password: None,
            },
            Authorization::Admin(p) => AuthFields {
                password: None,
                admin_password: Some(p),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<&'a str>,
}

/// Body of `PATCH /api/board/posts/:id`
#[derive(Debug, Serialize)]
pub struct PostEditRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
    #[serde(flatten)]
    pub auth: AuthFields<'a>,
}

/// Body of `PATCH /api/board/comments/:id`
#[derive(Debug, Serialize)]
pub struct CommentEditRequest<'a> {
    pub content: &'a str,
    #[serde(flatten)]
    pub auth: AuthFields<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_posts_response() {
        let json = r#"{
            "posts": [{
                "_id": "665f1c2e9b1e8a0012345678",
                "title": "첫 글",
                "content": "안녕하세요",
                "nickname": "시민1",
                "viewCount": 12,
                "createdAt": "2025-05-01T09:30:00.000Z",
                "commentCount": 3
            }],
            "pagination": {
                "currentPage": 1,
                "totalPages": 4,
                "totalPosts": 52,
                "limit": 15,
                "hasNext": true,
                "hasPrev": false
            }
        }"#;
        let response: PostsResponse = serde_json::from_str(json).unwrap();
        let post = &response.posts[0];
        assert_eq!(post.id, "665f1c2e9b1e8a0012345678");
        assert_eq!(post.view_count, 12);
        assert_eq!(post.comment_count, Some(3));
        assert!(post.updated_at.is_none());
        assert!(!post.is_edited());
        assert_eq!(response.pagination.total_pages, 4);
        assert!(response.pagination.has_next);
    }

    #[test]
    fn test_edited_post() {
        let json = r#"{
            "_id": "1", "title": "t", "content": "c", "nickname": "n", "viewCount": 0,
            "createdAt": "2025-05-01T09:30:00Z", "updatedAt": "2025-05-02T10:00:00Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.is_edited());
    }

    #[test]
    fn test_author_authorization_fields() {
        let auth = Authorization::Author("secret1".to_string());
        let json = serde_json::to_value(auth.fields()).unwrap();
        assert_eq!(json, serde_json::json!({"password": "secret1"}));
    }

    #[test]
    fn test_admin_edit_request_body() {
        let auth = Authorization::Admin("root-pass".to_string());
        let body = PostEditRequest {
            title: "제목",
            content: "내용",
            auth: auth.fields(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "제목", "content": "내용", "adminPassword": "root-pass"})
        );
    }

    #[test]
    fn test_comment_edit_request_body() {
        let auth = Authorization::Author("pw12".to_string());
        let body = CommentEditRequest {
            content: "수정",
            auth: auth.fields(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"content": "수정", "password": "pw12"}));
    }
}
