use super::client::BackendClient;
use super::error::ApiError;
use crate::board::types::{
    Authorization, CommentEditRequest, CommentForm, CommentsResponse, CreatePostResponse, Post,
    PostDetailResponse, PostEditRequest, PostForm, PostsResponse,
};
use http::Method;

/// Board endpoints. Nothing here is cached.
impl BackendClient {
    pub async fn list_posts(&self, page: u32, limit: u32) -> Result<PostsResponse, ApiError> {
        let (page, limit) = (page.max(1).to_string(), limit.to_string());
        let url = self.url(
            &["api", "board", "posts"],
            &[("page", page.as_str()), ("limit", limit.as_str())],
        )?;
        self.get_json(url, false).await
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let url = self.url(&["api", "board", "posts", id], &[])?;
        let response: PostDetailResponse = self.get_json(url, false).await?;
        Ok(response.post)
    }

    /// Returns the new post's id
    pub async fn create_post(&self, form: &PostForm) -> Result<String, ApiError> {
        let url = self.url(&["api", "board", "posts"], &[])?;
        let response: CreatePostResponse = self.send_json(Method::POST, url, Some(form)).await?;
        Ok(response.post_id)
    }

    pub async fn update_post(
        &self,
        id: &str,
        title: &str,
        content: &str,
        auth: &Authorization,
    ) -> Result<(), ApiError> {
        let url = self.url(&["api", "board", "posts", id], &[])?;
        let body = PostEditRequest {
            title,
            content,
            auth: auth.fields(),
        };
        self.send(Method::PATCH, url, Some(&body)).await.map(|_| ())
    }

    pub async fn delete_post(&self, id: &str, auth: &Authorization) -> Result<(), ApiError> {
        let url = self.url(&["api", "board", "posts", id], &[])?;
        self.send(Method::DELETE, url, Some(&auth.fields())).await.map(|_| ())
    }

    /// Check a password against a post without changing it
    pub async fn verify_post_password(&self, id: &str, auth: &Authorization) -> Result<(), ApiError> {
        let url = self.url(&["api", "board", "posts", id, "verify"], &[])?;
        self.send(Method::POST, url, Some(&auth.fields())).await.map(|_| ())
    }

    pub async fn list_comments(&self, post_id: &str) -> Result<CommentsResponse, ApiError> {
        let url = self.url(&["api", "board", "posts", post_id, "comments"], &[])?;
        self.get_json(url, false).await
    }

    pub async fn create_comment(&self, post_id: &str, form: &CommentForm) -> Result<(), ApiError> {
        let url = self.url(&["api", "board", "posts", post_id, "comments"], &[])?;
        self.send(Method::POST, url, Some(form)).await.map(|_| ())
    }

    pub async fn update_comment(
        &self,
        comment_id: &str,
        content: &str,
        auth: &Authorization,
    ) -> Result<(), ApiError> {
        let url = self.url(&["api", "board", "comments", comment_id], &[])?;
        let body = CommentEditRequest {
            content,
            auth: auth.fields(),
        };
        self.send(Method::PATCH, url, Some(&body)).await.map(|_| ())
    }

    pub async fn delete_comment(&self, comment_id: &str, auth: &Authorization) -> Result<(), ApiError> {
        let url = self.url(&["api", "board", "comments", comment_id], &[])?;
        self.send(Method::DELETE, url, Some(&auth.fields())).await.map(|_| ())
    }
}
