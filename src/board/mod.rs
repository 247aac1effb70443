pub mod pagination;
pub mod types;
pub mod validation;

pub use pagination::{page_numbers, PageItem, MAX_VISIBLE_PAGES};
pub use types::{
    Authorization, Comment, CommentForm, CommentsResponse, Pagination, Post, PostDetailResponse,
    PostForm, PostsResponse,
};
pub use validation::{
    validate_authorization, validate_comment_edit, validate_comment_form, validate_post_edit,
    validate_post_form, FieldError,
};
