//! Post feed handlers. Every route requires an authenticated principal.
//!
//! ```text
//! POST   /api/posts                     {"text":"hello"}
//! GET    /api/posts
//! GET    /api/posts/{id}
//! DELETE /api/posts/{id}
//! PUT    /api/posts/like/{id}
//! PUT    /api/posts/unlike/{id}
//! POST   /api/posts/comment/{id}        {"text":"nice"}
//! DELETE /api/posts/comment/{id}/{comment_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{AddCommentRequest, RemoveCommentRequest};
use crate::domain::{Comment, EntryId, Like, Post, PostId, Text};
use crate::inbound::http::ApiResult;
use crate::inbound::http::principal::Principal;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_text_error, parse_path_id, require_field};

const POST_NOT_FOUND: &str = "post not found";
const COMMENT_NOT_FOUND: &str = "comment does not exist";

/// Body for creating a post or a comment.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TextRequest {
    pub text: Option<String>,
}

impl TextRequest {
    fn into_text(self) -> ApiResult<Text> {
        let raw = require_field(self.text, FieldName::new("text"))?;
        Text::new(raw).map_err(map_text_error)
    }
}

/// Confirmation body for deletions.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CommentPath {
    id: String,
    comment_id: String,
}

fn parse_post_id(raw: &str) -> ApiResult<PostId> {
    parse_path_id(raw, POST_NOT_FOUND)
}

/// Publish a post as the authenticated user.
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<TextRequest>,
) -> ApiResult<web::Json<Post>> {
    let text = payload.into_inner().into_text()?;
    let post = state.posts.create_post(principal.user_id(), text).await?;
    Ok(web::Json(post))
}

/// All posts, newest first.
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    _principal: Principal,
) -> ApiResult<web::Json<Vec<Post>>> {
    Ok(web::Json(state.posts_query.list_posts().await?))
}

#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    _principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<Post>> {
    let id = parse_post_id(&path)?;
    Ok(web::Json(state.posts_query.get_post(&id).await?))
}

/// Delete a post; only its author may do so.
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    state.posts.delete_post(principal.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse { msg: "Post removed" }))
}

#[put("/posts/like/{id}")]
pub async fn like_post(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Like>>> {
    let id = parse_post_id(&path)?;
    Ok(web::Json(state.posts.like_post(principal.user_id(), &id).await?))
}

#[put("/posts/unlike/{id}")]
pub async fn unlike_post(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Like>>> {
    let id = parse_post_id(&path)?;
    Ok(web::Json(state.posts.unlike_post(principal.user_id(), &id).await?))
}

/// Comment on a post; returns the post's comments, newest first.
#[post("/posts/comment/{id}")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
    payload: web::Json<TextRequest>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let post_id = parse_post_id(&path)?;
    let text = payload.into_inner().into_text()?;
    let comments = state
        .posts
        .add_comment(AddCommentRequest {
            post_id,
            user_id: *principal.user_id(),
            text,
        })
        .await?;
    Ok(web::Json(comments))
}

/// Remove a comment; only the post's author may do so.
#[delete("/posts/comment/{id}/{comment_id}")]
pub async fn remove_comment(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<CommentPath>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let CommentPath { id, comment_id } = path.into_inner();
    let post_id = parse_post_id(&id)?;
    let comment_id: EntryId = parse_path_id(&comment_id, COMMENT_NOT_FOUND)?;
    let comments = state
        .posts
        .remove_comment(RemoveCommentRequest {
            post_id,
            comment_id,
            user_id: *principal.user_id(),
        })
        .await?;
    Ok(web::Json(comments))
}

/// Register the post routes; mount inside the `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_post)
        .service(list_posts)
        .service(like_post)
        .service(unlike_post)
        .service(add_comment)
        .service(remove_comment)
        .service(get_post)
        .service(delete_post);
}
