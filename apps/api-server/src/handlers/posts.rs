//! Post editor handlers.
//!
//! Each request opens its own data context, delegates to the post
//! repository and commits through the change tracker. Persistence failures
//! go through [`AppState::persistence_failure`].

use actix_web::{HttpResponse, http::header, web};

use inkwell_core::domain::{Post, PostDraft};
use inkwell_core::ports::{ChangeTracker, DataContext, DataStore, EventLogger};
use inkwell_shared::dto::{PostPayload, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const EDITOR_ROUTE: &str = "/api/post/editor";

/// GET /api/post/editor
pub async fn list_posts(
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    let fail = state.persistence_failure("getting all posts");
    let ctx = state.store.open().await.map_err(&fail)?;
    let posts = ctx.posts().get_all_posts().await.map_err(&fail)?;

    state
        .logger
        .log_info(&format!("Got {} posts successfully", posts.len()));

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/post/editor/{url}
pub async fn get_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let url = path.into_inner();
    let fail = state.persistence_failure("getting post by url");
    let ctx = state.store.open().await.map_err(&fail)?;

    match ctx.posts().get_post_by_url(&url).await.map_err(&fail)? {
        Some(post) => Ok(HttpResponse::Ok().json(to_response(post))),
        None => Err(AppError::NotFound(format!(
            "Post with url '{url}' was not found"
        ))),
    }
}

/// POST /api/post/editor
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<Option<PostPayload>>,
) -> AppResult<HttpResponse> {
    let draft = accept_draft(&state, body.into_inner())?;

    let fail = state.persistence_failure("creating post");
    let ctx = state.store.open().await.map_err(&fail)?;

    let post = Post::new(draft);
    ctx.posts().create(post.clone()).await.map_err(&fail)?;
    ctx.save().await.map_err(&fail)?;

    tracing::debug!(
        editor_id = %identity.user_id,
        editor = %identity.email,
        url = %post.url,
        "Post created"
    );
    Ok(created(post))
}

/// PUT /api/post/editor
///
/// Full replacement of the post whose `url` matches the payload.
/// Answers 201 like creation does.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<Option<PostPayload>>,
) -> AppResult<HttpResponse> {
    let draft = accept_draft(&state, body.into_inner())?;

    let fail = state.persistence_failure("updating post");
    let ctx = state.store.open().await.map_err(&fail)?;

    let Some(mut post) = ctx
        .posts()
        .get_post_by_url(&draft.url)
        .await
        .map_err(&fail)?
    else {
        let detail = format!("Post with url '{}' was not found", draft.url);
        state.logger.log_error(&detail);
        return Err(AppError::NotFound(detail));
    };

    post.replace_with(draft);
    ctx.posts().update(post.clone()).await.map_err(&fail)?;
    ctx.save().await.map_err(&fail)?;

    tracing::debug!(
        editor_id = %identity.user_id,
        editor = %identity.email,
        url = %post.url,
        "Post updated"
    );
    Ok(created(post))
}

/// DELETE /api/post/editor/{url}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let url = path.into_inner();
    let fail = state.persistence_failure("deleting post");
    let ctx = state.store.open().await.map_err(&fail)?;

    let Some(post) = ctx.posts().get_post_by_url(&url).await.map_err(&fail)? else {
        let detail = format!("Post with url '{url}' was not found");
        state.logger.log_error(&detail);
        return Err(AppError::NotFound(detail));
    };

    ctx.posts().delete(post).await.map_err(&fail)?;
    ctx.save().await.map_err(&fail)?;

    tracing::debug!(
        editor_id = %identity.user_id,
        editor = %identity.email,
        url = %url,
        "Post deleted"
    );
    Ok(HttpResponse::Accepted().finish())
}

/// Null and invalid payloads are rejected before any data access.
fn accept_draft(state: &AppState, payload: Option<PostPayload>) -> AppResult<PostDraft> {
    let Some(payload) = payload else {
        state.logger.log_error("Post object sent from client is null.");
        return Err(AppError::BadRequest(
            "Post object from client is empty".to_string(),
        ));
    };

    let draft = PostDraft {
        url: payload.url,
        title: payload.title,
        description: payload.description,
        content: payload.content.unwrap_or_default(),
        author: payload.author,
    };

    if let Err(err) = draft.validate() {
        state
            .logger
            .log_error(&format!("Invalid post model object sent from client: {err}"));
        return Err(err.into());
    }

    Ok(draft)
}

fn created(post: Post) -> HttpResponse {
    HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{EDITOR_ROUTE}/{}", post.url)))
        .json(to_response(post))
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        url: post.url,
        title: post.title,
        description: post.description,
        content: post.content,
        author: post.author,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}
