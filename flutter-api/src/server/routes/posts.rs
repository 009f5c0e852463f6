use crate::{
    server::{Result, ServerError, ServerRouter, json::Json},
    store::PostStore,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use flutter_common::model::{
    post::{CreatePost, Post},
    request::{DeletePost, ToggleLike, UpdatePostBody},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_posts)
        .typed_post(create_post)
        .typed_put(update_post)
        .typed_delete(delete_post)
        .typed_put(toggle_like)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/flutters", rejection(ServerError))]
struct PostsPath();

async fn list_posts(PostsPath(): PostsPath, State(store): State<Arc<PostStore>>) -> Json<Vec<Post>> {
    Json(store.fetch_posts().await)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/flutter", rejection(ServerError))]
struct PostPath();

async fn create_post(
    PostPath(): PostPath,
    State(store): State<Arc<PostStore>>,
    Json(post): Json<CreatePost>,
) -> Json<Post> {
    Json(store.create_post(post).await)
}

async fn update_post(
    PostPath(): PostPath,
    State(store): State<Arc<PostStore>>,
    Json(UpdatePostBody { id, body }): Json<UpdatePostBody>,
) -> Result<Json<Post>> {
    let post = store
        .update_body(&id, body)
        .await
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(post))
}

async fn delete_post(
    PostPath(): PostPath,
    State(store): State<Arc<PostStore>>,
    Json(DeletePost { id }): Json<DeletePost>,
) -> Result<Json<Post>> {
    let post = store
        .delete_post(&id)
        .await
        .ok_or(ServerError::PostByIdNotFound(id))?;
    info!(post = %post.id, "Post deleted");

    Ok(Json(post))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/flutter/like", rejection(ServerError))]
struct LikePath();

async fn toggle_like(
    LikePath(): LikePath,
    State(store): State<Arc<PostStore>>,
    Json(ToggleLike {
        id,
        actor_id,
        action,
    }): Json<ToggleLike>,
) -> Result<Json<Post>> {
    let post = store
        .toggle_like(&id, &actor_id, action)
        .await
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(post))
}

#[cfg(test)]
mod tests {
    use crate::{
        server::{ServerState, app},
        store::PostStore,
    };
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use flutter_common::model::{
        Id,
        actor::{Actor, DisplayName},
        like::LikeSet,
        post::{Post, PostBody},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use time::macros::datetime;
    use tower::ServiceExt;

    fn seeded() -> (Router, Arc<PostStore>) {
        let post = Post {
            id: Id::from("p1"),
            body: PostBody::try_from("hello").unwrap(),
            posted_at: datetime!(2025-10-24 10:30 UTC),
            author: Actor {
                id: Id::from("u1"),
                display_name: DisplayName::new("Ada".to_owned()).unwrap(),
                avatar_url: "https://avatars.example/u1.png".to_owned(),
            },
            liked_by: LikeSet::new(),
        };
        let store = Arc::new(PostStore::with_posts(vec![post]));

        (app(ServerState::new(Arc::clone(&store))), store)
    }

    async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    #[tokio::test]
    async fn lists_posts() {
        let (app, _) = seeded();

        let (status, body) = call(app, Method::GET, "/api/flutters", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "p1");
        assert_eq!(body[0]["postedAt"], "2025-10-24T10:30:00Z");
        assert_eq!(body[0]["author"]["displayName"], "Ada");
        assert_eq!(body[0]["likedBy"], json!([]));
    }

    #[tokio::test]
    async fn creates_post() {
        let (app, store) = seeded();

        let (status, body) = call(
            app,
            Method::POST,
            "/api/flutter",
            Some(json!({
                "author": { "id": "u2", "displayName": "Grace", "avatarUrl": "" },
                "body": "new post"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"], "new post");
        assert_eq!(store.fetch_posts().await.len(), 2);
    }

    #[tokio::test]
    async fn updates_body() {
        let (app, store) = seeded();

        let (status, body) = call(
            app,
            Method::PUT,
            "/api/flutter",
            Some(json!({ "id": "p1", "body": "edited" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"], "edited");
        assert_eq!(
            store.fetch_post(&Id::from("p1")).await.unwrap().body.get(),
            "edited"
        );
    }

    #[tokio::test]
    async fn empty_body_is_bad_request() {
        let (app, store) = seeded();

        let (status, body) = call(
            app,
            Method::PUT,
            "/api/flutter",
            Some(json!({ "id": "p1", "body": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "status": 400 }));
        assert_eq!(
            store.fetch_post(&Id::from("p1")).await.unwrap().body.get(),
            "hello"
        );
    }

    #[tokio::test]
    async fn toggles_like() {
        let (app, store) = seeded();

        let (status, body) = call(
            app.clone(),
            Method::PUT,
            "/api/flutter/like",
            Some(json!({ "id": "p1", "actorId": "u2", "action": "add" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likedBy"], json!(["u2"]));

        let (status, _) = call(
            app,
            Method::PUT,
            "/api/flutter/like",
            Some(json!({ "id": "p1", "actorId": "u2", "action": "remove" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(
            store
                .fetch_post(&Id::from("p1"))
                .await
                .unwrap()
                .liked_by
                .is_empty()
        );
    }

    #[tokio::test]
    async fn deletes_post() {
        let (app, store) = seeded();

        let (status, _) = call(
            app.clone(),
            Method::DELETE,
            "/api/flutter",
            Some(json!({ "id": "p1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(store.fetch_posts().await.is_empty());

        let (status, body) = call(
            app,
            Method::DELETE,
            "/api/flutter",
            Some(json!({ "id": "p1" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "status": 404 }));
    }

    #[tokio::test]
    async fn unknown_post_is_not_found() {
        let (app, _) = seeded();

        let (status, _) = call(
            app,
            Method::PUT,
            "/api/flutter/like",
            Some(json!({ "id": "nope", "actorId": "u2", "action": "add" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (app, _) = seeded();

        let (status, _) = call(app, Method::GET, "/api/nothing", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
