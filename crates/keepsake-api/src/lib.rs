//! JSON REST API for Keepsake.
//!
//! Exposes an axum [`Router`] backed by a [`Gallery`] over any
//! [`GalleryStore`]. Transport, TLS, and the authenticating proxy that
//! writes the principal header are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", keepsake_api::api_router(gallery.clone()))
//! ```

pub mod albums;
pub mod error;
pub mod identity;
pub mod photos;
pub mod shared;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use keepsake_core::{Gallery, store::GalleryStore};

pub use error::ApiError;
pub use identity::{Identity, PRINCIPAL_HEADER};

/// Build a fully-materialised API router for `gallery`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(gallery: Arc<Gallery<S>>) -> Router<()>
where
  S: GalleryStore + 'static,
{
  Router::new()
    // Roles and profiles
    .route("/roles", post(users::assign_role::<S>))
    .route("/me/role", get(users::caller_role::<S>))
    .route("/me/is-admin", get(users::caller_is_admin::<S>))
    .route(
      "/me/profile",
      get(users::caller_profile::<S>).put(users::save_profile::<S>),
    )
    .route("/profiles/{principal}", get(users::profile::<S>))
    // Albums
    .route("/albums", get(albums::list::<S>).post(albums::create::<S>))
    .route("/albums/{id}", get(albums::get_one::<S>))
    .route("/albums/{id}/name", put(albums::rename::<S>))
    .route("/albums/{id}/order", put(albums::reorder::<S>))
    .route("/albums/{id}/share-links", post(shared::create::<S>))
    // Photos
    .route("/photos", get(photos::get_many::<S>).post(photos::upload::<S>))
    .route("/photos/{id}", get(photos::get_one::<S>))
    .route("/photos/{id}/caption", put(photos::caption::<S>))
    // Share links
    .route("/share-links/{share_id}", delete(shared::revoke::<S>))
    .route("/shared/{share_id}", get(shared::album::<S>))
    .route("/shared/{share_id}/photos", get(shared::photos::<S>))
    .with_state(gallery)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use keepsake_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  async fn app() -> Router<()> {
    let store = SqliteStore::open_in_memory()
      .await
      .expect("in-memory store");
    api_router(Arc::new(Gallery::new(Arc::new(store))))
  }

  fn json_req(
    method: &str,
    uri: &str,
    principal: &str,
    body: serde_json::Value,
  ) -> Request<Body> {
    Request::builder()
      .method(method)
      .uri(uri)
      .header(PRINCIPAL_HEADER, principal)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
  }

  fn get_req(uri: &str, principal: &str) -> Request<Body> {
    Request::builder()
      .uri(uri)
      .header(PRINCIPAL_HEADER, principal)
      .body(Body::empty())
      .unwrap()
  }

  async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), 64 * 1024)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn album_roundtrip_over_http() {
    let app = app().await;

    let res = app
      .clone()
      .oneshot(json_req(
        "POST",
        "/albums",
        "alice",
        serde_json::json!({ "name": "Ceremony" }),
      ))
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = body_json(res).await["id"].as_str().unwrap().to_owned();

    let res = app
      .clone()
      .oneshot(get_req(&format!("/albums/{id}"), "alice"))
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let album = body_json(res).await;
    assert_eq!(album["name"], "Ceremony");
    assert_eq!(album["owner"], "alice");

    // Not visible to another principal.
    let res = app
      .clone()
      .oneshot(get_req(&format!("/albums/{id}"), "bob"))
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn identity_header_is_required_outside_shared_routes() {
    let app = app().await;

    let res = app
      .clone()
      .oneshot(Request::builder().uri("/albums").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn share_flow_over_http() {
    let app = app().await;

    let res = app
      .clone()
      .oneshot(json_req(
        "POST",
        "/albums",
        "alice",
        serde_json::json!({ "name": "Ceremony" }),
      ))
      .await
      .unwrap();
    let album_id = body_json(res).await["id"].as_str().unwrap().to_owned();

    let res = app
      .clone()
      .oneshot(json_req(
        "POST",
        &format!("/albums/{album_id}/share-links"),
        "alice",
        serde_json::json!({}),
      ))
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let share_id = body_json(res).await["share_id"]
      .as_str()
      .unwrap()
      .to_owned();

    // Shared read needs no identity header.
    let res = app
      .clone()
      .oneshot(
        Request::builder()
          .uri(format!("/shared/{share_id}"))
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["name"], "Ceremony");

    // Revoke, then the token is dead.
    let res = app
      .clone()
      .oneshot(
        Request::builder()
          .method("DELETE")
          .uri(format!("/share-links/{share_id}"))
          .header(PRINCIPAL_HEADER, "alice")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app
      .clone()
      .oneshot(
        Request::builder()
          .uri(format!("/shared/{share_id}"))
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn unknown_share_token_reads_as_404() {
    let app = app().await;
    let res = app
      .oneshot(
        Request::builder()
          .uri("/shared/bogus-token")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn invalid_reorder_maps_to_422() {
    let app = app().await;

    let res = app
      .clone()
      .oneshot(json_req(
        "POST",
        "/albums",
        "alice",
        serde_json::json!({ "name": "Ceremony" }),
      ))
      .await
      .unwrap();
    let album_id = body_json(res).await["id"].as_str().unwrap().to_owned();

    let res = app
      .clone()
      .oneshot(json_req(
        "PUT",
        &format!("/albums/{album_id}/order"),
        "alice",
        serde_json::json!({ "new_order": [uuid::Uuid::new_v4()] }),
      ))
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
  }
}
