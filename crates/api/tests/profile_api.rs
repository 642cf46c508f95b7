//! HTTP-level integration tests for the profile endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json, post_json_auth, put_json_auth, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;
use senpai_core::category::Category;
use senpai_db::repositories::{FavoriteRepo, RecentItemRepo, UserRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_profile_with_counts(pool: PgPool) {
    let (app, user, token) = common::app_with_user(pool, "spike@bebop.dev").await;

    for id in ["1", "5"] {
        let body = json!({ "item_id": id, "title": format!("Anime {id}") });
        post_json_auth(app.clone(), "/api/v1/favorites/anime", body, &token).await;
    }
    let game = json!({ "item_id": "3498", "title": "GTA V", "metadata": { "rating": 9 } });
    post_json_auth(app.clone(), "/api/v1/favorites/games", game, &token).await;

    let response = get_auth(app, "/api/v1/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert_eq!(json["data"]["user"]["email"], "spike@bebop.dev");
    assert!(json["data"]["user"].get("password_hash").is_none());
    assert_eq!(
        json["data"]["favorites"],
        json!({ "anime": 2, "games": 1, "music": 0 })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile(pool: PgPool) {
    let (app, _user, token) = common::app_with_user(pool, "spike@bebop.dev").await;

    let body = json!({ "username": "Spike Spiegel", "bio": "Bang." });
    let response = put_json_auth(app.clone(), "/api/v1/profile/update", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "Spike Spiegel");
    assert_eq!(json["data"]["bio"], "Bang.");
    assert_eq!(json["data"]["email"], "spike@bebop.dev");

    // Omitted fields stay as they are.
    let body = json!({ "bio": "See you space cowboy" });
    let response = put_json_auth(app, "/api/v1/profile/update", body, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "Spike Spiegel");
    assert_eq!(json["data"]["bio"], "See you space cowboy");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_normalizes_email(pool: PgPool) {
    let (app, _user, token) = common::app_with_user(pool, "spike@bebop.dev").await;

    let body = json!({ "email": " New@Bebop.dev " });
    let response = put_json_auth(app, "/api/v1/profile/update", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "new@bebop.dev");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_rejects_bad_input(pool: PgPool) {
    common::create_verified_user(&pool, "jet@bebop.dev", "jet").await;
    let (app, _user, token) = common::app_with_user(pool, "spike@bebop.dev").await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/profile/update",
        json!({ "username": "  " }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/profile/update",
        json!({ "email": "not-an-email" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        "/api/v1/profile/update",
        json!({ "email": "Jet@Bebop.dev" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Email already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password(pool: PgPool) {
    let (app, _user, token) = common::app_with_user(pool, "spike@bebop.dev").await;

    let wrong = json!({ "current_password": "not-my-password", "new_password": "swordfish-ii" });
    let response = put_json_auth(app.clone(), "/api/v1/profile/change-password", wrong, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let weak = json!({ "current_password": TEST_PASSWORD, "new_password": "short" });
    let response = put_json_auth(app.clone(), "/api/v1/profile/change-password", weak, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let ok = json!({ "current_password": TEST_PASSWORD, "new_password": "swordfish-ii" });
    let response = put_json_auth(app.clone(), "/api/v1/profile/change-password", ok, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let old = json!({ "email": "spike@bebop.dev", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", old).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let new_token = common::login_token(app, "spike@bebop.dev", "swordfish-ii").await;
    assert!(!new_token.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_account_removes_everything(pool: PgPool) {
    let (app, user, token) = common::app_with_user(pool.clone(), "spike@bebop.dev").await;

    let favorite = json!({ "item_id": "1", "title": "Cowboy Bebop" });
    post_json_auth(app.clone(), "/api/v1/favorites/anime", favorite, &token).await;
    let view = json!({ "item_id": "1", "title": "Cowboy Bebop", "link": "https://example.com/1" });
    post_json_auth(app.clone(), "/api/v1/recent/anime", view, &token).await;

    let response = delete_auth(app.clone(), "/api/v1/profile/delete", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(UserRepo::find_by_id(&pool, user.id).await.unwrap().is_none());
    assert!(FavoriteRepo::list(&pool, user.id, Category::Anime)
        .await
        .unwrap()
        .is_empty());
    assert!(RecentItemRepo::list(&pool, user.id, Category::Anime)
        .await
        .unwrap()
        .is_empty());

    // The token outlives the account but no longer resolves to a user.
    let response = get_auth(app.clone(), "/api/v1/profile", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, "/api/v1/profile/delete", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
