//! HTTP-level integration tests for the admin endpoints: dashboard,
//! user management, store management, and RBAC enforcement.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error_code, body_json, create_test_store, create_test_user, get_auth, post_json_auth,
    token_for,
};
use ratewise_db::models::store::CreateStore;
use ratewise_db::repositories::{RatingRepo, StoreRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// RBAC
// ---------------------------------------------------------------------------

/// A USER token on an admin route returns 403, not 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_routes_forbidden_for_users(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "pleb@test.com", "USER").await;
    let app = common::build_test_app(pool);
    let token = token_for(&user);

    for uri in ["/admin/dashboard", "/admin/users", "/admin/stores"] {
        let response = get_auth(app.clone(), uri, &token).await;
        assert_error_code(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Dashboard totals count only USER-role accounts, all stores, all ratings.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_dashboard_totals(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let (user, _) = create_test_user(&pool, "counted@test.com", "USER").await;
    create_test_user(&pool, "owner@test.com", "STORE_OWNER").await;
    let store = create_test_store(&pool, "Tallied", "tallied@stores.test", None).await;
    RatingRepo::upsert(&pool, user.id, store.id, 4)
        .await
        .expect("rating should succeed");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/admin/dashboard", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    // Admin and owner accounts are excluded from the user count.
    assert_eq!(json["data"]["total_users"], 1);
    assert_eq!(json["data"]["total_stores"], 1);
    assert_eq!(json["data"]["total_ratings"], 1);
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// Admins can create accounts with an explicit role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_with_role(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "minted@test.com",
        "password": "secret123",
        "name": "Minted Owner",
        "role": "STORE_OWNER"
    });
    let response = post_json_auth(app, "/admin/users", &token_for(&admin), body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "STORE_OWNER");
    assert!(json["data"].get("password_hash").is_none());
}

/// An unknown role spelling is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_unknown_role(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "odd@test.com",
        "password": "secret123",
        "name": "Odd",
        "role": "SUPERUSER"
    });
    let response = post_json_auth(app, "/admin/users", &token_for(&admin), body).await;
    assert_error_code(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

/// `create-admin` mints an ADMIN account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_admin(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Second Admin",
        "email": "admin2@test.com",
        "password": "secret123"
    });
    let response = post_json_auth(app, "/admin/create-admin", &token_for(&admin), body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "ADMIN");
}

/// User listing filters by role and embeds each user's owned stores.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users_filter_and_owned_stores(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let (owner, _) = create_test_user(&pool, "owner@test.com", "STORE_OWNER").await;
    create_test_user(&pool, "plain@test.com", "USER").await;
    create_test_store(&pool, "Owned Store", "owned@stores.test", Some(owner.id)).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/admin/users?role=STORE_OWNER",
        &token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let users = json["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "owner@test.com");
    assert_eq!(users[0]["stores"][0]["name"], "Owned Store");
    assert_eq!(json["data"]["pagination"]["total"], 1);
    assert_eq!(json["data"]["pagination"]["pages"], 1);
}

/// Pagination caps pages correctly: 3 users at limit 2 gives 2 pages.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users_pagination(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    for i in 0..3 {
        create_test_user(&pool, &format!("user{i}@test.com"), "USER").await;
    }

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/admin/users?role=USER&page=2&limit=2",
        &token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["users"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["pagination"]["page"], 2);
    assert_eq!(json["data"]["pagination"]["total"], 3);
    assert_eq!(json["data"]["pagination"]["pages"], 2);
}

/// User detail includes submitted ratings and owned stores; unknown ids 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_user_detail(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let (user, _) = create_test_user(&pool, "detailed@test.com", "USER").await;
    let store = create_test_store(&pool, "Judged", "judged@stores.test", None).await;
    RatingRepo::upsert(&pool, user.id, store.id, 5)
        .await
        .expect("rating should succeed");

    let app = common::build_test_app(pool);
    let token = token_for(&admin);

    let response = get_auth(app.clone(), &format!("/admin/users/{}", user.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "detailed@test.com");
    assert_eq!(json["data"]["ratings"][0]["value"], 5);
    assert_eq!(json["data"]["ratings"][0]["store_name"], "Judged");
    assert_eq!(json["data"]["stores"].as_array().unwrap().len(), 0);

    let response = get_auth(app, "/admin/users/999999", &token).await;
    assert_error_code(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Store management
// ---------------------------------------------------------------------------

/// Store creation succeeds once; duplicate names and emails conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_store_uniqueness(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let app = common::build_test_app(pool);
    let token = token_for(&admin);

    let body = serde_json::json!({ "name": "Unique Goods", "email": "unique@stores.test" });
    let response = post_json_auth(app.clone(), "/admin/stores", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let same_name =
        serde_json::json!({ "name": "Unique Goods", "email": "other@stores.test" });
    let response = post_json_auth(app.clone(), "/admin/stores", &token, same_name).await;
    assert_error_code(response, StatusCode::CONFLICT, "CONFLICT").await;

    let same_email =
        serde_json::json!({ "name": "Other Goods", "email": "unique@stores.test" });
    let response = post_json_auth(app, "/admin/stores", &token, same_email).await;
    assert_error_code(response, StatusCode::CONFLICT, "CONFLICT").await;
}

/// Store listing carries rounded averages and the owner's identity.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_stores_with_stats(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let (owner, _) = create_test_user(&pool, "owner@test.com", "STORE_OWNER").await;
    let store = create_test_store(&pool, "Stat Shop", "stat@stores.test", Some(owner.id)).await;

    // Three raters: 5, 5, 1 -> average 3.67 after rounding.
    for (email, value) in [("r1@test.com", 5), ("r2@test.com", 5), ("r3@test.com", 1)] {
        let (rater, _) = create_test_user(&pool, email, "USER").await;
        RatingRepo::upsert(&pool, rater.id, store.id, value)
            .await
            .expect("rating should succeed");
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/admin/stores", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let stores = json["data"]["stores"].as_array().unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0]["average_rating"], 3.67);
    assert_eq!(stores[0]["total_ratings"], 3);
    assert_eq!(stores[0]["owner_email"], "owner@test.com");
}

/// The `rating` query keeps only stores whose average meets the minimum.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_stores_min_rating_filter(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let top = create_test_store(&pool, "Top Rated", "top@stores.test", None).await;
    let low = create_test_store(&pool, "Low Rated", "low@stores.test", None).await;
    let (rater, _) = create_test_user(&pool, "rater@test.com", "USER").await;
    RatingRepo::upsert(&pool, rater.id, top.id, 5)
        .await
        .expect("rating should succeed");
    RatingRepo::upsert(&pool, rater.id, low.id, 2)
        .await
        .expect("rating should succeed");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/admin/stores?rating=4", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let stores = json["data"]["stores"].as_array().unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0]["name"], "Top Rated");
}

/// The `category` filter is an exact match.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_stores_category_filter(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    for (name, email, category) in [
        ("Bookworm", "books@stores.test", "books"),
        ("Grocer", "food@stores.test", "food"),
    ] {
        let input = CreateStore {
            name: name.to_string(),
            email: email.to_string(),
            address: None,
            category: Some(category.to_string()),
            phone: None,
            description: None,
            owner_id: None,
        };
        StoreRepo::create(&pool, &input)
            .await
            .expect("store creation should succeed");
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/admin/stores?category=books", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let stores = json["data"]["stores"].as_array().unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0]["name"], "Bookworm");
    assert_eq!(json["data"]["pagination"]["total"], 1);
}

/// `create-store-with-owner` creates both rows and links them.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_store_with_owner(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "store": { "name": "Linked Store", "email": "linked@stores.test" },
        "owner": {
            "name": "Linked Owner",
            "email": "linked-owner@test.com",
            "password": "secret123"
        }
    });
    let response =
        post_json_auth(app, "/admin/create-store-with-owner", &token_for(&admin), body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["owner"]["role"], "STORE_OWNER");
    assert_eq!(
        json["data"]["store"]["owner_id"],
        json["data"]["owner"]["id"]
    );
}

/// A duplicate owner email fails the whole operation: no store row appears.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_store_with_owner_conflict(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@test.com", "ADMIN").await;
    create_test_user(&pool, "taken@test.com", "STORE_OWNER").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "store": { "name": "Orphan Store", "email": "orphan@stores.test" },
        "owner": {
            "name": "Taken Owner",
            "email": "taken@test.com",
            "password": "secret123"
        }
    });
    let response =
        post_json_auth(app, "/admin/create-store-with-owner", &token_for(&admin), body).await;
    assert_error_code(response, StatusCode::CONFLICT, "CONFLICT").await;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stores")
        .fetch_one(&pool)
        .await
        .expect("count query should succeed");
    assert_eq!(count, 0, "no store may be created when the owner fails");
}
