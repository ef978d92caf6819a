mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{vehicle_form, with_token, TestApp};
use rental_admin::models::UserRole;
use rental_admin::services::password_service::{hash_password, verify_password};

#[tokio::test]
async fn test_create_user_never_returns_password() {
    let app = TestApp::new();
    let token = app.admin_token();

    for role in ["ADMIN", "OWNER", "CUSTOMER"] {
        let response = with_token(app.server.post("/users"), &token)
            .json(&json!({
                "name": "Dewi",
                "email": format!("dewi-{}@rental.test", role.to_lowercase()),
                "password": "rahasia123",
                "role": role
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
        assert_eq!(body["role"], role);
        assert_eq!(body["isVerifiedByAdmin"], false);
    }
}

#[tokio::test]
async fn test_create_user_requires_email_password_and_role() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = with_token(app.server.post("/users"), &token)
        .json(&json!({ "email": "no-role@rental.test", "password": "x" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Email, password, and role are required");
}

#[tokio::test]
async fn test_create_user_rejects_malformed_email() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = with_token(app.server.post("/users"), &token)
        .json(&json!({ "email": "not-an-email", "password": "x", "role": "OWNER" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_email_conflicts_and_keeps_one_record() {
    let app = TestApp::new();
    let token = app.admin_token();
    let before = app.users.count();
    let payload = json!({ "email": "budi@rental.test", "password": "pw", "role": "OWNER" });

    with_token(app.server.post("/users"), &token)
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let response = with_token(app.server.post("/users"), &token)
        .json(&payload)
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("already exists"));
    assert_eq!(app.users.count(), before + 1);
}

#[tokio::test]
async fn test_list_users_newest_first() {
    let app = TestApp::new();
    let token = app.admin_token();
    app.users.seed("older@rental.test", UserRole::Customer, None);
    app.users.seed("newer@rental.test", UserRole::Customer, None);

    let response = with_token(app.server.get("/users"), &token).await;

    response.assert_status(StatusCode::OK);
    let body: Vec<Value> = response.json();
    let emails: Vec<&str> = body.iter().map(|u| u["email"].as_str().unwrap()).collect();
    let newer = emails.iter().position(|e| *e == "newer@rental.test").unwrap();
    let older = emails.iter().position(|e| *e == "older@rental.test").unwrap();
    assert!(newer < older);
    assert!(body.iter().all(|u| u.get("password").is_none()));
}

#[tokio::test]
async fn test_get_user_not_found_and_malformed_id() {
    let app = TestApp::new();
    let token = app.admin_token();

    with_token(app.server.get(&format!("/users/{}", Uuid::new_v4())), &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    with_token(app.server.get("/users/not-a-uuid"), &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_without_password_keeps_hash() {
    let app = TestApp::new();
    let token = app.admin_token();
    let original = hash_password("lama123").await.unwrap();
    let user = app
        .users
        .seed("rina@rental.test", UserRole::Owner, Some(original.clone()));

    let response = with_token(app.server.put(&format!("/users/{}", user.id)), &token)
        .json(&json!({ "name": "Rina S.", "password": "" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "Rina S.");
    assert_eq!(app.users.get(user.id).unwrap().password_hash, Some(original));
}

#[tokio::test]
async fn test_update_with_password_rehashes() {
    let app = TestApp::new();
    let token = app.admin_token();
    let user = app.users.seed(
        "agus@rental.test",
        UserRole::Owner,
        Some(hash_password("lama123").await.unwrap()),
    );

    with_token(app.server.put(&format!("/users/{}", user.id)), &token)
        .json(&json!({ "password": "baru456" }))
        .await
        .assert_status(StatusCode::OK);

    let stored = app.users.get(user.id).unwrap().password_hash.unwrap();
    assert!(verify_password("baru456", &stored).await.unwrap());
    assert!(!verify_password("lama123", &stored).await.unwrap());
}

#[tokio::test]
async fn test_update_email_to_taken_email_conflicts() {
    let app = TestApp::new();
    let token = app.admin_token();
    app.users.seed("taken@rental.test", UserRole::Owner, None);
    let user = app.users.seed("mine@rental.test", UserRole::Owner, None);

    with_token(app.server.put(&format!("/users/{}", user.id)), &token)
        .json(&json!({ "email": "taken@rental.test" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let app = TestApp::new();
    let token = app.admin_token();

    with_token(app.server.put(&format!("/users/{}", Uuid::new_v4())), &token)
        .json(&json!({ "name": "Ghost" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let token = app.admin_token();

    with_token(app.server.post("/users"), &token)
        .content_type("application/json")
        .bytes("{not json".into())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user_returns_message() {
    let app = TestApp::new();
    let token = app.admin_token();
    let user = app.users.seed("hapus@rental.test", UserRole::Customer, None);

    let response = with_token(app.server.delete(&format!("/users/{}", user.id)), &token).await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "User hapus@rental.test deleted successfully");
    assert!(app.users.get(user.id).is_none());

    with_token(app.server.delete(&format!("/users/{}", user.id)), &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_who_owns_vehicles_conflicts() {
    let app = TestApp::new();
    let admin = app.admin_token();
    let (owner, owner_token) = app.token_for(UserRole::Owner);

    let response = with_token(app.server.post("/vehicles"), &owner_token)
        .multipart(vehicle_form("F5000EE"))
        .await;
    response.assert_status(StatusCode::CREATED);
    let vehicle: Value = response.json();
    let vehicle_id = vehicle["id"].as_str().unwrap();

    let response = with_token(app.server.delete(&format!("/users/{}", owner.id)), &admin).await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "CONFLICT");
    assert!(app.users.get(owner.id).is_some());

    with_token(app.server.delete(&format!("/vehicles/{}", vehicle_id)), &admin)
        .await
        .assert_status(StatusCode::OK);
    with_token(app.server.delete(&format!("/users/{}", owner.id)), &admin)
        .await
        .assert_status(StatusCode::OK);
    assert!(app.users.get(owner.id).is_none());
}
