//! API integration tests.
//!
//! These run against a live server with seeded accounts:
//! `librarian`/`librarian` (holds the staff permission) and
//! `patron`/`patron` (authenticated only). Run with:
//! `cargo test -- --ignored`

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get a token for a seeded account
async fn get_auth_token(client: &Client, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn staff_token(client: &Client) -> String {
    get_auth_token(client, "librarian", "librarian").await
}

/// Create a book through the API and return its id
async fn create_book(client: &Client, token: &str, title: &str, genre_ids: Vec<i64>) -> i64 {
    let language: Value = client
        .post(format!("{}/catalog/languages", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"name": "English"}))
        .send()
        .await
        .expect("Failed to create language")
        .json()
        .await
        .expect("Failed to parse language");

    let response = client
        .post(format!("{}/catalog/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "summary": "A test record",
            "isbn": "9780000000000",
            "genre": genre_ids,
            "language": language["id"]
        }))
        .send()
        .await
        .expect("Failed to create book");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse book");
    body["id"].as_i64().expect("No book id")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "librarian",
            "password": "librarian"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["can_mark_returned"], true);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "librarian",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_home_counts_and_visit_counter() {
    // Cookie store keeps the session id across requests
    let client = Client::builder().cookie_store(true).build().unwrap();

    let first: Value = client
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    for field in [
        "num_books",
        "num_authors",
        "num_instances",
        "num_instances_available",
        "num_books_featured",
    ] {
        assert!(first[field].is_number(), "missing count {}", field);
    }

    // A fresh session has seen zero prior visits; the next request one.
    let first_visits = first["num_visits"].as_i64().unwrap();
    let second: Value = client
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(second["num_visits"].as_i64().unwrap(), first_visits + 1);
}

#[tokio::test]
#[ignore]
async fn test_featured_count_matches_title_and_genre() {
    let client = Client::new();
    let token = staff_token(&client).await;

    let before: Value = client
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let before_count = before["num_books_featured"].as_i64().unwrap();

    let genre: Value = client
        .post(format!("{}/catalog/genres", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"name": "Fantasy"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let matching = create_book(
        &client,
        &token,
        "Harry Potter and the Test Fixture",
        vec![genre["id"].as_i64().unwrap()],
    )
    .await;
    // Same title, no matching genre: must not count
    let non_matching = create_book(&client, &token, "Harry Potter, Ungenred", vec![]).await;

    let after: Value = client
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        after["num_books_featured"].as_i64().unwrap(),
        before_count + 1
    );

    for id in [matching, non_matching] {
        client
            .delete(format!("{}/catalog/books/{}", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .unwrap();
    }
}

#[tokio::test]
#[ignore]
async fn test_write_requires_authentication() {
    let client = Client::new();

    let response = client
        .post(format!("{}/catalog/authors", BASE_URL))
        .json(&json!({
            "first_name": "No",
            "last_name": "Auth"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_write_requires_staff_permission() {
    let client = Client::new();
    let token = get_auth_token(&client, "patron", "patron").await;

    let response = client
        .post(format!("{}/catalog/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "No",
            "last_name": "Permission"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_author_crud_round_trip() {
    let client = Client::new();
    let token = staff_token(&client).await;

    let created: Value = client
        .post(format!("{}/catalog/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Ursula",
            "last_name": "Le Guin",
            "date_of_birth": "1929-10-21"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let updated = client
        .put(format!("{}/catalog/authors/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Ursula K.",
            "last_name": "Le Guin",
            "date_of_birth": "1929-10-21",
            "date_of_death": "2018-01-22"
        }))
        .send()
        .await
        .unwrap();
    assert!(updated.status().is_success());

    let fetched: Value = client
        .get(format!("{}/catalog/authors/{}", BASE_URL, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["first_name"], "Ursula K.");

    let deleted = client
        .delete(format!("{}/catalog/authors/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 204);

    let gone = client
        .get(format!("{}/catalog/authors/{}", BASE_URL, id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_author_update_reports_both_cross_field_errors() {
    let client = Client::new();
    let token = staff_token(&client).await;

    let response = client
        .post(format!("{}/catalog/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Sting",
            "last_name": "Sting",
            "date_of_birth": "1951-10-02",
            "date_of_death": "1950-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"]["date_of_death"][0]["code"], "InvalidDateOrder");
    assert_eq!(body["fields"]["last_name"][0]["code"], "DuplicateName");
}

#[tokio::test]
#[ignore]
async fn test_book_list_pagination() {
    let client = Client::new();
    let token = staff_token(&client).await;

    let mut created = Vec::new();
    for i in 0..25 {
        created.push(create_book(&client, &token, &format!("Pagination Fixture {:02}", i), vec![]).await);
    }

    let page1: Value = client
        .get(format!("{}/catalog/books?page=1&per_page=10", BASE_URL))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page1["items"].as_array().unwrap().len(), 10);
    assert!(page1["total"].as_i64().unwrap() >= 25);

    let last_page = (page1["total"].as_i64().unwrap() + 9) / 10;
    let tail: Value = client
        .get(format!(
            "{}/catalog/books?page={}&per_page=10",
            BASE_URL, last_page
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let tail_len = tail["items"].as_array().unwrap().len() as i64;
    assert_eq!(tail_len, page1["total"].as_i64().unwrap() - (last_page - 1) * 10);

    for id in created {
        client
            .delete(format!("{}/catalog/books/{}", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .unwrap();
    }
}

#[tokio::test]
#[ignore]
async fn test_renewal_round_trip() {
    let client = Client::new();
    let token = staff_token(&client).await;

    let book_id = create_book(&client, &token, "Renewal Fixture", vec![]).await;

    let instance: Value = client
        .post(format!("{}/catalog/instances", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book": book_id,
            "imprint": "Test Press, 2024"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let instance_id = instance["id"].as_str().unwrap().to_string();
    assert_eq!(instance["status"], "maintenance");

    // The unbound form proposes three weeks out and offers borrowers
    let form: Value = client
        .get(format!(
            "{}/catalog/instances/{}/renew",
            BASE_URL, instance_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let proposed = form["proposed_due_date"].as_str().unwrap();
    let expected = (Utc::now().date_naive() + Duration::weeks(3)).to_string();
    assert_eq!(proposed, expected);
    let borrower = form["borrowers"][0]["id"].as_i64().unwrap();

    let renewed: Value = client
        .post(format!(
            "{}/catalog/instances/{}/renew",
            BASE_URL, instance_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "new_due_date": proposed,
            "new_borrower": borrower
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(renewed["instance"]["due_back"], proposed);
    assert_eq!(renewed["instance"]["status"], "on_loan");
    assert_eq!(renewed["instance"]["borrower_id"].as_i64().unwrap(), borrower);

    // The copy now shows up in the all-borrowed listing
    let borrowed: Value = client
        .get(format!("{}/loans/borrowed?per_page=100", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<&str> = borrowed["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&instance_id.as_str()));

    client
        .delete(format!("{}/catalog/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn test_renewal_rejects_past_date() {
    let client = Client::new();
    let token = staff_token(&client).await;

    let book_id = create_book(&client, &token, "Past Renewal Fixture", vec![]).await;
    let instance: Value = client
        .post(format!("{}/catalog/instances", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book": book_id,
            "imprint": "Test Press, 2024"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let instance_id = instance["id"].as_str().unwrap().to_string();

    let yesterday = (Utc::now().date_naive() - Duration::days(1)).to_string();
    let form: Value = client
        .get(format!(
            "{}/catalog/instances/{}/renew",
            BASE_URL, instance_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let borrower = form["borrowers"][0]["id"].as_i64().unwrap();

    let response = client
        .post(format!(
            "{}/catalog/instances/{}/renew",
            BASE_URL, instance_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "new_due_date": yesterday,
            "new_borrower": borrower
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"]["new_due_date"][0]["code"], "DateTooEarly");

    // The copy is unchanged
    let unchanged: Value = client
        .get(format!("{}/catalog/instances/{}", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unchanged["status"], "maintenance");
    assert!(unchanged["due_back"].is_null());

    client
        .delete(format!("{}/catalog/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
}
