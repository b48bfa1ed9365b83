use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

use carflow_rental::config::environment::EnvironmentConfig;
use carflow_rental::database::{seed::seed_vehicles, MemoryRecordStore};
use carflow_rental::{create_app_router, AppState};

struct TestApp {
    router: Router,
}

struct TestResponse {
    status: StatusCode,
    body: Value,
}

impl TestApp {
    async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, path, token, None).await
    }

    async fn post(&self, path: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, path, token, Some(body)).await
    }

    async fn put(&self, path: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, path, token, Some(body)).await
    }

    /// Registrar un usuario y devolver su token
    async fn signup(&self, email: &str, account_type: &str) -> String {
        let response = self
            .post(
                "/api/auth/signup",
                None,
                json!({
                    "first_name": "Test",
                    "last_name": "User",
                    "email": email,
                    "password": "supersecret",
                    "confirm_password": "supersecret",
                    "account_type": account_type
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Cliente con perfil completo, listo para reservar
    async fn bookable_customer(&self, email: &str) -> String {
        let token = self.signup(email, "customer").await;
        let response = self
            .put(
                "/api/profile",
                Some(&token),
                json!({ "phone": "+216 22 123 456", "address": "12 Rue de Marseille, Tunis" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        token
    }
}

async fn create_test_app() -> TestApp {
    let config = EnvironmentConfig {
        bcrypt_cost: 4,
        ..EnvironmentConfig::default()
    };
    let state = AppState::new(config, Arc::new(MemoryRecordStore::new()), seed_vehicles());
    TestApp {
        router: create_app_router(state),
    }
}

fn money(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

fn booking(vehicle_id: &str) -> Value {
    json!({
        "vehicle_id": vehicle_id,
        "start_date": "2024-01-01",
        "end_date": "2024-01-04",
        "add_ons": ["insurance"]
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_catalog_filters_from_query_string() {
    let app = create_test_app().await;

    let all = app.get("/api/vehicles", None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(ids(&all.body).len(), seed_vehicles().len());

    let suvs = app.get("/api/vehicles?type=SUV", None).await;
    assert_eq!(ids(&suvs.body), vec!["v2", "v6"]);

    let cheap_manual = app
        .get("/api/vehicles?type=all&transmission=Manual&max_price=70", None)
        .await;
    assert_eq!(ids(&cheap_manual.body), vec!["v1", "v4"]);

    let search = app.get("/api/vehicles?search=TUNIS", None).await;
    assert_eq!(ids(&search.body), vec!["v1", "v3", "v7"]);
}

#[tokio::test]
async fn test_bad_price_parameter_is_a_bad_request() {
    let app = create_test_app().await;
    let response = app.get("/api/vehicles?min_price=cheap", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_vehicle_detail_and_not_found() {
    let app = create_test_app().await;

    let detail = app.get("/api/vehicles/v2", None).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["data"]["brand"], "Kia");
    assert_eq!(detail.body["data"]["type"], "SUV");
    assert_eq!(detail.body["data"]["reviews"]["count"], 0);

    let missing = app.get("/api/vehicles/v404", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_quote_preview() {
    let app = create_test_app().await;
    let response = app
        .post(
            "/api/vehicles/v1/quote",
            None,
            json!({
                "start_date": "2024-01-01",
                "end_date": "2024-01-04",
                "add_ons": ["insurance"],
                "discount_code": "carflow10"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["rental_days"], 3);
    assert_eq!(money(&data["base_price"]), Decimal::new(210, 0));
    assert_eq!(money(&data["add_on_price"]), Decimal::new(75, 0));
    assert_eq!(money(&data["total_price"]), Decimal::new(2565, 1));
}

#[tokio::test]
async fn test_booking_requires_authentication() {
    let app = create_test_app().await;

    let anonymous = app.post("/api/reservations", None, booking("v1")).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body["code"], "AUTHENTICATION_REQUIRED");

    let bad_token = app
        .post("/api/reservations", Some("not-a-token"), booking("v1"))
        .await;
    assert_eq!(bad_token.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_booking_with_unparseable_date_asks_for_login() {
    let app = create_test_app().await;
    let mut body = booking("v1");
    body["start_date"] = json!("tomorrow");

    let create = app.post("/api/reservations", None, body.clone()).await;
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);
    assert_eq!(create.body["code"], "AUTHENTICATION_REQUIRED");

    let modify = app
        .put(
            "/api/reservations/00000000-0000-0000-0000-000000000000",
            None,
            json!({ "end_date": "next week" }),
        )
        .await;
    assert_eq!(modify.status, StatusCode::UNAUTHORIZED);
    assert_eq!(modify.body["code"], "AUTHENTICATION_REQUIRED");
}

#[tokio::test]
async fn test_booking_requires_complete_profile() {
    let app = create_test_app().await;
    let token = app.signup("noprofile@example.com", "customer").await;

    let response = app.post("/api/reservations", Some(&token), booking("v1")).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["code"], "INCOMPLETE_PROFILE");
    assert_eq!(
        response.body["details"]["missing_fields"],
        json!(["phone", "address"])
    );
}

#[tokio::test]
async fn test_customer_booking_lifecycle() {
    let app = create_test_app().await;
    let token = app.bookable_customer("amira@example.com").await;

    let created = app
        .post(
            "/api/reservations",
            Some(&token),
            json!({
                "vehicle_id": "v2",
                "start_date": "2024-01-01",
                "end_date": "2024-01-04",
                "add_ons": ["insurance"],
                "discount_code": "WRONG"
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);

    let reservation = &created.body["data"]["reservation"];
    assert_eq!(reservation["status"], "pending");
    assert_eq!(reservation["vehicle_name"], "Kia Sportage");
    // 120 × 3 + 25 × 3
    assert_eq!(money(&reservation["total_price"]), Decimal::new(435, 0));
    assert_eq!(
        created.body["data"]["warnings"][0]["code"],
        "INVALID_DISCOUNT_CODE"
    );
    let id = reservation["id"].as_str().unwrap().to_string();

    let mine = app.get("/api/reservations", Some(&token)).await;
    assert_eq!(ids(&mine.body), vec![id.clone()]);

    let modified = app
        .put(
            &format!("/api/reservations/{}", id),
            Some(&token),
            json!({ "end_date": "2024-01-06", "add_ons": [] }),
        )
        .await;
    assert_eq!(modified.status, StatusCode::OK, "{}", modified.body);
    assert_eq!(modified.body["data"]["rental_days"], 5);
    assert_eq!(money(&modified.body["data"]["total_price"]), Decimal::new(600, 0));

    let cancelled = app
        .post(&format!("/api/reservations/{}/cancel", id), Some(&token), json!({}))
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["data"]["status"], "cancelled");

    let again = app
        .post(&format!("/api/reservations/{}/cancel", id), Some(&token), json!({}))
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["data"]["status"], "cancelled");
}

#[tokio::test]
async fn test_other_customers_cannot_see_a_reservation() {
    let app = create_test_app().await;
    let owner = app.bookable_customer("owner@example.com").await;
    let stranger = app.bookable_customer("stranger@example.com").await;

    let created = app.post("/api/reservations", Some(&owner), booking("v1")).await;
    let id = created.body["data"]["reservation"]["id"].as_str().unwrap().to_string();

    let response = app.get(&format!("/api/reservations/{}", id), Some(&stranger)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["code"], "NOT_OWNER");
}

#[tokio::test]
async fn test_agency_confirms_and_controls_availability() {
    let app = create_test_app().await;
    let customer = app.bookable_customer("client@example.com").await;
    let agency = app.signup("agence@example.com", "agency").await;

    let created = app.post("/api/reservations", Some(&customer), booking("v3")).await;
    let id = created.body["data"]["reservation"]["id"].as_str().unwrap().to_string();
    let status_path = format!("/api/agency/reservations/{}/status", id);

    let forbidden = app
        .put(&status_path, Some(&customer), json!({ "status": "confirmed" }))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let skipped = app
        .put(&status_path, Some(&agency), json!({ "status": "completed" }))
        .await;
    assert_eq!(skipped.status, StatusCode::CONFLICT);
    assert_eq!(skipped.body["code"], "INVALID_STATUS_TRANSITION");

    let confirmed = app
        .put(&status_path, Some(&agency), json!({ "status": "confirmed" }))
        .await;
    assert_eq!(confirmed.status, StatusCode::OK);
    assert_eq!(confirmed.body["data"]["status"], "confirmed");

    let all = app.get("/api/agency/reservations", Some(&agency)).await;
    assert_eq!(ids(&all.body), vec![id]);

    let hidden = app
        .put(
            "/api/agency/vehicles/v1/availability",
            Some(&agency),
            json!({ "available": false }),
        )
        .await;
    assert_eq!(hidden.status, StatusCode::OK);

    let rejected = app.post("/api/reservations", Some(&customer), booking("v1")).await;
    assert_eq!(rejected.status, StatusCode::CONFLICT);
    assert_eq!(rejected.body["code"], "VEHICLE_UNAVAILABLE");
}

#[tokio::test]
async fn test_agency_fleet_management() {
    let app = create_test_app().await;
    let agency = app.signup("fleet@example.com", "agency").await;

    let added = app
        .post(
            "/api/agency/vehicles",
            Some(&agency),
            json!({
                "id": "v9",
                "brand": "Dacia",
                "model": "Duster",
                "year": 2023,
                "type": "SUV",
                "seats": 5,
                "transmission": "Manual",
                "fuel": "Diesel",
                "price_per_day": "85",
                "location": "Bizerte"
            }),
        )
        .await;
    assert_eq!(added.status, StatusCode::CREATED, "{}", added.body);

    let suvs = app.get("/api/vehicles?type=SUV", None).await;
    assert_eq!(ids(&suvs.body), vec!["v2", "v6", "v9"]);

    let removed = app
        .request(Method::DELETE, "/api/agency/vehicles/v9", Some(&agency), None)
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(app.get("/api/vehicles/v9", None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quote_on_out_of_range_price_is_a_bad_request() {
    let app = create_test_app().await;
    let agency = app.signup("limits@example.com", "agency").await;

    let added = app
        .post(
            "/api/agency/vehicles",
            Some(&agency),
            json!({
                "id": "v-max",
                "brand": "Bugatti",
                "model": "Chiron",
                "year": 2023,
                "type": "Sports",
                "seats": 2,
                "transmission": "Automatic",
                "fuel": "Gasoline",
                "price_per_day": Decimal::MAX.to_string(),
                "location": "Tunis"
            }),
        )
        .await;
    assert_eq!(added.status, StatusCode::CREATED, "{}", added.body);

    let response = app
        .post(
            "/api/vehicles/v-max/quote",
            None,
            json!({ "start_date": "2024-01-01", "end_date": "2024-01-04" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_reviews_flow() {
    let app = create_test_app().await;

    let anonymous = app
        .post("/api/vehicles/v5/reviews", None, json!({ "rating": 5, "comment": "Lovely" }))
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let token = app.signup("reviewer@example.com", "customer").await;
    let invalid = app
        .post("/api/vehicles/v5/reviews", Some(&token), json!({ "rating": 7, "comment": "Wow" }))
        .await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);

    for (rating, comment) in [(4, "Fun in the sun"), (5, "Best weekend ever")] {
        let response = app
            .post(
                "/api/vehicles/v5/reviews",
                Some(&token),
                json!({ "rating": rating, "comment": comment }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let listed = app.get("/api/vehicles/v5/reviews", None).await;
    assert_eq!(listed.body["data"]["summary"]["count"], 2);
    assert_eq!(listed.body["data"]["summary"]["average"], 4.5);
    assert_eq!(listed.body["data"]["reviews"][0]["comment"], "Best weekend ever");
}

#[tokio::test]
async fn test_signup_and_login() {
    let app = create_test_app().await;
    app.signup("login@example.com", "customer").await;

    let duplicate = app
        .post(
            "/api/auth/signup",
            None,
            json!({
                "first_name": "Other",
                "email": "LOGIN@example.com",
                "password": "supersecret",
                "confirm_password": "supersecret"
            }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let wrong = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "login@example.com", "password": "nope-nope" }),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let ok = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "login@example.com", "password": "supersecret" }),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    let token = ok.body["data"]["token"].as_str().unwrap().to_string();

    let profile = app.get("/api/profile", Some(&token)).await;
    assert_eq!(profile.body["data"]["email"], "login@example.com");
    assert_eq!(profile.body["data"]["role"], "customer");
    assert!(profile.body["data"].get("password_hash").is_none());
}
