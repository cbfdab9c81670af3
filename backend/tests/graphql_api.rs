//! GraphQL schema tests: pagination envelopes, filters and guards

mod common;

use async_graphql::{Request, Variables};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use tourbook::entities::{Location, Route};
use tourbook::orm::{Changes, insert};

use common::{register, test_state};

async fn seed_routes(state: &tourbook::AppState, count: usize) -> i64 {
    let pool = state.db.pool();
    let location = insert::<Location>(
        pool,
        Changes::new()
            .set("title", "Julian Alps")
            .set("description", "Limestone peaks above the Soca valley"),
    )
    .await
    .unwrap();
    for n in 0..count {
        insert::<Route>(
            pool,
            Changes::new()
                .set("title", format!("Route {:02}", n))
                .set("description", "Short description")
                .set("details", "Details that are at least twenty characters")
                .set("location_id", location),
        )
        .await
        .unwrap();
    }
    location
}

async fn execute(state: &tourbook::AppState, request: Request) -> (Value, Vec<async_graphql::ServerError>) {
    let response = state.schema.execute(request).await;
    (response.data.into_json().unwrap(), response.errors)
}

fn error_code(errors: &[async_graphql::ServerError]) -> Option<String> {
    let extensions = errors.first()?.extensions.as_ref()?;
    match extensions.get("code")? {
        async_graphql::Value::String(code) => Some(code.clone()),
        _ => None,
    }
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_routes_second_page_metadata() {
    let state = test_state().await;
    let location = seed_routes(&state, 12).await;

    let query = r#"
        query Routes($location: Int!) {
            routes(filters: { location: $location }, pagination: { number: 2, size: 5 }) {
                data { id title }
                pagination { total currentPage nextPage previousPage perPage totalPages }
            }
        }
    "#;
    let request = Request::new(query).variables(Variables::from_json(json!({ "location": location })));
    let (data, errors) = execute(&state, request).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(data["routes"]["data"].as_array().unwrap().len(), 5);
    assert_eq!(
        data["routes"]["pagination"],
        json!({
            "total": 12,
            "currentPage": 2,
            "nextPage": 3,
            "previousPage": 1,
            "perPage": 5,
            "totalPages": 3
        })
    );
}

#[tokio::test]
async fn test_last_page_has_no_neighbours() {
    let state = test_state().await;
    seed_routes(&state, 12).await;

    let query = "{ routes(pagination: { number: 3, size: 5 }) { data { id } pagination { nextPage previousPage } } }";
    let (data, errors) = execute(&state, Request::new(query)).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(data["routes"]["data"].as_array().unwrap().len(), 2);
    assert_eq!(data["routes"]["pagination"]["nextPage"], Value::Null);
    // The last page reports no previous page either
    assert_eq!(data["routes"]["pagination"]["previousPage"], Value::Null);
}

#[tokio::test]
async fn test_default_page_size_is_ten() {
    let state = test_state().await;
    seed_routes(&state, 12).await;

    let (data, errors) = execute(&state, Request::new("{ routes { data { id } pagination { perPage totalPages } } }")).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(data["routes"]["data"].as_array().unwrap().len(), 10);
    assert_eq!(data["routes"]["pagination"]["perPage"], json!(10));
    assert_eq!(data["routes"]["pagination"]["totalPages"], json!(2));
}

#[tokio::test]
async fn test_unbounded_page_size_returns_single_page() {
    let state = test_state().await;
    seed_routes(&state, 2).await;

    let query = "{ routes(pagination: { number: 1, size: 9223372036854775807 }) { data { id } pagination { total totalPages nextPage } } }";
    let (data, errors) = execute(&state, Request::new(query)).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(data["routes"]["data"].as_array().unwrap().len(), 2);
    assert_eq!(data["routes"]["pagination"]["total"], json!(2));
    assert_eq!(data["routes"]["pagination"]["totalPages"], json!(1));
    assert_eq!(data["routes"]["pagination"]["nextPage"], Value::Null);
}

#[tokio::test]
async fn test_title_filter_uses_wildcards() {
    let state = test_state().await;
    seed_routes(&state, 12).await;

    let query = r#"{ routes(filters: { title: "Route 1%" }) { data { title } pagination { total } } }"#;
    let (data, errors) = execute(&state, Request::new(query)).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(data["routes"]["pagination"]["total"], json!(2));
}

#[tokio::test]
async fn test_missing_route_is_not_found() {
    let state = test_state().await;

    let (_, errors) = execute(&state, Request::new("{ route(id: 404) { id } }")).await;

    assert_eq!(error_code(&errors).as_deref(), Some("NOT_FOUND"));
}

// ============================================================================
// Guards
// ============================================================================

const CREATE_LOCATION: &str = r#"
    mutation {
        createLocation(params: { title: "Dolomites", description: "Pale mountains with via ferratas" }) {
            id
            title
        }
    }
"#;

#[tokio::test]
async fn test_create_location_requires_authentication() {
    let state = test_state().await;

    let (_, errors) = execute(&state, Request::new(CREATE_LOCATION)).await;

    assert_eq!(error_code(&errors).as_deref(), Some("UNAUTHENTICATED"));
}

#[tokio::test]
async fn test_create_location_requires_admin() {
    let state = test_state().await;
    register(&state, "admin").await;
    let token = register(&state, "walker").await;
    let auth_user = state.auth.verify_access_token(&token).unwrap();

    let (_, errors) = execute(&state, Request::new(CREATE_LOCATION).data(auth_user)).await;

    assert_eq!(error_code(&errors).as_deref(), Some("FORBIDDEN"));
}

#[tokio::test]
async fn test_admin_creates_location() {
    let state = test_state().await;
    let token = register(&state, "admin").await;
    let admin = state.auth.verify_access_token(&token).unwrap();

    let (data, errors) = execute(&state, Request::new(CREATE_LOCATION).data(admin)).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(data["createLocation"]["title"], json!("Dolomites"));
}

#[tokio::test]
async fn test_invalid_input_reports_fields() {
    let state = test_state().await;
    let token = register(&state, "admin").await;
    let admin = state.auth.verify_access_token(&token).unwrap();

    let query = r#"mutation { createLocation(params: { title: "Ab", description: "too short" }) { id } }"#;
    let (_, errors) = execute(&state, Request::new(query).data(admin)).await;

    assert_eq!(error_code(&errors).as_deref(), Some("BAD_USER_INPUT"));
}

#[tokio::test]
async fn test_me_returns_the_caller() {
    let state = test_state().await;
    let token = register(&state, "admin").await;
    let admin = state.auth.verify_access_token(&token).unwrap();

    let (data, errors) = execute(&state, Request::new("{ me { username role } }").data(admin)).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(data["me"]["username"], json!("admin"));
    assert_eq!(data["me"]["role"], json!("ADMIN"));
}
