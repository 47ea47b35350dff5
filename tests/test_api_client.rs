use httpmock::prelude::*;
use pantry_tracker::cli::SortOrder;
use pantry_tracker::config::ClientConfig;
use pantry_tracker::{
    ApiClient, ApiError, ListOptions, PantryFilter, PantryItem, Product, ProductCategory,
    ProductFilter, User, UserFilter,
};
use serde_json::json;

fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig {
        api_url: format!("{}/api", server.base_url()),
        ..ClientConfig::default()
    };
    ApiClient::new(&config).unwrap()
}

fn chicken_json() -> serde_json::Value {
    json!({
        "_id": "fried chicken_id",
        "name": "fried chicken",
        "description": "Delicious fried chicken legs and wings",
        "brand": "KFC",
        "category": "deli",
        "store": "willeys",
        "location": "UMM Student Center Store",
        "notes": "chicken",
        "tags": "fried",
        "lifespan": 2,
        "threshold": 23
    })
}

#[tokio::test]
async fn test_list_sends_filter_and_sort_params() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/product")
                .query_param("name", "chicken")
                .query_param("brand", "kfc")
                .query_param("sortby", "name")
                .query_param("sortorder", "desc");
            then.status(200).json_body(json!([chicken_json()]));
        })
        .await;

    let filter = ProductFilter::new()
        .with_name(Some("chicken"))
        .with_brand(Some("kfc"));
    let options = ListOptions {
        sort_by: Some("name".to_string()),
        sort_order: SortOrder::Desc,
    };

    let products: Vec<Product> = client_for(&server).list(&filter, &options).await.unwrap();
    mock.assert_async().await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "fried chicken");
    assert_eq!(products[0].category, ProductCategory::Deli);
}

#[tokio::test]
async fn test_list_with_empty_filter_sends_no_params() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/pantry");
            then.status(200).json_body(json!([]));
        })
        .await;

    let items: Vec<PantryItem> = client_for(&server)
        .list(&PantryFilter::new(), &ListOptions::default())
        .await
        .unwrap();
    mock.assert_async().await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_get_by_id_returns_none_on_404() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users/no_such_id");
            then.status(404);
        })
        .await;

    let user: Option<User> = client_for(&server).get_by_id("no_such_id").await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_server_error_is_reported_with_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users");
            then.status(500);
        })
        .await;

    let result = client_for(&server)
        .list::<User>(&UserFilter::new(), &ListOptions::default())
        .await;
    match result {
        Err(ApiError::Status { method, status, .. }) => {
            assert_eq!(method, "GET");
            assert_eq!(status, 500);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_add_posts_entity_and_returns_assigned_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/pantry")
                .json_body_includes(r#"{ "prodID": "pog_id", "name": "Pog" }"#);
            then.status(201).json_body(json!({ "id": "new_item_id" }));
        })
        .await;

    let item = PantryItem {
        id: String::new(),
        product_id: "pog_id".to_string(),
        name: "Pog".to_string(),
        date: "May 15, 2022".to_string(),
        notes: String::new(),
        tags: String::new(),
    };

    let id = client_for(&server).add(&item).await.unwrap();
    mock.assert_async().await;
    assert_eq!(id, "new_item_id");
}

#[tokio::test]
async fn test_add_rejects_invalid_entity_before_any_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/product");
            then.status(201).json_body(json!({ "id": "x" }));
        })
        .await;

    let product = Product {
        id: String::new(),
        name: "x".to_string(), // too short
        description: "some description".to_string(),
        brand: "KFC".to_string(),
        category: ProductCategory::Deli,
        store: "willeys".to_string(),
        location: "aisle 3".to_string(),
        notes: "notes".to_string(),
        tags: String::new(),
        lifespan: 1,
        threshold: 1,
        image: None,
    };

    let result = client_for(&server).add(&product).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
    assert_eq!(mock.calls_async().await, 0);
}

#[tokio::test]
async fn test_add_then_get_round_trips_submitted_fields() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/users");
            then.status(201).json_body(json!({ "id": "pat_id" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users/pat_id");
            then.status(200).json_body(json!({
                "_id": "pat_id",
                "name": "Pat",
                "age": 37,
                "company": "IBM",
                "email": "pat@something.com",
                "role": "editor"
            }));
        })
        .await;

    let submitted = User {
        id: String::new(),
        name: "Pat".to_string(),
        age: 37,
        company: "IBM".to_string(),
        email: "pat@something.com".to_string(),
        role: pantry_tracker::UserRole::Editor,
    };

    let client = client_for(&server);
    let id = client.add(&submitted).await.unwrap();
    assert_eq!(id, "pat_id");

    let fetched: User = client.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(fetched.name, submitted.name);
    assert_eq!(fetched.age, submitted.age);
    assert_eq!(fetched.company, submitted.company);
    assert_eq!(fetched.email, submitted.email);
    assert_eq!(fetched.role, submitted.role);
}

#[tokio::test]
async fn test_remove_distinguishes_missing_from_deleted() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/shoppinglist/gone_id");
            then.status(404);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/shoppinglist/real_id");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    assert!(
        !client
            .remove::<pantry_tracker::ShoppingListEntry>("gone_id")
            .await
            .unwrap()
    );
    assert!(
        client
            .remove::<pantry_tracker::ShoppingListEntry>("real_id")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_client_side_filter_refines_fetched_collection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/product");
            then.status(200).json_body(json!([
                chicken_json(),
                {
                    "_id": "bread_id",
                    "name": "Wheat Bread",
                    "description": "A loaf of wheat bread",
                    "brand": "Country Hearth",
                    "category": "bakery",
                    "store": "willeys",
                    "location": "aisle 2",
                    "notes": "bread",
                    "tags": "",
                    "lifespan": 7,
                    "threshold": 3
                }
            ]));
        })
        .await;

    let client = client_for(&server);
    let products: Vec<Product> = client
        .list(&ProductFilter::new(), &ListOptions::default())
        .await
        .unwrap();
    assert_eq!(products.len(), 2);

    let refined = client.filter(&products, &ProductFilter::new().with_name(Some("bread")));
    assert_eq!(refined.len(), 1);
    assert_eq!(refined[0].name, "Wheat Bread");
}
