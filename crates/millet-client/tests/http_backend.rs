use std::sync::Arc;

use millet_api::AppStateInner;
use millet_client::{
    AuthState, Backend, ClientConfig, ClientError, ConsumerDashboard, FarmerDashboard,
    HttpBackend, Session, SessionStore,
};
use millet_core::MilletFilter;
use millet_db::Database;
use millet_types::api::SignUpRequest;
use millet_types::{MilletType, NewProduct, ProductStatus, Role};

/// Serve the full API on a loopback port and point a client at it.
async fn serve() -> HttpBackend {
    let db = Database::open_in_memory().unwrap();
    let app = millet_api::router(Arc::new(AppStateInner::new(db, "test-secret")));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpBackend::new(&ClientConfig {
        base_url: format!("http://{addr}"),
        ..ClientConfig::default()
    })
}

fn signup(email: &str, role: Role) -> SignUpRequest {
    SignUpRequest {
        email: email.to_string(),
        password: "secret123".to_string(),
        full_name: format!("{role} {email}"),
        role,
        phone: None,
        location: Some("Mandya".to_string()),
        age: Some(30),
        language_preference: None,
        health_preferences: None,
    }
}

async fn account(backend: &HttpBackend, email: &str, role: Role) -> Session {
    SessionStore::new()
        .sign_up(backend, &signup(email, role))
        .await
        .unwrap()
}

#[tokio::test]
async fn marketplace_round_trip_over_http() {
    let backend = serve().await;

    let farmers = SessionStore::new();
    let farmer = farmers
        .sign_up(&backend, &signup("ravi@farm.in", Role::Farmer))
        .await
        .unwrap();
    assert_eq!(farmer.role(), Some(Role::Farmer));

    let dup = farmers
        .sign_up(&backend, &signup("ravi@farm.in", Role::Farmer))
        .await
        .unwrap_err();
    assert!(matches!(dup, ClientError::Auth(ref m) if m == "User already registered"));

    let mut farm = FarmerDashboard::new(&ClientConfig::default());
    let listed = NewProduct::new(MilletType::Foxtail, 10.0, 65.0, Some("Organic".to_string())).unwrap();
    let product = farm.add_product(&backend, &farmer, &listed).await.unwrap();
    let other = NewProduct::new(MilletType::Finger, 4.0, 58.0, None).unwrap();
    farm.add_product(&backend, &farmer, &other).await.unwrap();
    assert_eq!(farm.products().len(), 2);

    let consumer = account(&backend, "asha@home.in", Role::Consumer).await;
    let mut shop = ConsumerDashboard::new();
    shop.refresh(&backend, &consumer).await;
    shop.set_filter(MilletFilter::Only(MilletType::Foxtail));
    assert_eq!(shop.visible_products().len(), 1);
    assert_eq!(shop.visible_products()[0].id, product.id);
    assert!(shop.farmer(farmer.user_id).is_some());

    let adopted = shop.adopt(&backend, &consumer, farmer.user_id).await.unwrap();
    assert_eq!(adopted.points_awarded, 50);
    assert!(shop.is_adopted(farmer.user_id));
    assert_eq!(shop.total_rewards(), 50);

    farm.refresh(&backend, &farmer).await;
    assert_eq!(farm.notifications().len(), 1);
    assert_eq!(farm.unread_count(), 1);
    assert_eq!(farm.predictions().len(), 5);

    let err = backend
        .delete_product(&consumer.token, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 403, .. }));

    farm.delete_product(&backend, &farmer, product.id).await.unwrap();
    assert_eq!(farm.products().len(), 1);
    let err = farm
        .set_product_status(&backend, &farmer, product.id, ProductStatus::Unavailable)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
}

#[tokio::test]
async fn credentials_and_tokens_fail_differently() {
    let backend = serve().await;
    account(&backend, "ravi@farm.in", Role::Farmer).await;

    let store = SessionStore::new();
    let err = store
        .sign_in(&backend, "ravi@farm.in", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Auth(ref m) if m == "Invalid login credentials"));

    let err = backend.rewards("not-a-token").await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired(_)));

    assert_eq!(store.restore(&backend, "not-a-token").await, None);
    assert_eq!(*store.subscribe().borrow(), AuthState::SignedOut);
}

#[tokio::test]
async fn sign_out_and_restore_over_http() {
    let backend = serve().await;
    let store = SessionStore::new();
    let session = store
        .sign_up(&backend, &signup("asha@home.in", Role::Consumer))
        .await
        .unwrap();

    // Logout answers 204 with no body.
    store.sign_out(&backend).await.unwrap();
    assert_eq!(store.current(), None);

    let restored = store.restore(&backend, &session.token).await.unwrap();
    assert_eq!(restored.user_id, session.user_id);
    assert_eq!(restored.role(), Some(Role::Consumer));
}
