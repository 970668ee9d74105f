mod support;

use postboard::api::{ApiClient, ApiError};
use postboard_types::{PostId, UserId};
use support::{spawn, Faults};

#[tokio::test]
async fn test_fetches_seeded_data() {
    let fixture = spawn(Faults::default()).await;
    let client = ApiClient::new(&fixture.base_url);

    let users = client.get_users().await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].company.name, "Romaguera-Crona");

    let posts = client.get_user_posts(Some(UserId(1))).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.user_id == UserId(1)));

    let user = client.get_user(Some(UserId(3))).await.unwrap();
    assert_eq!(user.name, "Clementine Bauch");

    let comments = client.get_post_comments(Some(PostId(1))).await.unwrap();
    assert_eq!(comments.len(), 2);

    assert_eq!(fixture.requests(), 4);
}

#[tokio::test]
async fn test_empty_collections_are_not_errors() {
    let fixture = spawn(Faults::default()).await;
    let client = ApiClient::new(&fixture.base_url);

    assert!(client.get_user_posts(Some(UserId(2))).await.unwrap().is_empty());
    assert!(client.get_post_comments(Some(PostId(3))).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_ids_issue_no_request() {
    let fixture = spawn(Faults::default()).await;
    let client = ApiClient::new(&fixture.base_url);

    assert!(matches!(
        client.get_user_posts(None).await,
        Err(ApiError::MissingId("user_id"))
    ));
    assert!(matches!(client.get_user(None).await, Err(ApiError::MissingId(_))));
    assert!(matches!(
        client.get_post_comments(None).await,
        Err(ApiError::MissingId("post_id"))
    ));

    assert_eq!(fixture.requests(), 0);
}

#[tokio::test]
async fn test_server_failures_are_errors() {
    let fixture = spawn(Faults {
        users: true,
        user: true,
        posts: true,
        comments: true,
        ..Faults::default()
    })
    .await;
    let client = ApiClient::new(&fixture.base_url);

    assert!(matches!(
        client.get_users().await,
        Err(ApiError::Api { status: 500, .. })
    ));
    assert!(matches!(
        client.get_user_posts(Some(UserId(1))).await,
        Err(ApiError::Api { status: 500, .. })
    ));
    assert!(matches!(
        client.get_user(Some(UserId(1))).await,
        Err(ApiError::Api { status: 500, .. })
    ));
    assert!(matches!(
        client.get_post_comments(Some(PostId(1))).await,
        Err(ApiError::Api { status: 500, .. })
    ));

    assert_eq!(fixture.requests(), 4);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let fixture = spawn(Faults::default()).await;
    let client = ApiClient::new(&fixture.base_url);

    assert!(matches!(
        client.get_user(Some(UserId(99))).await,
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_non_json_body_is_serialization_error() {
    let fixture = spawn(Faults {
        garbage_users: true,
        ..Faults::default()
    })
    .await;
    let client = ApiClient::new(&fixture.base_url);

    assert!(matches!(
        client.get_users().await,
        Err(ApiError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = ApiClient::new("http://127.0.0.1:9");
    assert!(matches!(client.get_users().await, Err(ApiError::Network(_))));
}
