use std::time::Duration;

use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;
use mongodb::Client;
use mongodb::bson::{self, Bson, doc};

use crate::database::connections::{DatabaseConfig, DatabaseConnection};
use crate::database::entity::post::PostDocument;
use crate::database::mongo_repo::MongoPostRepository;

/// Nothing listens on port 1, so server selection fails fast.
const UNREACHABLE: &str =
    "mongodb://127.0.0.1:1/blog?serverSelectionTimeoutMS=200&connectTimeoutMS=200";

fn sample_post() -> Post {
    Post::create(NewPost {
        title: Some("Jest Test".to_owned()),
        author: Some("Jest".to_owned()),
        contents: None,
        tags: vec!["jest".to_owned(), "mongodb".to_owned(), "jest".to_owned()],
    })
    .unwrap()
}

#[test]
fn test_document_layout() {
    let post = sample_post();
    let document = bson::to_document(&PostDocument::from(&post)).unwrap();

    assert_eq!(document.get_str("_id").unwrap(), post.id.to_string());
    assert_eq!(document.get_str("title").unwrap(), "Jest Test");
    assert!(matches!(document.get("createdAt"), Some(Bson::DateTime(_))));
    assert!(matches!(document.get("updatedAt"), Some(Bson::DateTime(_))));
    // Absent optional fields are not written.
    assert!(!document.contains_key("contents"));
}

#[test]
fn test_document_round_trip_keeps_tag_order() {
    let post = sample_post();
    let restored = Post::try_from(PostDocument::from(&post)).unwrap();

    assert_eq!(restored.id, post.id);
    assert_eq!(restored.tags, vec!["jest", "mongodb", "jest"]);
    assert_eq!(
        restored.created_at.timestamp_millis(),
        post.created_at.timestamp_millis()
    );
}

#[test]
fn test_document_without_tags_decodes_to_empty() {
    let now = bson::DateTime::now();
    let raw = doc! {
        "_id": uuid::Uuid::new_v4().to_string(),
        "title": "Hello",
        "createdAt": now,
        "updatedAt": now,
    };

    let document: PostDocument = bson::from_document(raw).unwrap();
    let post = Post::try_from(document).unwrap();

    assert!(post.tags.is_empty());
    assert!(post.author.is_none());
}

#[test]
fn test_invalid_id_is_a_query_error() {
    let mut document = PostDocument::from(&sample_post());
    document.id = "not-a-uuid".to_owned();

    let err = Post::try_from(document).unwrap_err();
    assert!(matches!(err, RepoError::Query(_)));
}

#[tokio::test]
async fn test_init_against_unreachable_server_is_a_connection_error() {
    let mut config = DatabaseConfig::new("mongodb://127.0.0.1:1/blog");
    config.connect_timeout = Duration::from_millis(200);

    let err = DatabaseConnection::init(&config).await.err().unwrap();
    assert!(matches!(err, RepoError::Connection(_)));
}

#[tokio::test]
async fn test_repository_reports_unreachable_store_as_connection_error() {
    let client = Client::with_uri_str(UNREACHABLE).await.unwrap();
    let repo = MongoPostRepository::with_collection(client.database("blog").collection("posts"));

    let err = repo.save(sample_post()).await.unwrap_err();
    assert!(matches!(err, RepoError::Connection(_)));

    let err = repo.find_by_id(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RepoError::Connection(_)));
}

/// Needs a running server: `MONGO_DB_LOCAL=mongodb://localhost:27017/blog cargo test -- --ignored`
#[tokio::test]
#[ignore = "requires a MongoDB server at MONGO_DB_LOCAL"]
async fn test_mongo_repository_round_trip() {
    let url = std::env::var("MONGO_DB_LOCAL").expect("MONGO_DB_LOCAL must be set");
    let conn = DatabaseConnection::init(&DatabaseConfig::new(url)).await.unwrap();

    // Scratch collection so runs never touch real posts.
    let collection = conn
        .db
        .collection::<PostDocument>(&format!("posts_test_{}", uuid::Uuid::new_v4().simple()));
    let repo = MongoPostRepository::with_collection(collection.clone());

    let post = sample_post();
    let saved = repo.save(post.clone()).await.unwrap();
    assert_eq!(saved.id, post.id);

    let found = repo.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(found.id, saved.id);
    assert_eq!(found.title, "Jest Test");
    assert_eq!(found.author.as_deref(), Some("Jest"));
    assert!(found.contents.is_none());
    assert_eq!(found.tags, vec!["jest", "mongodb", "jest"]);
    assert_eq!(found.created_at, saved.created_at);
    assert_eq!(found.updated_at, saved.updated_at);

    assert!(repo.find_by_id(uuid::Uuid::new_v4()).await.unwrap().is_none());

    let err = repo.save(post).await.unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));

    collection.drop().await.unwrap();
}
