use careerbot_core::models::chat::ChatTurn;
use careerbot_core::models::student::NewStudent;
use careerbot_storage::error::StorageError;
use careerbot_storage::store::{self, DocumentStore, MemoryStore};
use careerbot_storage::{chats, students};
use uuid::Uuid;

fn asha() -> NewStudent {
    NewStudent {
        name: "Asha".to_string(),
        class: "10".to_string(),
        interests: "Science".to_string(),
        location: "Delhi".to_string(),
    }
}

fn transcript(len: usize) -> Vec<careerbot_core::models::chat::ChatMessage> {
    (0..len)
        .map(|i| {
            let turn = if i % 2 == 0 {
                ChatTurn::user(format!("question {i}"))
            } else {
                ChatTurn::assistant(format!("answer {i}"))
            };
            turn.stamped(jiff::Timestamp::now())
        })
        .collect()
}

#[tokio::test]
async fn created_student_round_trips_unchanged() {
    let store = MemoryStore::default();

    let created = students::create(&store, asha()).await.unwrap();
    assert_eq!(created.name, "Asha");
    assert_eq!(created.class, "10");
    assert_eq!(created.interests, "Science");
    assert_eq!(created.location, "Delhi");

    let fetched = students::get(&store, created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn each_registration_gets_a_fresh_id() {
    let store = MemoryStore::default();
    let a = students::create(&store, asha()).await.unwrap();
    let b = students::create(&store, asha()).await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn invalid_student_is_not_written() {
    let store = MemoryStore::default();
    let err = students::create(
        &store,
        NewStudent {
            interests: " ".to_string(),
            ..asha()
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, StorageError::Validation(_)));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let store = MemoryStore::default();
    let err = students::get(&store, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn every_save_creates_a_new_snapshot() {
    let store = MemoryStore::default();
    let student_id = Uuid::new_v4();

    let first = chats::insert(&store, student_id, transcript(2)).await.unwrap();
    let second = chats::insert(&store, student_id, transcript(3)).await.unwrap();
    assert_ne!(first.id, second.id);

    let saved = chats::list_for_student(&store, student_id).await.unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].messages.len(), 2);
    assert_eq!(saved[1].messages.len(), 3);
}

#[tokio::test]
async fn snapshots_are_scoped_to_their_student() {
    let store = MemoryStore::default();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    chats::insert(&store, a, transcript(1)).await.unwrap();
    chats::insert(&store, b, transcript(1)).await.unwrap();

    assert_eq!(chats::list_for_student(&store, a).await.unwrap().len(), 1);
    assert!(chats::list_for_student(&store, Uuid::new_v4())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn memory_list_respects_prefix_boundaries() {
    let store = MemoryStore::default();
    store.put("chats/a/1.json", b"{}".to_vec()).await.unwrap();
    store.put("chats/ab/2.json", b"{}".to_vec()).await.unwrap();
    store.put("students/x.json", b"{}".to_vec()).await.unwrap();

    let keys = store.list("chats/a/").await.unwrap();
    assert_eq!(keys, vec!["chats/a/1.json".to_string()]);
}

#[tokio::test]
async fn open_accepts_memory_and_rejects_unknown_schemes() {
    assert!(store::open("memory://").await.is_ok());
    assert!(matches!(
        store::open("mongodb://localhost:27017/career-chatbot").await,
        Err(StorageError::UnsupportedUrl(_))
    ));
    assert!(matches!(
        store::open("s3://").await,
        Err(StorageError::UnsupportedUrl(_))
    ));
}

/// Round trip against a real bucket. Requires AWS credentials and
/// `CAREERBOT_TEST_BUCKET`.
///
/// Run with: `cargo test -p careerbot-storage --test collections -- --ignored`
#[tokio::test]
#[ignore]
async fn s3_round_trip() {
    let bucket = std::env::var("CAREERBOT_TEST_BUCKET").expect("CAREERBOT_TEST_BUCKET not set");
    let store = store::open(&format!("s3://{bucket}")).await.unwrap();

    let created = students::create(store.as_ref(), asha()).await.unwrap();
    let fetched = students::get(store.as_ref(), created.id).await.unwrap();
    assert_eq!(fetched, created);
}
