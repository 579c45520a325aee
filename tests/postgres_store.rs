//! PostgreSQL store tests. Run only when `RIDDLE_TEST_DATABASE_URL` is set, e.g.
//! `RIDDLE_TEST_DATABASE_URL=postgres://localhost/riddle_test cargo test --test postgres_store`.

use riddle_api::model::RiddleProperty;
use riddle_api::pagination::Direction;
use riddle_api::{apply_migrations, ensure_database_exists, AppError, PageRequest, PgRiddleStore, Riddle, RiddleStore};

async fn store(schema: &str) -> Option<PgRiddleStore> {
    let url = std::env::var("RIDDLE_TEST_DATABASE_URL").ok()?;
    ensure_database_exists(&url).await.unwrap();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .unwrap();
    sqlx::query(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", schema))
        .execute(&pool)
        .await
        .unwrap();
    apply_migrations(&pool, schema).await.unwrap();
    Some(PgRiddleStore::new(pool, schema))
}

#[tokio::test]
async fn crud_round_trip() {
    let Some(store) = store("riddle_test_crud").await else {
        return;
    };
    store.ping().await.unwrap();

    let created = store.save(&Riddle::new("AAAAAAAAAA")).await.unwrap();
    let id = created.id.unwrap();
    assert_eq!(store.find_by_id(id).await.unwrap(), Some(created));

    let updated = store.save(&Riddle::with_id(id, "BBBBBBBBBB")).await.unwrap();
    assert_eq!(updated.name, "BBBBBBBBBB");
    assert_eq!(store.count().await.unwrap(), 1);

    let err = store.save(&Riddle::with_id(id + 1000, "x")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert!(store.delete_by_id(id).await.unwrap());
    assert!(!store.delete_by_id(id).await.unwrap());
    assert_eq!(store.find_by_id(id).await.unwrap(), None);

    let next = store.insert("next").await.unwrap();
    assert!(next.id.unwrap() > id);
}

#[tokio::test]
async fn pages_and_sorts() {
    let Some(store) = store("riddle_test_pages").await else {
        return;
    };
    for name in ["c", "a", "b"] {
        store.insert(name).await.unwrap();
    }

    let page = store.find_all(&PageRequest::new(0, 2)).await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].name, "c");

    let by_name = PageRequest::new(0, 10).sorted_by(RiddleProperty::Name, Direction::Asc);
    let names: Vec<String> = store
        .find_all(&by_name)
        .await
        .unwrap()
        .content
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    let last = store.find_all(&PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(last.content.len(), 1);
}
