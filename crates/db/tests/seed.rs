use mynotes_db::repositories::{FolderRepo, NoteRepo};
use mynotes_db::seed::seed_sample_data;
use sqlx::PgPool;

/// Seeding an empty store creates the sample hierarchy and welcome note.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_populates_empty_store(pool: PgPool) {
    mynotes_db::health_check(&pool).await.unwrap();

    assert!(seed_sample_data(&pool).await.unwrap());

    let tree = FolderRepo::list_top_level_tree(&pool).await.unwrap();
    let names: Vec<&str> = tree.iter().map(|f| f.folder.name.as_str()).collect();
    assert_eq!(names, vec!["Persönlich", "Arbeit", "Projekte"]);
    assert_eq!(tree[0].subfolders.len(), 2);
    assert_eq!(tree[1].subfolders.len(), 1);
    assert!(tree[2].subfolders.is_empty());

    let notes = NoteRepo::list(&pool, Some(tree[0].folder.id)).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Willkommen bei MyNotes!");
}

/// A second run leaves existing data alone.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_is_skipped_when_folders_exist(pool: PgPool) {
    assert!(seed_sample_data(&pool).await.unwrap());
    assert!(!seed_sample_data(&pool).await.unwrap());

    let all = FolderRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 6);
}
