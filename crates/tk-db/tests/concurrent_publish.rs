//! Version assignment with two handles writing to one database file.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tk_core::entities::{Publish, Task};
use tk_core::enums::Release;
use tk_db::TkDb;
use tk_db::repos::publish::PublishFilter;
use tk_db::retry::RetryConfig;
use tk_db::service::TkService;

struct Shared {
    _dir: TempDir,
    path: String,
}

fn shared_file() -> Shared {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tk.db").to_string_lossy().into_owned();
    Shared { _dir: dir, path }
}

async fn open(path: &str) -> TkService {
    TkService::new_local(path, RetryConfig::default())
        .await
        .unwrap()
}

async fn seed_task(svc: &TkService) -> Task {
    let project = svc.get_or_create_project("PRJ1", "Project One").await.unwrap();
    svc.set_project_root(&project, "/prod/PRJ1").await.unwrap();
    let chr = svc.get_or_create_asset_type("chr", "Character").await.unwrap();
    let asset = svc.get_or_create_asset(&project, &chr, "hero_knight").await.unwrap();
    let rig = svc.get_or_create_task_type("rig", "Rig").await.unwrap();
    svc.get_or_create_publish_type("geo_cache", "abc", ".abc")
        .await
        .unwrap();
    svc.get_or_create_task(&asset, &rig).await.unwrap()
}

async fn publish_three(svc: &TkService, task: &Task) -> Vec<Publish> {
    let mut created = Vec::new();
    for _ in 0..3 {
        created.push(
            svc.create_next_publish(task, "cache", "geo_cache", Release::Work)
                .await
                .unwrap(),
        );
    }
    created
}

fn versions(publishes: &[Publish]) -> Vec<i64> {
    let mut versions: Vec<i64> = publishes.iter().map(|p| p.version).collect();
    versions.sort_unstable();
    versions
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn writer_waits_for_held_lock_and_reads_committed_max() {
    let shared = shared_file();
    let writer = open(&shared.path).await;
    let task = seed_task(&writer).await;
    let publish_type = writer.get_publish_type("geo_cache").await.unwrap();

    // Another handle takes the write lock and inserts w001 without committing.
    let holder = TkDb::open_local(&shared.path).await.unwrap();
    let tx = holder
        .conn()
        .transaction_with_behavior(libsql::TransactionBehavior::Immediate)
        .await
        .unwrap();
    tx.execute(
        "INSERT INTO publishes (task_id, publish_type_id, code, path, version, release)
         VALUES (?1, ?2, 'cache', '/held/w001.abc', 1, 'work')",
        libsql::params![task.id, publish_type.id],
    )
    .await
    .unwrap();

    let pending = {
        let task = task.clone();
        tokio::spawn(async move {
            writer
                .create_next_publish(&task, "cache", "geo_cache", Release::Work)
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!pending.is_finished(), "writer should block on the held lock");
    tx.commit().await.unwrap();

    let publish = pending.await.unwrap().unwrap();
    assert_eq!(publish.version, 2);
    assert!(publish.path.ends_with("chr_hero_knight_cache_abc_w002.abc"));
}

#[tokio::test]
async fn two_handles_never_share_a_version() {
    let shared = shared_file();
    let a = open(&shared.path).await;
    let task = seed_task(&a).await;
    let b = open(&shared.path).await;

    let (from_a, from_b) = tokio::join!(publish_three(&a, &task), publish_three(&b, &task));
    assert_eq!(from_a.len() + from_b.len(), 6);

    let all = b
        .task_publishes(&task, &PublishFilter::default())
        .await
        .unwrap();
    assert_eq!(versions(&all), vec![1, 2, 3, 4, 5, 6]);
}
