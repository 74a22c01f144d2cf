use faultline_error::{Domain, Failure, FailureKind, PropagateExt, Subkind};
use faultline_repo::{RepoError, Repository};
use faultline_store::{FsStore, MemoryStore, StoreError};
use pretty_assertions::assert_eq;

async fn fs_repo() -> (tempfile::TempDir, Repository<FsStore>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FsStore::open(dir.path()).await.expect("open store");
    (dir, Repository::new(store))
}

#[tokio::test]
async fn missing_file_surfaces_as_repository_failure() {
    let (_dir, repo) = fs_repo().await;

    let failure: Failure = repo.load("orders").await.unwrap_err().into();

    assert_eq!(failure.domain(), &Domain::REPOSITORY);
    assert!(failure.is(FailureKind::RecoverableExternal, Some(&Subkind::NOT_FOUND)));
    assert!(failure.message().contains("orders"));

    let cause = failure.cause().expect("storage cause retained");
    assert_eq!(cause.domain(), &Domain::STORAGE);
    assert_eq!(cause.message(), "resource `orders` not found");
}

#[tokio::test]
async fn io_failure_is_translated_with_original_message() {
    let (dir, repo) = fs_repo().await;
    std::fs::create_dir(dir.path().join("folder")).expect("mkdir");

    let err = repo.load("folder").await.unwrap_err();
    let RepoError::Unavailable { source, .. } = &err else {
        panic!("expected Unavailable, got {err:?}");
    };
    let original_message = source.to_string();

    let failure: Failure = err.into();
    assert_eq!(failure.domain(), &Domain::REPOSITORY);
    assert_eq!(failure.message(), "record `folder` is unavailable");
    assert_eq!(failure.cause().expect("cause").message(), original_message);
    assert!(failure.any_in_chain(|f| f.domain() == &Domain::STORAGE));
}

#[tokio::test]
async fn storage_failure_kinds_survive_translation() {
    let store = MemoryStore::with_entries([("ledger", "10")]);
    store.fail_with(
        "ledger",
        StoreError::FileOperation {
            operation: "read",
            path: "/mnt/remote/ledger".into(),
            source: std::sync::Arc::new(std::io::Error::from(
                std::io::ErrorKind::ConnectionRefused,
            )),
            kind: std::io::ErrorKind::ConnectionRefused,
        },
    );
    let repo = Repository::new(store);

    let failure: Failure = repo.counter("ledger").await.unwrap_err().into();
    assert!(failure.is(FailureKind::RecoverableExternal, Some(&Subkind::UNREACHABLE)));
    assert_eq!(failure.domain(), &Domain::REPOSITORY);
}

#[tokio::test]
async fn caller_can_translate_again_at_its_own_boundary() {
    let (_dir, repo) = fs_repo().await;

    let result = repo
        .load("settings")
        .await
        .translate_to(Domain::CLI, "could not load settings");
    let failure = result.unwrap_err();

    let domains: Vec<&str> = failure.chain().map(|f| f.domain().as_str()).collect();
    assert_eq!(domains, vec!["cli", "repository", "storage"]);
    assert_eq!(failure.root_cause().message(), "resource `settings` not found");
}

#[tokio::test]
async fn fatal_storage_failure_reaches_the_caller_unchanged() {
    let store = MemoryStore::new();
    store.fail_with("ledger", StoreError::Corrupted("free list loops".into()));
    let repo = Repository::new(store);

    let failure = repo
        .load("ledger")
        .await
        .translate_to(Domain::CLI, "this must not hide a fatal failure")
        .unwrap_err();
    assert!(failure.is_fatal());
    assert_eq!(failure.domain(), &Domain::STORAGE);
    assert_eq!(failure.message(), "store index corrupted: free list loops");
}
