// tests/git_tags_test.rs
use git2::{Oid, Repository};
use release_version::git::{Git2TagSource, TagSource};
use release_version::VersionResolver;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Helper function to setup a temporary git repo with one commit
fn setup_test_repo() -> (TempDir, Repository, Oid) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    fs::write(temp_dir.path().join("README.md"), b"Initial content\n")
        .expect("Could not write initial file");

    let commit_id = {
        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");
        let signature = repo.signature().expect("Could not get sig");

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            "Initial commit",
            &tree,
            &[],
        )
        .expect("Could not create commit")
    };

    (temp_dir, repo, commit_id)
}

fn tag(repo: &Repository, commit_id: Oid, name: &str) {
    let object = repo.find_object(commit_id, None).unwrap();
    repo.tag_lightweight(name, &object, false)
        .expect("Could not create tag");
}

fn sorted(mut tags: Vec<String>) -> Vec<String> {
    tags.sort();
    tags
}

#[test]
fn test_open_discovers_repository_from_subdirectory() {
    let (temp_dir, repo, commit_id) = setup_test_repo();
    tag(&repo, commit_id, "v1.0.0");

    let nested = temp_dir.path().join("module").join("src");
    fs::create_dir_all(&nested).unwrap();

    let source = Git2TagSource::open(&nested).expect("should discover the repository");
    assert_eq!(source.list_tags().unwrap(), vec!["v1.0.0".to_string()]);
    assert!(source.workdir().unwrap().is_some());
}

#[test]
fn test_open_outside_repository_fails() {
    let temp_dir = TempDir::new().unwrap();
    assert!(Git2TagSource::open(temp_dir.path()).is_err());
}

#[test]
fn test_resolve_from_repository_tags() {
    let (_temp_dir, repo, commit_id) = setup_test_repo();
    for name in ["v1.0.0", "v1.2.0", "v1.10.0", "v1.10.1-RC1"] {
        tag(&repo, commit_id, name);
    }

    let source = Git2TagSource::from_git2(repo);
    let tags = source.list_tags().unwrap();
    let resolution = VersionResolver::default().resolve(&tags, None).unwrap();

    assert_eq!(resolution.latest_tag.as_deref(), Some("v1.10.1-RC1"));
    assert_eq!(resolution.version, "1.10.2");
}

#[test]
fn test_annotated_tags_are_listed() {
    let (_temp_dir, repo, commit_id) = setup_test_repo();
    {
        let object = repo.find_object(commit_id, None).unwrap();
        let signature = repo.signature().unwrap();
        repo.tag("v2.0.0", &object, &signature, "release 2.0.0", false)
            .unwrap();
    }

    let source = Git2TagSource::from_git2(repo);
    assert_eq!(source.list_tags().unwrap(), vec!["v2.0.0".to_string()]);
}

#[test]
fn test_fetch_tags_from_remote() {
    let (upstream_dir, upstream, upstream_commit) = setup_test_repo();
    tag(&upstream, upstream_commit, "v3.0.0");
    tag(&upstream, upstream_commit, "v3.0.1");

    let (_local_dir, local, local_commit) = setup_test_repo();
    tag(&local, local_commit, "v0.1.0");
    local
        .remote("origin", upstream_dir.path().to_str().unwrap())
        .unwrap();

    let source = Git2TagSource::from_git2(local);
    source.fetch_tags("origin", false).expect("fetch should succeed");

    assert_eq!(
        sorted(source.list_tags().unwrap()),
        vec![
            "v0.1.0".to_string(),
            "v3.0.0".to_string(),
            "v3.0.1".to_string()
        ]
    );
}

#[test]
fn test_fetch_tags_replacing_local_tags() {
    let (upstream_dir, upstream, upstream_commit) = setup_test_repo();
    tag(&upstream, upstream_commit, "v3.0.0");

    let (_local_dir, local, local_commit) = setup_test_repo();
    tag(&local, local_commit, "v9.9.9");
    local
        .remote("origin", upstream_dir.path().to_str().unwrap())
        .unwrap();

    let source = Git2TagSource::from_git2(local);
    source.fetch_tags("origin", true).expect("fetch should succeed");

    let tags = source.list_tags().unwrap();
    assert_eq!(tags, vec!["v3.0.0".to_string()]);
    assert_eq!(
        VersionResolver::default()
            .resolve_next_version(&tags, None)
            .unwrap(),
        "3.0.1"
    );
}

#[test]
fn test_unreachable_remote_keeps_tag_history() {
    let (_local_dir, local, local_commit) = setup_test_repo();
    tag(&local, local_commit, "v3.4.5");
    local.remote("origin", "/nonexistent/repo.git").unwrap();

    let source = Git2TagSource::from_git2(local);
    assert!(source.fetch_tags("origin", true).is_err());

    let tags = source.list_tags().unwrap();
    assert_eq!(tags, vec!["v3.4.5".to_string()]);
    assert_eq!(
        VersionResolver::default()
            .resolve_next_version(&tags, None)
            .unwrap(),
        "3.4.6"
    );
}

#[test]
fn test_replacing_fetch_keeps_annotated_tags() {
    let (upstream_dir, upstream, upstream_commit) = setup_test_repo();
    {
        let object = upstream.find_object(upstream_commit, None).unwrap();
        let signature = upstream.signature().unwrap();
        upstream
            .tag("v4.0.0", &object, &signature, "release 4.0.0", false)
            .unwrap();
    }

    let (_local_dir, local, local_commit) = setup_test_repo();
    tag(&local, local_commit, "v0.0.1");
    local
        .remote("origin", upstream_dir.path().to_str().unwrap())
        .unwrap();

    let source = Git2TagSource::from_git2(local);
    source.fetch_tags("origin", true).unwrap();
    assert_eq!(source.list_tags().unwrap(), vec!["v4.0.0".to_string()]);

    // A second replacing fetch starts from a clean staging area
    source.fetch_tags("origin", true).unwrap();
    assert_eq!(source.list_tags().unwrap(), vec!["v4.0.0".to_string()]);
}
