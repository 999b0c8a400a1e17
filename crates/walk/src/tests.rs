use super::*;
use crate::frame::TraversalFrame;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn collect_relative_paths(walker: TreeWalker) -> Vec<PathBuf> {
    walker
        .map(|entry| entry.expect("walk entry").relative_path().to_path_buf())
        .collect()
}

fn sample_tree() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::write(root.join("a"), b"a").expect("write a");
    fs::create_dir(root.join("dir1")).expect("create dir1");
    fs::write(root.join("dir1/b"), b"b").expect("write b");
    fs::create_dir(root.join("dir2")).expect("create dir2");
    fs::write(root.join("dir2/c"), b"c").expect("write c");
    temp
}

fn sorted(root: &Path) -> TreeWalker {
    WalkBuilder::new(root)
        .sort_entries(true)
        .build()
        .expect("build walker")
}

#[test]
fn walk_errors_for_missing_root() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("missing");
    let error = TreeWalker::new(&missing).expect_err("missing root");
    assert!(matches!(error.kind(), WalkErrorKind::NotADirectory { .. }));
    assert_eq!(error.path(), missing);
    assert!(!error.is_entry_access());
}

#[test]
fn walk_errors_for_file_root() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("file.txt");
    fs::write(&file, b"contents").expect("write file");
    let error = TreeWalker::new(&file).expect_err("file root");
    assert!(matches!(error.kind(), WalkErrorKind::NotADirectory { .. }));
    assert_eq!(error.path(), file);
}

#[test]
fn empty_root_is_exhausted_immediately() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut walker = TreeWalker::new(temp.path()).expect("walker");
    assert_eq!(walker.state(), WalkState::Fresh);
    assert!(walker.produce_next().expect("step").is_none());
    assert_eq!(walker.state(), WalkState::Exhausted);
}

#[test]
fn sorted_walk_is_preorder_and_lexicographic() {
    let temp = sample_tree();
    let paths = collect_relative_paths(sorted(temp.path()));
    assert_eq!(
        paths,
        vec![
            PathBuf::from("a"),
            PathBuf::from("dir1"),
            PathBuf::from("dir1/b"),
            PathBuf::from("dir2"),
            PathBuf::from("dir2/c"),
        ]
    );
}

#[test]
fn unsorted_walk_visits_parents_before_children() {
    let temp = sample_tree();
    let paths = collect_relative_paths(TreeWalker::new(temp.path()).expect("walker"));
    assert_eq!(paths.len(), 5);
    for (index, path) in paths.iter().enumerate() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let parent_index = paths
                .iter()
                .position(|candidate| candidate == parent)
                .expect("parent produced");
            assert!(parent_index < index, "{parent:?} after {path:?}");
        }
    }
}

#[test]
fn produced_paths_join_root_as_supplied() {
    let temp = sample_tree();
    let root = temp.path().join("dir1").join("..");
    let walker = WalkBuilder::new(&root).sort_entries(true).build().expect("walker");
    let first = walker.into_iter().next().expect("entry").expect("ok");
    assert_eq!(first.path(), root.join("a"));
    assert_eq!(first.relative_path(), Path::new("a"));
}

#[test]
fn include_root_emits_root_first() {
    let temp = sample_tree();
    let mut walker = WalkBuilder::new(temp.path())
        .include_root(true)
        .sort_entries(true)
        .build()
        .expect("walker");

    let root = walker.produce_next().expect("step").expect("root entry");
    assert!(root.is_root());
    assert!(root.is_dir());
    assert_eq!(root.path(), temp.path());
    assert_eq!(root.relative_path(), Path::new(""));
    assert_eq!(root.depth(), 0);
    assert!(walker.current_is_directory().expect("positioned"));

    let rest = collect_relative_paths(walker);
    assert_eq!(rest.len(), 5);
    assert_eq!(rest[0], PathBuf::from("a"));
}

#[test]
fn skipping_included_root_ends_traversal() {
    let temp = sample_tree();
    let mut walker = WalkBuilder::new(temp.path())
        .include_root(true)
        .build()
        .expect("walker");

    assert!(walker.produce_next().expect("step").expect("root").is_root());
    walker.skip_subtree().expect("skip root");
    assert!(walker.produce_next().expect("step").is_none());
    assert_eq!(walker.stats().skipped, 1);
}

#[test]
fn skip_subtree_prunes_only_the_current_directory() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    let mut seen = Vec::new();
    while let Some(entry) = walker.produce_next().expect("step") {
        if entry.file_name() == Some(OsStr::new("dir1")) {
            walker.skip_subtree().expect("skip dir1");
        }
        seen.push(entry.relative_path().to_path_buf());
    }
    assert_eq!(
        seen,
        vec![
            PathBuf::from("a"),
            PathBuf::from("dir1"),
            PathBuf::from("dir2"),
            PathBuf::from("dir2/c"),
        ]
    );
    assert_eq!(walker.stats().skipped, 1);
}

#[test]
fn repeated_skip_requests_are_idempotent() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    assert_eq!(
        walker.produce_next().expect("step").expect("a").relative_path(),
        Path::new("a")
    );
    let dir1 = walker.produce_next().expect("step").expect("dir1");
    assert_eq!(dir1.relative_path(), Path::new("dir1"));

    walker.skip_subtree().expect("first skip");
    walker.skip_subtree().expect("second skip");

    let next = walker.produce_next().expect("step").expect("dir2");
    assert_eq!(next.relative_path(), Path::new("dir2"));
    let after = walker.produce_next().expect("step").expect("dir2/c");
    assert_eq!(after.relative_path(), Path::new("dir2/c"));
    assert_eq!(walker.stats().skipped, 1);
}

#[test]
fn skip_request_is_consumed_by_the_next_step() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    walker.produce_next().expect("step").expect("a");
    walker.produce_next().expect("step").expect("dir1");
    walker.skip_subtree().expect("skip dir1");
    let dir2 = walker.produce_next().expect("step").expect("dir2");
    assert_eq!(dir2.relative_path(), Path::new("dir2"));

    // dir2 was not skipped, so its child follows.
    let child = walker.produce_next().expect("step").expect("dir2/c");
    assert_eq!(child.relative_path(), Path::new("dir2/c"));
}

#[test]
fn skip_before_first_entry_is_misuse() {
    let temp = sample_tree();
    let mut walker = TreeWalker::new(temp.path()).expect("walker");
    assert!(matches!(walker.skip_subtree(), Err(MisuseError::NotPositioned)));
    assert!(matches!(
        walker.current_is_directory(),
        Err(MisuseError::NotPositioned)
    ));
    assert_eq!(walker.state(), WalkState::Fresh);
}

#[test]
fn skip_on_file_is_misuse_and_changes_nothing() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    let a = walker.produce_next().expect("step").expect("a");
    assert!(!a.is_dir());
    assert!(!walker.current_is_directory().expect("positioned"));

    match walker.skip_subtree() {
        Err(MisuseError::NotADirectory { path }) => assert_eq!(path, a.path()),
        other => panic!("unexpected result: {other:?}"),
    }
    let rest = collect_relative_paths(walker);
    assert_eq!(rest.len(), 4);
}

#[test]
fn exhausted_walker_keeps_returning_none() {
    let temp = sample_tree();
    let mut walker = TreeWalker::new(temp.path()).expect("walker");
    while walker.produce_next().expect("step").is_some() {}
    assert_eq!(walker.state(), WalkState::Exhausted);
    assert!(walker.produce_next().expect("step").is_none());
    assert!(walker.next().is_none());
    assert!(matches!(
        walker.current_is_directory(),
        Err(MisuseError::NotPositioned)
    ));
    assert!(matches!(walker.skip_subtree(), Err(MisuseError::NotPositioned)));
    assert_eq!(walker.open_directories(), 0);
}

#[test]
fn state_moves_from_fresh_to_positioned_to_exhausted() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("only"), b"x").expect("write");
    let mut walker = TreeWalker::new(temp.path()).expect("walker");
    assert_eq!(walker.state(), WalkState::Fresh);
    walker.produce_next().expect("step").expect("only");
    assert_eq!(walker.state(), WalkState::Positioned);
    assert_eq!(walker.current_path(), Some(temp.path().join("only").as_path()));
    assert!(walker.produce_next().expect("step").is_none());
    assert_eq!(walker.state(), WalkState::Exhausted);
    assert!(walker.current_path().is_none());
}

#[test]
fn max_depth_bounds_descent() {
    let temp = sample_tree();
    fs::create_dir(temp.path().join("dir1/nested")).expect("nested");
    fs::write(temp.path().join("dir1/nested/deep"), b"x").expect("deep");

    let walker = WalkBuilder::new(temp.path())
        .sort_entries(true)
        .max_depth(Some(1))
        .build()
        .expect("walker");
    let paths = collect_relative_paths(walker);
    assert_eq!(
        paths,
        vec![PathBuf::from("a"), PathBuf::from("dir1"), PathBuf::from("dir2")]
    );

    let walker = WalkBuilder::new(temp.path())
        .sort_entries(true)
        .max_depth(Some(2))
        .build()
        .expect("walker");
    let paths = collect_relative_paths(walker);
    assert!(paths.contains(&PathBuf::from("dir1/nested")));
    assert!(!paths.contains(&PathBuf::from("dir1/nested/deep")));
}

#[test]
fn max_depth_zero_produces_only_the_root() {
    let temp = sample_tree();
    let walker = WalkBuilder::new(temp.path())
        .include_root(true)
        .max_depth(Some(0))
        .build()
        .expect("walker");
    let entries: Vec<_> = walker.map(|entry| entry.expect("entry")).collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_root());
}

#[test]
fn depth_matches_relative_components() {
    let temp = sample_tree();
    for entry in sorted(temp.path()) {
        let entry = entry.expect("entry");
        assert_eq!(entry.depth(), entry.relative_path().components().count());
    }
}

#[test]
fn removed_directory_is_reported_once_and_walk_continues() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    walker.produce_next().expect("step").expect("a");
    let dir1 = walker.produce_next().expect("step").expect("dir1");
    fs::remove_dir_all(dir1.path()).expect("remove dir1");

    let error = walker.produce_next().expect_err("dir1 cannot be listed");
    assert!(matches!(error.kind(), WalkErrorKind::ReadDir { .. }));
    assert!(error.is_entry_access());
    assert_eq!(error.path(), dir1.path());

    let rest = collect_relative_paths(walker);
    assert_eq!(rest, vec![PathBuf::from("dir2"), PathBuf::from("dir2/c")]);
}

#[test]
fn vanished_sibling_reports_metadata_error() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    walker.produce_next().expect("step").expect("a");
    fs::remove_dir_all(temp.path().join("dir1")).expect("remove dir1");

    let error = walker.produce_next().expect_err("dir1 vanished");
    assert!(matches!(error.kind(), WalkErrorKind::Metadata { .. }));
    assert_eq!(error.path(), temp.path().join("dir1"));

    // The last good entry stays current.
    assert_eq!(walker.current_path(), Some(temp.path().join("a").as_path()));

    let rest = collect_relative_paths(walker);
    assert_eq!(rest, vec![PathBuf::from("dir2"), PathBuf::from("dir2/c")]);
}

#[test]
fn stats_count_entries_directories_and_errors() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    walker.produce_next().expect("step").expect("a");
    let dir1 = walker.produce_next().expect("step").expect("dir1");
    fs::remove_dir_all(dir1.path()).expect("remove dir1");
    assert!(walker.produce_next().is_err());
    while walker.produce_next().expect("step").is_some() {}

    assert_eq!(
        walker.stats(),
        WalkStats {
            entries: 4,
            directories: 2,
            errors: 1,
            skipped: 0,
        }
    );
}

#[cfg(unix)]
#[test]
fn symlinks_are_not_followed_by_default() {
    use std::os::unix::fs::symlink;

    let temp = sample_tree();
    symlink(temp.path().join("dir1"), temp.path().join("link")).expect("symlink");

    let mut walker = sorted(temp.path());
    let mut link_entry = None;
    let mut paths = Vec::new();
    while let Some(entry) = walker.produce_next().expect("step") {
        if entry.relative_path() == Path::new("link") {
            assert!(matches!(
                walker.skip_subtree(),
                Err(MisuseError::NotADirectory { .. })
            ));
            link_entry = Some(entry.kind());
        }
        paths.push(entry.relative_path().to_path_buf());
    }
    assert_eq!(link_entry, Some(EntryKind::Symlink));
    assert!(!paths.contains(&PathBuf::from("link/b")));
}

#[cfg(unix)]
#[test]
fn following_symlinks_descends_through_link_path() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    let outside = temp.path().join("outside");
    fs::create_dir(&outside).expect("outside");
    fs::write(outside.join("file"), b"x").expect("file");
    let root = temp.path().join("root");
    fs::create_dir(&root).expect("root");
    symlink(&outside, root.join("link")).expect("symlink");

    let walker = WalkBuilder::new(&root)
        .follow_symlinks(true)
        .sort_entries(true)
        .build()
        .expect("walker");
    let entries: Vec<_> = walker.map(|entry| entry.expect("entry")).collect();
    let paths: Vec<_> = entries.iter().map(|e| e.relative_path().to_path_buf()).collect();
    assert_eq!(paths, vec![PathBuf::from("link"), PathBuf::from("link/file")]);
    assert_eq!(entries[0].kind(), EntryKind::Symlink);
    assert!(entries[0].is_dir());
    assert_eq!(entries[1].path(), root.join("link/file"));
}

#[cfg(unix)]
#[test]
fn symlink_cycles_terminate() {
    use std::os::unix::fs::symlink;

    let temp = sample_tree();
    symlink(temp.path(), temp.path().join("dir1/back_to_root")).expect("symlink");

    let walker = WalkBuilder::new(temp.path())
        .follow_symlinks(true)
        .sort_entries(true)
        .build()
        .expect("walker");
    let paths = collect_relative_paths(walker);
    assert!(paths.contains(&PathBuf::from("dir1/back_to_root")));
    assert!(!paths.iter().any(|p| p.starts_with("dir1/back_to_root/a")));
    assert_eq!(paths.len(), 6);
}

#[cfg(unix)]
#[test]
fn dangling_symlink_is_produced_but_not_entered() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    symlink(temp.path().join("missing"), temp.path().join("dangling")).expect("symlink");

    let mut walker = WalkBuilder::new(temp.path())
        .follow_symlinks(true)
        .build()
        .expect("walker");
    let entry = walker.produce_next().expect("step").expect("dangling");
    assert_eq!(entry.kind(), EntryKind::Symlink);
    assert!(!entry.is_dir());
    assert!(walker.produce_next().expect("step").is_none());
    assert_eq!(walker.stats().errors, 0);
}

#[test]
fn cursor_error_pops_frame_and_resumes_in_parent() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    walker.produce_next().expect("step").expect("a");

    let listed = temp.path().join("dir2");
    walker.push_frame(TraversalFrame::with_names(
        listed.clone(),
        PathBuf::from("dir2"),
        1,
        vec![OsString::from("c")],
        Some(io::Error::other("listing interrupted")),
    ));
    assert_eq!(walker.open_directories(), 2);

    let c = walker.produce_next().expect("step").expect("dir2/c");
    assert_eq!(c.relative_path(), Path::new("dir2/c"));
    assert_eq!(c.depth(), 2);

    let error = walker.produce_next().expect_err("cursor failure");
    assert!(matches!(error.kind(), WalkErrorKind::ReadDirEntry { .. }));
    assert!(error.is_entry_access());
    assert_eq!(error.path(), listed);
    assert_eq!(walker.open_directories(), 1);
    assert_eq!(walker.current_path(), Some(c.path()));

    let mut rest = Vec::new();
    while let Some(entry) = walker.produce_next().expect("no further errors") {
        rest.push(entry.relative_path().to_path_buf());
    }
    assert_eq!(
        rest,
        ["dir1", "dir1/b", "dir2", "dir2/c"]
            .into_iter()
            .map(PathBuf::from)
            .collect::<Vec<_>>()
    );
    assert_eq!(walker.stats().errors, 1);
    assert!(walker.produce_next().expect("exhausted").is_none());
}

#[test]
fn canonicalize_failure_is_reported_once_and_walk_continues() {
    let temp = sample_tree();
    let mut walker = WalkBuilder::new(temp.path())
        .sort_entries(true)
        .follow_symlinks(true)
        .build()
        .expect("build walker");
    walker.produce_next().expect("step").expect("a");
    let dir1 = walker.produce_next().expect("step").expect("dir1");
    fs::remove_dir_all(dir1.path()).expect("remove dir1");

    let error = walker.produce_next().expect_err("dir1 cannot be resolved");
    assert!(matches!(error.kind(), WalkErrorKind::Canonicalize { .. }));
    assert!(error.is_entry_access());
    assert_eq!(error.path(), dir1.path());

    let rest = collect_relative_paths(walker);
    assert_eq!(rest, vec![PathBuf::from("dir2"), PathBuf::from("dir2/c")]);
}

#[test]
fn skip_after_failed_descent_is_rejected() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    walker.produce_next().expect("step").expect("a");
    let dir1 = walker.produce_next().expect("step").expect("dir1");
    fs::remove_dir_all(dir1.path()).expect("remove dir1");
    assert!(walker.produce_next().is_err());

    assert_eq!(walker.current_is_directory(), Ok(true));
    assert_eq!(
        walker.skip_subtree(),
        Err(MisuseError::DescentConsumed {
            path: dir1.path().to_path_buf(),
        })
    );

    let rest = collect_relative_paths(walker);
    assert_eq!(rest, vec![PathBuf::from("dir2"), PathBuf::from("dir2/c")]);
}

#[test]
fn skip_is_not_repeated_after_a_failed_step() {
    let temp = sample_tree();
    let mut walker = sorted(temp.path());
    walker.produce_next().expect("step").expect("a");
    let dir1 = walker.produce_next().expect("step").expect("dir1");
    walker.skip_subtree().expect("dir1 is a directory");
    fs::remove_dir_all(temp.path().join("dir2")).expect("remove dir2");

    let error = walker.produce_next().expect_err("dir2 vanished");
    assert!(matches!(error.kind(), WalkErrorKind::Metadata { .. }));
    assert_eq!(walker.current_path(), Some(dir1.path()));
    assert!(matches!(
        walker.skip_subtree(),
        Err(MisuseError::DescentConsumed { .. })
    ));

    assert!(walker.produce_next().expect("step").is_none());
    assert_eq!(walker.stats().skipped, 1);
}
