use anyhow::Result;
use filesift::{search, MatchMode, SearchEngine, SearchError, SearchRequest};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_extension_filter_and_counts() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "foo foo")?;
    std::fs::write(dir.path().join("b.log"), "foo")?;

    let request = SearchRequest::new(dir.path(), "foo").with_extension(".txt");
    let results = search(&request)?;

    assert_eq!(results.files_with_matches(), 1);
    assert_eq!(results.matches[0].path, dir.path().join("a.txt"));
    assert_eq!(results.matches[0].count, 2);
    Ok(())
}

#[test]
fn test_empty_extension_matches_all_files() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "foo")?;
    std::fs::write(dir.path().join("b.log"), "foo")?;
    std::fs::write(dir.path().join("Makefile"), "foo")?;

    let results = search(&SearchRequest::new(dir.path(), "foo"))?;
    assert_eq!(results.files_with_matches(), 3);
    Ok(())
}

#[test]
fn test_non_overlapping_literal_count() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("x.txt"), "aaa")?;

    let results = search(&SearchRequest::new(dir.path(), "aa"))?;
    assert_eq!(results.matches[0].count, 1);
    Ok(())
}

#[test]
fn test_case_insensitivity_flag() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "abc\n")?;

    let insensitive = search(&SearchRequest::new(dir.path(), "ABC"))?;
    assert_eq!(insensitive.total_matches, 1);

    let sensitive = search(&SearchRequest::new(dir.path(), "ABC").with_case_insensitive(false))?;
    assert!(sensitive.is_empty());
    Ok(())
}

#[test]
fn test_recursive_descends_unbounded() -> Result<()> {
    let dir = tempdir()?;
    let deep = dir.path().join("a/b/c");
    std::fs::create_dir_all(&deep)?;
    std::fs::write(dir.path().join("top.txt"), "foo\n")?;
    std::fs::write(deep.join("bottom.txt"), "foo foo\n")?;

    let results = search(&SearchRequest::new(dir.path(), "foo").with_extension(".txt"))?;
    assert_eq!(results.files_with_matches(), 2);
    assert_eq!(results.total_matches, 3);
    Ok(())
}

#[test]
fn test_non_recursive_never_reaches_subdirectories() -> Result<()> {
    let dir = tempdir()?;
    std::fs::create_dir(dir.path().join("sub"))?;
    std::fs::write(dir.path().join("sub/inner.txt"), "foo\n")?;

    let results = search(&SearchRequest::new(dir.path(), "foo").with_recursive(false))?;
    assert!(results.is_empty());
    Ok(())
}

#[test]
fn test_regex_mode_counts_per_line() -> Result<()> {
    let dir = tempdir()?;
    let mut file = File::create(dir.path().join("code.rs"))?;
    writeln!(file, "fn alpha() {{}}")?;
    writeln!(file, "fn beta() {{}} fn gamma() {{}}")?;
    writeln!(file, "// no functions here")?;
    drop(file);

    let request = SearchRequest::new(dir.path(), r"fn \w+")
        .with_mode(MatchMode::Regex)
        .with_extension(".rs");
    let results = search(&request)?;
    assert_eq!(results.total_matches, 3);
    Ok(())
}

#[test]
fn test_zero_length_pattern_rejected_before_scan() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("never-opened.txt"), "anything").unwrap();

    let err = search(&SearchRequest::new(dir.path(), "")).unwrap_err();
    assert!(matches!(err, SearchError::EmptyPattern));
}

#[test]
fn test_root_is_a_file_is_invalid() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("not-a-dir.txt");
    std::fs::write(&file, "foo")?;

    let err = search(&SearchRequest::new(&file, "foo")).unwrap_err();
    assert!(matches!(err, SearchError::InvalidRoot(_)));
    Ok(())
}

#[test]
fn test_idempotent_over_unmodified_tree() -> Result<()> {
    let dir = tempdir()?;
    for i in 0..20 {
        std::fs::write(
            dir.path().join(format!("file_{i}.txt")),
            format!("line with foo\nfoo and foo again\nnumber {i}\n"),
        )?;
    }

    let request = SearchRequest::new(dir.path(), "foo").with_extension(".txt");
    let as_set = |r: &filesift::ResultSet| -> HashSet<(PathBuf, usize)> {
        r.matches.iter().map(|m| (m.path.clone(), m.count)).collect()
    };

    let first = search(&request)?;
    let second = search(&request)?;
    assert_eq!(as_set(&first), as_set(&second));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_skipped_with_matches_intact() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    std::fs::write(dir.path().join("readable.txt"), "foo\n")?;
    let locked = dir.path().join("locked.txt");
    std::fs::write(&locked, "foo\n")?;
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000))?;

    // running as root ignores permission bits; nothing to test then
    if File::open(&locked).is_ok() {
        return Ok(());
    }

    let results = search(&SearchRequest::new(dir.path(), "foo"))?;

    // restore so the tempdir can be cleaned up
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644))?;

    assert_eq!(results.files_with_matches(), 1);
    assert_eq!(results.matches[0].path, dir.path().join("readable.txt"));
    Ok(())
}

#[test]
fn test_async_submission_off_the_calling_thread() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "foo foo foo\n")?;

    let engine = SearchEngine::new()?;
    let submission = engine.submit(SearchRequest::new(dir.path(), "foo"));
    let results = submission.wait().map_err(anyhow::Error::msg)?;
    assert_eq!(results.total_matches, 3);
    Ok(())
}

#[test]
fn test_stale_results_distinguished_by_id() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "foo\n")?;

    let engine = SearchEngine::new()?;
    let stale = engine.submit(SearchRequest::new(dir.path(), "foo"));
    let latest = engine.submit(SearchRequest::new(dir.path(), "foo"));
    assert_ne!(stale.id(), latest.id());

    // a caller that only wants the latest keeps its id and discards the rest
    let keep = latest.id();
    for submission in [stale, latest] {
        let id = submission.id();
        let outcome = submission.wait();
        if id == keep {
            assert!(outcome.is_ok());
        }
    }
    Ok(())
}
