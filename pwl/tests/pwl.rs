//! File-backed word list behaviour.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

use pwl::speller::PersonalWordList;

fn word_file(dir: &tempfile::TempDir, contents: &[u8]) -> PathBuf {
    let path = dir.path().join("words.txt");
    fs::write(&path, contents).unwrap();
    path
}

/// Waits long enough for a subsequent write to move the file mtime even on
/// filesystems with coarse timestamp resolution.
fn settle_mtime() {
    sleep(Duration::from_millis(100));
}

fn append(path: &Path, contents: &str) {
    let mut existing = fs::read(path).unwrap();
    existing.extend_from_slice(contents.as_bytes());
    fs::write(path, existing).unwrap();
}

#[test]
fn creates_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.txt");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    assert!(path.exists());
    assert!(!pwl.check("anything"));
}

#[test]
fn fails_when_the_file_cannot_be_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("words.txt");
    assert!(PersonalWordList::with_file(&path).is_err());
}

#[test]
fn loads_existing_words() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"hello\nworld\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    assert!(pwl.check("hello"));
    assert!(pwl.check("world"));
    assert!(!pwl.check("help"));
}

#[test]
fn skips_a_leading_bom() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"\xef\xbb\xbfword\nother\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    assert!(pwl.check("word"));
    assert!(pwl.check("other"));
}

#[test]
fn ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"# comment\n\nhello\n   \n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    assert!(pwl.check("hello"));
    assert!(!pwl.check("# comment"));
    assert!(!pwl.check("comment"));
}

#[test]
fn strips_trailing_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"hello  \t\nworld\r\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    assert!(pwl.check("hello"));
    assert!(pwl.check("world"));
}

#[test]
fn skips_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut contents = Vec::new();
    contents.extend_from_slice(b"\xff\xfe broken\n");
    contents.extend_from_slice(&vec![b'x'; 9000]);
    contents.push(b'\n');
    contents.extend_from_slice(b"hello\n");
    let path = word_file(&dir, &contents);

    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    assert!(pwl.check("hello"));
}

#[test]
fn add_appends_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"hello\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    pwl.add("world");

    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nworld\n");

    let mut reopened = PersonalWordList::with_file(&path).unwrap();
    assert!(reopened.check("hello"));
    assert!(reopened.check("world"));
}

#[test]
fn add_inserts_a_missing_trailing_newline_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"hello");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    pwl.add("world");
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nworld\n");
}

#[test]
fn adding_twice_writes_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    pwl.add("hello");
    pwl.add("hello");
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    assert!(pwl.check("hello"));
}

#[test]
fn remove_rewrites_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    pwl.add("hello");
    pwl.add("help");
    pwl.remove("hello");

    assert_eq!(fs::read_to_string(&path).unwrap(), "help\n");
    assert!(!pwl.check("hello"));
    assert!(pwl.check("help"));

    let mut reopened = PersonalWordList::with_file(&path).unwrap();
    assert!(!reopened.check("hello"));
    assert!(reopened.check("help"));
}

#[test]
fn remove_keeps_words_that_merely_contain_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"hell\nhello\nhells\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    pwl.remove("hell");

    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nhells\n");
    assert!(pwl.check("hello"));
    assert!(pwl.check("hells"));
    assert!(!pwl.check("hell"));
}

#[test]
fn remove_preserves_the_bom() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"\xef\xbb\xbfhello\nworld\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    pwl.remove("hello");
    assert_eq!(fs::read(&path).unwrap(), b"\xef\xbb\xbfworld\n");
}

#[test]
fn external_appends_are_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"hello\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    assert!(!pwl.check("world"));

    settle_mtime();
    append(&path, "world\n");
    assert!(pwl.check("world"));
    assert!(pwl.check("hello"));
}

#[test]
fn external_truncation_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"hello\nworld\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    assert!(pwl.check("world"));

    settle_mtime();
    fs::write(&path, b"hello\n").unwrap();
    assert!(!pwl.check("world"));
    assert!(pwl.check("hello"));
}

#[test]
fn own_writes_do_not_count_as_external_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"hello\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    settle_mtime();
    pwl.add("world");
    // A refresh here would also work; this asserts the words survive one.
    assert!(pwl.check("hello"));
    assert!(pwl.check("world"));
    assert_eq!(pwl.suggest("worl").len(), 1);
}

#[test]
fn suggestions_flow_through_file_backed_lists() {
    let dir = tempfile::tempdir().unwrap();
    let path = word_file(&dir, b"hello\nhelp\n");
    let mut pwl = PersonalWordList::with_file(&path).unwrap();
    let suggestions = pwl.suggest("helo");
    let values: Vec<&str> = suggestions.iter().map(|s| s.value()).collect();
    assert_eq!(values, vec!["hello", "help"]);
}
