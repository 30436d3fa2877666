//! 통합 테스트 모듈
//!
//! postjson의 전체 기능을 테스트합니다.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use postjson::{
    convert_directory, ExtractOptions, PatternMatcher, PostJsonError, WriteMode, WriteOptions,
};

/// 테스트용 글 파일 생성 헬퍼
fn create_post(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// 표준 헤더를 가진 글 본문 생성
fn post_body(title: &str, date: &str, author: &str) -> String {
    format!(
        "---\nTitle: {}\nDate: {}\nAuthor: {}\n---\n\nBody paragraph\nmore body\n",
        title, date, author
    )
}

/// 여러 글이 들어 있는 테스트 폴더 생성
fn setup_posts_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let posts = temp_dir.path().join("posts");
    fs::create_dir(&posts).unwrap();

    create_post(&posts, "first.md", &post_body("First", "2020-01-01", "Kim"));
    create_post(&posts, "second.md", &post_body("Second", "2020-02-02", "Lee"));
    create_post(&posts, "third.md", &post_body("Third", "2020-03-03", "Park"));
    // 줄 수 부족 → 빈 레코드
    create_post(&posts, "short.md", "Title\nTitle: Short\n");

    temp_dir
}

fn run(dir: &Path, output: &Path) -> postjson::Result<postjson::aggregator::ConvertSummary> {
    convert_directory(
        dir,
        output,
        &PatternMatcher::default(),
        &ExtractOptions::new(),
        WriteOptions::default(),
        |_| {},
    )
}

fn read_array(path: &Path) -> Vec<Value> {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str::<Value>(&text)
        .unwrap()
        .as_array()
        .unwrap()
        .clone()
}

mod extractor_tests {
    use super::*;
    use postjson::extract_file;

    #[test]
    fn test_documented_example() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_post(
            temp_dir.path(),
            "hello.md",
            "Title\nTitle: Hello\nDate: 2020-01-01\nAuthor: J\nBody text\nmore\nmore",
        );

        let extracted = extract_file(&path, &ExtractOptions::new()).unwrap();
        let value = serde_json::to_value(&extracted.record).unwrap();

        assert_eq!(
            value,
            json!({"Title": "Hello", "Date": "2020-01-01", "Author": "J"})
        );
    }

    #[test]
    fn test_only_lines_two_to_four() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_post(
            temp_dir.path(),
            "post.md",
            "First: skipped\nA: 1\nB: 2\nC: 3\nD: 4\nE: 5\nF: 6\nG: 7\n",
        );

        let extracted = extract_file(&path, &ExtractOptions::new()).unwrap();
        let keys: Vec<&str> = extracted.record.keys().collect();

        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_fewer_than_seven_lines_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_post(temp_dir.path(), "post.md", "1\nA: 1\nB: 2\nC: 3\n5\n6");

        let extracted = extract_file(&path, &ExtractOptions::new()).unwrap();

        assert!(!extracted.complete);
        assert!(extracted.record.is_empty());
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_post(temp_dir.path(), "empty.md", "");

        let extracted = extract_file(&path, &ExtractOptions::new()).unwrap();

        assert!(extracted.record.is_empty());
        assert_eq!(extracted.bytes_read, 0);
    }

    #[test]
    fn test_line_without_delimiter() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_post(
            temp_dir.path(),
            "post.md",
            "---\nTitle: T\nuntagged line\nDate: D\n---\nbody\nbody",
        );

        let extracted = extract_file(&path, &ExtractOptions::new()).unwrap();

        assert_eq!(extracted.record.get("untagged line"), Some(None));
        assert_eq!(
            serde_json::to_value(&extracted.record).unwrap(),
            json!({"Title": "T", "Date": "D"})
        );
    }

    #[test]
    fn test_value_with_delimiter_keeps_second_piece() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_post(
            temp_dir.path(),
            "guide.md",
            "---\nTitle: Rust: A Guide\nDate: 2020-01-01\nAuthor: J\n---\nbody\nbody",
        );

        let extracted = extract_file(&path, &ExtractOptions::new()).unwrap();

        assert_eq!(
            serde_json::to_value(&extracted.record).unwrap(),
            json!({"Title": "Rust", "Date": "2020-01-01", "Author": "J"})
        );
    }

    #[test]
    fn test_duplicate_key_without_delimiter_drops_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_post(
            temp_dir.path(),
            "tags.md",
            "---\nTag: a\nDate: 2020-01-01\nTag\n---\nbody\nbody",
        );

        let extracted = extract_file(&path, &ExtractOptions::new()).unwrap();

        assert_eq!(extracted.record.get("Tag"), Some(None));
        assert_eq!(
            serde_json::to_value(&extracted.record).unwrap(),
            json!({"Date": "2020-01-01"})
        );
    }

    #[test]
    fn test_stops_reading_large_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut content = post_body("Big", "2021-01-01", "Choi");
        content.push_str(&"lorem ipsum dolor sit amet\n".repeat(20_000));
        let path = create_post(temp_dir.path(), "big.md", &content);

        let options = ExtractOptions::new().with_chunk_size(1024);
        let extracted = extract_file(&path, &options).unwrap();

        assert!(extracted.complete);
        assert!(extracted.bytes_read <= 1024);
        assert_eq!(extracted.record.get("Author"), Some(Some("Choi")));
    }
}

mod aggregate_tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_convert_directory_set_comparison() {
        let temp_dir = setup_posts_directory();
        let output = temp_dir.path().join("all-posts.json");

        let summary = run(&temp_dir.path().join("posts"), &output).unwrap();
        let array = read_array(&output);

        assert_eq!(summary.records, 4);
        assert_eq!(array.len(), 4);

        let expected = [
            json!({"Title": "First", "Date": "2020-01-01", "Author": "Kim"}),
            json!({"Title": "Second", "Date": "2020-02-02", "Author": "Lee"}),
            json!({"Title": "Third", "Date": "2020-03-03", "Author": "Park"}),
            json!({}),
        ];
        for item in &expected {
            assert!(array.contains(item), "missing {}", item);
        }
    }

    #[test]
    fn test_convert_directory_reports_each_file() {
        let temp_dir = setup_posts_directory();
        let output = temp_dir.path().join("all-posts.json");
        let seen = AtomicUsize::new(0);
        let empty = AtomicUsize::new(0);

        let summary = convert_directory(
            &temp_dir.path().join("posts"),
            &output,
            &PatternMatcher::default(),
            &ExtractOptions::new(),
            WriteOptions::default(),
            |extracted| {
                seen.fetch_add(1, Ordering::Relaxed);
                if !extracted.complete {
                    empty.fetch_add(1, Ordering::Relaxed);
                }
            },
        )
        .unwrap();

        assert_eq!(seen.load(Ordering::Relaxed), summary.records);
        assert_eq!(empty.load(Ordering::Relaxed), 1);
        assert_eq!(summary.bytes_written, fs::metadata(&output).unwrap().len());
    }

    #[test]
    fn test_empty_directory_writes_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let posts = temp_dir.path().join("posts");
        fs::create_dir(&posts).unwrap();
        let output = temp_dir.path().join("all-posts.json");

        run(&posts, &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
    }

    #[test]
    fn test_subdirectory_fails_without_writing() {
        let temp_dir = setup_posts_directory();
        let posts = temp_dir.path().join("posts");
        fs::create_dir(posts.join("drafts")).unwrap();
        let output = temp_dir.path().join("all-posts.json");

        let result = run(&posts, &output);

        assert!(matches!(result, Err(PostJsonError::ReadError { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_failure_does_not_overwrite_existing_output() {
        let temp_dir = setup_posts_directory();
        let posts = temp_dir.path().join("posts");
        fs::create_dir(posts.join("drafts")).unwrap();
        let output = temp_dir.path().join("all-posts.json");
        fs::write(&output, "[\"previous\"]").unwrap();

        assert!(run(&posts, &output).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "[\"previous\"]");
    }

    #[test]
    fn test_pattern_filter_and_pretty() {
        let temp_dir = setup_posts_directory();
        let posts = temp_dir.path().join("posts");
        create_post(&posts, "README", "not a post");
        let output = temp_dir.path().join("md-only.json");

        let summary = convert_directory(
            &posts,
            &output,
            &PatternMatcher::new(Some("*.md".to_string())).unwrap(),
            &ExtractOptions::new(),
            WriteOptions {
                mode: WriteMode::Overwrite,
                pretty: true,
            },
            |_| {},
        )
        .unwrap();

        assert_eq!(summary.records, 4);
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(read_array(&output).len(), 4);
    }

    #[test]
    fn test_error_mode_refuses_existing_output() {
        let temp_dir = setup_posts_directory();
        let output = temp_dir.path().join("all-posts.json");
        fs::write(&output, "keep").unwrap();

        let result = convert_directory(
            &temp_dir.path().join("posts"),
            &output,
            &PatternMatcher::default(),
            &ExtractOptions::new(),
            WriteOptions {
                mode: WriteMode::Error,
                pretty: false,
            },
            |_| {},
        );

        assert!(matches!(result, Err(PostJsonError::OutputExists { .. })));
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep");
    }

    #[test]
    fn test_custom_line_count() {
        let temp_dir = TempDir::new().unwrap();
        let posts = temp_dir.path().join("posts");
        fs::create_dir(&posts).unwrap();
        create_post(&posts, "a.md", "x\nA: 1\nB: 2\nC: 3\nD: 4\nE: 5\ny\nz\nw\n");
        let output = temp_dir.path().join("out.json");

        convert_directory(
            &posts,
            &output,
            &PatternMatcher::default(),
            &ExtractOptions::new().with_line_count(7),
            WriteOptions::default(),
            |_| {},
        )
        .unwrap();

        assert_eq!(
            read_array(&output),
            vec![json!({"A": "1", "B": "2", "C": "3", "D": "4", "E": "5"})]
        );
    }
}

mod error_tests {
    use postjson::PostJsonError;
    use std::path::PathBuf;

    #[test]
    fn test_read_error_display() {
        let error = PostJsonError::ReadError {
            file: PathBuf::from("posts/a.md"),
            reason: "denied".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("파일 읽기 실패"));
        assert!(msg.contains("posts/a.md"));
        assert!(error.is_read_failure());
    }

    #[test]
    fn test_write_error_is_not_read_failure() {
        let error = PostJsonError::WriteError {
            path: PathBuf::from("all-posts.json"),
            reason: "disk full".to_string(),
        };
        assert!(!error.is_read_failure());
        assert!(error.to_string().contains("파일 쓰기 실패"));
    }
}
