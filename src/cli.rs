//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::extractor::{ExtractOptions, DEFAULT_LINE_COUNT};

/// 출력 파일 모드
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// 기존 파일이 있으면 덮어쓰기
    #[default]
    Overwrite,
    /// 기존 파일이 있으면 에러
    Error,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "Overwrite"),
            WriteMode::Error => write!(f, "Error"),
        }
    }
}

/// postjson CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "postjson",
    author = "YourName <your@email.com>",
    version,
    about = "POST HEADER TO JSON CONVERTER - 폴더 내 글 파일들의 헤더를 하나의 JSON 배열로 모으는 CLI 도구",
    long_about = r#"
POST HEADER TO JSON CONVERTER
=============================

지정된 폴더의 모든 항목을 글 파일로 보고,
각 파일 앞부분의 "key: value" 헤더를 읽어
하나의 JSON 배열 파일로 저장합니다.

특징:
  • 필요한 줄만 읽고 즉시 중단하는 스트리밍 추출
  • 병렬 처리로 대량 파일 고속 변환
  • 하나라도 실패하면 출력 파일을 건드리지 않음

예제:
  postjson
  postjson -i ./posts -o all-posts.json
  postjson -i ./posts --pattern "*.md" --pretty
  postjson -i ./posts --dry-run
"#
)]
pub struct Args {
    /// 글 파일들이 있는 입력 폴더 경로
    #[arg(short, long, default_value = "./posts")]
    pub input: PathBuf,

    /// 생성될 JSON 파일 경로
    #[arg(short, long, default_value = "./all-posts.json")]
    pub output: PathBuf,

    /// 출력 파일 모드
    #[arg(short, long, value_enum, default_value_t = WriteMode::Overwrite)]
    pub mode: WriteMode,

    /// 파일 이름 패턴 필터 (glob 형식, 예: "*.md")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 읽기를 멈출 기준 줄 수 (헤더는 2번째 줄부터 line-count - 2개)
    #[arg(short = 'n', long, default_value_t = DEFAULT_LINE_COUNT, value_parser = parse_line_count)]
    pub line_count: usize,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 항목 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 병렬 처리 스레드 수 (기본값: CPU 코어 수)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// 들여쓰기된 JSON 출력 (기본값: 압축)
    #[arg(long)]
    pub pretty: bool,
}

/// 기준 줄 수 파싱 (헤더 구간이 비지 않도록 2 이상만 허용)
fn parse_line_count(value: &str) -> Result<usize, String> {
    let count: usize = value
        .parse()
        .map_err(|_| format!("숫자가 아닙니다: {}", value))?;
    if count < 2 {
        return Err(format!("기준 줄 수는 2 이상이어야 합니다: {}", count));
    }
    Ok(count)
}

impl Args {
    /// 인자로부터 추출 옵션 생성
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::new().with_line_count(self.line_count)
    }
}
