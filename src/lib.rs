//! postjson - POST HEADER TO JSON CONVERTER
//!
//! 폴더 내 글 파일들의 앞부분 `key: value` 헤더를 추출하여
//! 하나의 JSON 배열 파일로 모으는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - ✂️ **조기 중단 추출**: 필요한 줄 수가 모이면 파일 읽기를 즉시 중단
//! - 🚀 **병렬 처리**: Rayon을 활용한 멀티스레드 추출
//! - 🧱 **전부 아니면 전무**: 하나라도 읽기에 실패하면 출력 파일을 건드리지 않음
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터링
//! - 📈 **통계**: 추출/빈 레코드 수, 입출력 용량 표시
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법 (./posts → ./all-posts.json)
//! postjson
//!
//! # 경로 지정
//! postjson -i ./content -o posts.json --pretty
//! ```

pub mod aggregator;
pub mod cli;
pub mod error;
pub mod extractor;
pub mod pattern;
pub mod record;
pub mod stats;

// Re-exports for convenient access
pub use aggregator::{convert_directory, extract_all, list_entries, write_output, WriteOptions};
pub use cli::{Args, WriteMode};
pub use error::{PostJsonError, Result};
pub use extractor::{extract_file, ExtractOptions, Extracted, HeaderScanner};
pub use pattern::PatternMatcher;
pub use record::FileRecord;
pub use stats::{format_bytes, Statistics};
