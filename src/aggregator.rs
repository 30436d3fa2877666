//! 폴더 집계 모듈
//!
//! 입력 폴더의 항목을 나열하고, 모든 파일을 병렬로 추출한 뒤
//! 하나의 JSON 배열 파일로 저장합니다.

use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cli::WriteMode;
use crate::error::{PostJsonError, Result};
use crate::extractor::{extract_file, ExtractOptions, Extracted};
use crate::pattern::PatternMatcher;
use crate::record::FileRecord;

/// 출력 옵션
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// 출력 파일 모드
    pub mode: WriteMode,
    /// Pretty 출력 여부
    pub pretty: bool,
}

/// 전체 변환 결과 요약
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// 저장된 레코드 수
    pub records: usize,
    /// 출력 파일 크기
    pub bytes_written: u64,
}

/// 입력 폴더의 직계 항목 나열
///
/// 재귀 탐색은 하지 않으며, 하위 폴더와 숨김 파일도 걸러내지 않습니다.
/// 패턴이 주어지면 파일 이름으로만 필터링합니다. 결과는 파일 이름순입니다.
pub fn list_entries(dir: &Path, matcher: &PatternMatcher) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| PostJsonError::ListError {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        if matcher.matches(&entry.file_name().to_string_lossy()) {
            entries.push(entry.into_path());
        }
    }

    Ok(entries)
}

/// 모든 경로를 병렬로 추출
///
/// 하나라도 읽기에 실패하면 전체가 실패하며 부분 결과는 버려집니다.
/// `on_file`은 파일 하나가 끝날 때마다 호출됩니다.
pub fn extract_all<F>(paths: &[PathBuf], options: &ExtractOptions, on_file: F) -> Result<Vec<Extracted>>
where
    F: Fn(&Extracted) + Sync + Send,
{
    paths
        .par_iter()
        .map(|path| {
            let extracted = extract_file(path, options)?;
            on_file(&extracted);
            Ok(extracted)
        })
        .collect()
}

/// 레코드 목록을 JSON 배열로 직렬화
pub fn to_json(records: &[FileRecord], pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .map_err(|e| PostJsonError::SerializeError {
        reason: e.to_string(),
    })
}

/// 출력 모드 확인
pub fn check_output_mode(output: &Path, mode: WriteMode) -> Result<()> {
    if mode == WriteMode::Error && output.exists() {
        return Err(PostJsonError::OutputExists {
            path: output.to_path_buf(),
        });
    }
    Ok(())
}

/// JSON 배열 파일 저장
///
/// 기본 모드에서는 기존 파일을 무조건 덮어씁니다. 쓴 바이트 수를 반환합니다.
pub fn write_output(records: &[FileRecord], output: &Path, options: WriteOptions) -> Result<u64> {
    check_output_mode(output, options.mode)?;

    let content = to_json(records, options.pretty)?;
    let write_error = |e: std::io::Error| PostJsonError::WriteError {
        path: output.to_path_buf(),
        reason: e.to_string(),
    };

    let file = File::create(output).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    Ok(content.len() as u64)
}

/// 폴더 전체 변환 (나열 → 병렬 추출 → 저장)
///
/// 읽기 실패가 하나라도 있으면 출력 파일은 생성되거나 덮어써지지 않습니다.
/// `on_file`은 파일 하나의 추출이 끝날 때마다 호출됩니다.
pub fn convert_directory<F>(
    dir: &Path,
    output: &Path,
    matcher: &PatternMatcher,
    extract_options: &ExtractOptions,
    write_options: WriteOptions,
    on_file: F,
) -> Result<ConvertSummary>
where
    F: Fn(&Extracted) + Sync + Send,
{
    let paths = list_entries(dir, matcher)?;
    let extracted = extract_all(&paths, extract_options, on_file)?;
    let records: Vec<FileRecord> = extracted.into_iter().map(|e| e.record).collect();
    let bytes_written = write_output(&records, output, write_options)?;

    Ok(ConvertSummary {
        records: records.len(),
        bytes_written,
    })
}
