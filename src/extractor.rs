//! 헤더 추출 모듈
//!
//! 글 파일 하나를 청크 단위로 읽어 앞부분의 `key: value` 헤더를 추출합니다.
//! 충분한 줄이 모이면 즉시 읽기를 멈춥니다.

use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{PostJsonError, Result};
use crate::record::FileRecord;

/// 기본 임계 줄 수
pub const DEFAULT_LINE_COUNT: usize = 5;

/// 기본 읽기 청크 크기 (64KB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// 헤더 키와 값을 나누는 구분자
pub const HEADER_DELIMITER: &str = ": ";

/// 추출 옵션
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// 읽기를 멈출 기준 줄 수
    pub line_count: usize,
    /// 한 번에 읽는 바이트 수
    pub chunk_size: usize,
    /// 대용량 파일 임계값 (이상이면 메모리 매핑 사용)
    pub mmap_threshold: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self {
            line_count: DEFAULT_LINE_COUNT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            mmap_threshold: 10 * 1024 * 1024, // 10MB
        }
    }

    /// 임계 줄 수 설정
    pub fn with_line_count(mut self, line_count: usize) -> Self {
        self.line_count = line_count;
        self
    }

    /// 청크 크기 설정 (0은 1로 취급)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// 메모리 매핑 임계값 설정
    pub fn with_mmap_threshold(mut self, mmap_threshold: u64) -> Self {
        self.mmap_threshold = mmap_threshold;
        self
    }
}

/// 파일 하나의 추출 결과
#[derive(Debug, Clone)]
pub struct Extracted {
    /// 원본 파일 경로
    pub path: PathBuf,
    /// 추출된 헤더 레코드
    pub record: FileRecord,
    /// 실제로 읽은 바이트 수
    pub bytes_read: u64,
    /// 임계 줄 수에 도달했는지 여부 (false면 레코드는 비어 있음)
    pub complete: bool,
}

/// 누적 버퍼 기반 헤더 스캐너
///
/// 들어온 청크를 모두 버퍼에 이어 붙이고, 버퍼 전체를 `\n`으로 나눈 조각 수가
/// `line_count + 1`을 넘는 순간 완료 상태가 됩니다. UTF-8 디코딩은 완료 후에만
/// 수행하므로 청크 경계에서 잘린 문자도 안전합니다.
#[derive(Debug)]
pub struct HeaderScanner {
    line_count: usize,
    buffer: Vec<u8>,
    newlines: usize,
    complete: bool,
}

impl HeaderScanner {
    pub fn new(line_count: usize) -> Self {
        Self {
            line_count,
            buffer: Vec::new(),
            newlines: 0,
            complete: false,
        }
    }

    /// 청크 추가. 임계값에 도달하면 true를 반환하며, 이후의 청크는 무시됩니다.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        if self.complete {
            return true;
        }

        self.buffer.extend_from_slice(chunk);
        self.newlines += chunk.iter().filter(|&&b| b == b'\n').count();

        // 조각 수(줄바꿈 수 + 1) > line_count + 1
        if self.newlines > self.line_count {
            self.complete = true;
        }
        self.complete
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// 지금까지 받은 바이트 수
    pub fn bytes_seen(&self) -> u64 {
        self.buffer.len() as u64
    }

    /// 스캐너를 소비하여 레코드 생성 (임계값 미도달 시 빈 레코드)
    pub fn finish(self) -> FileRecord {
        if !self.complete {
            return FileRecord::new();
        }

        let text = String::from_utf8_lossy(&self.buffer);
        let lines: Vec<&str> = text.split('\n').collect();
        parse_header_lines(&lines, self.line_count)
    }

    fn into_extracted(self, path: &Path) -> Extracted {
        let bytes_read = self.bytes_seen();
        let complete = self.is_complete();
        Extracted {
            path: path.to_path_buf(),
            record: self.finish(),
            bytes_read,
            complete,
        }
    }
}

/// 고정 구간의 줄들을 헤더로 파싱
///
/// 첫 줄을 건너뛰고 `1..line_count - 1` 구간(기본값이면 1, 2, 3번 줄)만 사용하며,
/// 그 뒤의 줄은 몇 개가 있든 무시합니다.
///
/// `line_count`가 2 미만이면 구간이 비어 빈 레코드가 됩니다. 음수 끝 인덱스를
/// "뒤에서부터"로 해석하지 않으므로, CLI에서는 2 미만 값을 거부합니다.
pub fn parse_header_lines(lines: &[&str], line_count: usize) -> FileRecord {
    let end = line_count.saturating_sub(1).min(lines.len());
    let mut record = FileRecord::new();

    if end <= 1 {
        return record;
    }

    for line in &lines[1..end] {
        let (key, value) = parse_header_line(line);
        record.insert(key.to_string(), value.map(str::to_string));
    }
    record
}

/// 한 줄을 `": "` 기준으로 나누어 첫 조각은 키, 두 번째 조각은 값으로 사용
///
/// 세 번째 이후 조각은 버립니다. 구분자가 없으면 줄 전체가 키가 되고 값은 없습니다.
///
/// # Examples
/// ```
/// use postjson::extractor::parse_header_line;
///
/// assert_eq!(parse_header_line("Title: Hello"), ("Title", Some("Hello")));
/// assert_eq!(parse_header_line("Title: Rust: A Guide"), ("Title", Some("Rust")));
/// assert_eq!(parse_header_line("no delimiter"), ("no delimiter", None));
/// ```
pub fn parse_header_line(line: &str) -> (&str, Option<&str>) {
    let mut parts = line.split(HEADER_DELIMITER);
    let key = parts.next().unwrap_or_default();
    (key, parts.next())
}

/// 임의의 리더에서 헤더 추출
///
/// 임계값에 도달하면 더 이상 읽지 않고, EOF까지 도달하지 못하면 빈 레코드로 끝납니다.
pub fn extract_from_reader<R: Read>(mut reader: R, options: &ExtractOptions) -> io::Result<HeaderScanner> {
    let mut scanner = HeaderScanner::new(options.line_count);
    let mut chunk = vec![0u8; options.chunk_size.max(1)];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if scanner.push(&chunk[..n]) {
            break;
        }
    }

    Ok(scanner)
}

/// 단일 글 파일에서 헤더 추출
///
/// # Arguments
/// * `path` - 읽을 파일 경로
/// * `options` - 추출 옵션
///
/// # Returns
/// 추출 결과 또는 읽기 실패 에러 (원인 종류는 구분하지 않음)
pub fn extract_file(path: &Path, options: &ExtractOptions) -> Result<Extracted> {
    let read_error = |e: io::Error| PostJsonError::ReadError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    };

    let file = File::open(path).map_err(read_error)?;
    let file_size = file.metadata().map_err(read_error)?.len();

    let scanner = if file_size > 0 && file_size >= options.mmap_threshold {
        // 대용량 파일: 메모리 매핑 후 청크 단위로 스캔
        extract_with_mmap(&file, options).map_err(read_error)?
    } else {
        extract_from_reader(file, options).map_err(read_error)?
    };

    Ok(scanner.into_extracted(path))
}

/// 메모리 매핑을 사용한 헤더 추출 (대용량 파일용)
fn extract_with_mmap(file: &File, options: &ExtractOptions) -> io::Result<HeaderScanner> {
    let mmap = unsafe { Mmap::map(file)? };
    let mut scanner = HeaderScanner::new(options.line_count);

    for chunk in mmap.chunks(options.chunk_size.max(1)) {
        if scanner.push(chunk) {
            break;
        }
    }

    Ok(scanner)
}
