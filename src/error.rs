//! 에러 타입 정의 모듈
//!
//! postjson에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// postjson에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum PostJsonError {
    /// 입력 폴더가 존재하지 않음
    #[error("입력 폴더를 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력이 폴더가 아님
    #[error("입력 경로가 폴더가 아닙니다: {path}")]
    NotADirectory { path: PathBuf },

    /// 출력 파일이 이미 존재 (Error 모드에서)
    #[error("출력 파일이 이미 존재합니다: {path}")]
    OutputExists { path: PathBuf },

    /// 폴더 목록 조회 실패
    #[error("폴더 목록을 읽을 수 없습니다 ({path}): {reason}")]
    ListError { path: PathBuf, reason: String },

    /// 파일 읽기 실패
    ///
    /// 파일 없음, 권한 없음, I/O 오류를 구분하지 않습니다.
    #[error("파일 읽기 실패 ({file}): {reason}")]
    ReadError { file: PathBuf, reason: String },

    /// JSON 직렬화 실패
    #[error("JSON 직렬화 실패: {reason}")]
    SerializeError { reason: String },

    /// 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({path}): {reason}")]
    WriteError { path: PathBuf, reason: String },

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPoolError { reason: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },
}

impl PostJsonError {
    /// 변환 단계(읽기)에서 발생한 에러인지 확인
    pub fn is_read_failure(&self) -> bool {
        matches!(self, PostJsonError::ReadError { .. })
    }
}

/// postjson 결과 타입 별칭
pub type Result<T> = std::result::Result<T, PostJsonError>;
