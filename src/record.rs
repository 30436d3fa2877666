//! 헤더 레코드 모듈
//!
//! 글 파일 하나에서 추출한 `key: value` 헤더 묶음을 표현합니다.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// 한 파일의 헤더에서 추출한 키-값 매핑
///
/// 키는 처음 삽입된 순서를 유지하며, 같은 키가 다시 나오면 값만 덮어씁니다.
/// 구분자가 없는 줄은 값이 `None`으로 남습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRecord {
    entries: Vec<(String, Option<String>)>,
}

impl FileRecord {
    /// 빈 레코드 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 키-값 삽입 (기존 키는 제자리에서 덮어씀)
    pub fn insert(&mut self, key: String, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// 키의 값 조회
    ///
    /// 키가 없으면 `None`, 키는 있지만 값이 없으면 `Some(None)`을 반환합니다.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// 키 존재 여부
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 값이 없는 키는 JSON 객체에서 생략됩니다.
impl Serialize for FileRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.entries.iter().filter(|(_, v)| v.is_some()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for (key, value) in &self.entries {
            if let Some(value) = value {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
