use serde::{Deserialize, Serialize};

/// 1ページあたりの既定件数
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 1ページあたりの最大件数
pub const MAX_PAGE_SIZE: u32 = 100;

/// ページ指定（0始まりのページ番号とページサイズ）
///
/// デシリアライズも`PageRequest::new`を経由するため、サイズは常に丸められる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    size: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_page_size")]
    size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        Self::new(raw.page, raw.size)
    }
}

impl PageRequest {
    /// ページ指定を作成する
    ///
    /// サイズは1以上`MAX_PAGE_SIZE`以下に丸められる。
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// 先頭からの読み飛ばし件数
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// クエリ結果の1ページ分と総件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            page: request.page(),
            size: request.size(),
        }
    }

    /// 総ページ数（サイズ0は1件として扱う）
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.size.max(1)))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 20).offset(), 60);
    }

    #[test]
    fn test_page_request_clamps_size() {
        assert_eq!(PageRequest::new(0, 0).size(), 1);
        assert_eq!(PageRequest::new(0, 10_000).size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_deserialized_page_request_is_clamped() {
        let request: PageRequest = serde_json::from_str(r#"{"page": 2, "size": 0}"#).unwrap();
        assert_eq!(request, PageRequest::new(2, 1));

        let request: PageRequest = serde_json::from_str(r#"{"size": 500}"#).unwrap();
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), MAX_PAGE_SIZE);

        let request: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_total_pages_with_zero_size_does_not_panic() {
        let page: Page<u8> = Page {
            content: vec![],
            total_elements: 5,
            page: 0,
            size: 0,
        };
        assert_eq!(page.total_pages(), 5);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![], 21, PageRequest::new(0, 10));
        assert_eq!(page.total_pages(), 3);

        let page: Page<u8> = Page::new(vec![], 0, PageRequest::new(0, 10));
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_map_keeps_paging_metadata() {
        let page = Page::new(vec![1, 2], 12, PageRequest::new(1, 2)).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 2);
    }
}
