//! Page requests from `page` / `size` / `sort` query params, page results, and
//! `Link` / `X-Total-Count` response headers.

use crate::error::AppError;
use crate::model::RiddleProperty;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub property: RiddleProperty,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        PageRequest {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, property: RiddleProperty, direction: Direction) -> Self {
        self.sort.push(SortOrder { property, direction });
        self
    }

    /// Build from raw query pairs. Unparsable `page` / `size` fall back to defaults;
    /// an unknown sort property is a bad request.
    pub fn from_query(params: &[(String, String)], default_size: u32) -> Result<Self, AppError> {
        let mut req = PageRequest {
            page: 0,
            size: default_size.clamp(1, MAX_PAGE_SIZE),
            sort: Vec::new(),
        };
        for (k, v) in params {
            match k.as_str() {
                "page" => {
                    req.page = v
                        .trim()
                        .parse::<i64>()
                        .ok()
                        .filter(|n| *n > 0)
                        .map(|n| n.min(u32::MAX as i64) as u32)
                        .unwrap_or(0);
                }
                "size" => {
                    if let Some(n) = v.trim().parse::<i64>().ok().filter(|n| *n >= 1) {
                        req.size = n.min(MAX_PAGE_SIZE as i64) as u32;
                    }
                }
                "sort" => req.sort.extend(parse_sort(v)?),
                _ => {}
            }
        }
        Ok(req)
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

/// `prop[,prop...][,asc|desc]`; the trailing direction applies to every property listed.
fn parse_sort(raw: &str) -> Result<Vec<SortOrder>, AppError> {
    let mut tokens: Vec<&str> = raw.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
    let direction = match tokens.last().and_then(|t| Direction::parse(t)) {
        Some(d) => {
            tokens.pop();
            d
        }
        None => Direction::Asc,
    };
    tokens
        .into_iter()
        .map(|t| -> Result<SortOrder, AppError> {
            Ok(SortOrder {
                property: t.parse()?,
                direction,
            })
        })
        .collect()
}

/// One page of results plus the total row count.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        let size = self.request.size.max(1) as u64;
        self.total.div_ceil(size)
    }
}

/// Query string of `uri` with `page` and `size` replaced.
fn page_uri(uri: &Uri, page: u64, size: u32) -> String {
    let mut pairs: Vec<String> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|p| !p.is_empty())
        .filter(|p| {
            let key = p.split('=').next().unwrap_or("");
            key != "page" && key != "size"
        })
        .map(String::from)
        .collect();
    pairs.push(format!("page={}", page));
    pairs.push(format!("size={}", size));
    format!("{}?{}", uri.path(), pairs.join("&"))
}

fn link(uri: &Uri, page: u64, size: u32, rel: &str) -> String {
    format!("<{}>; rel=\"{}\"", page_uri(uri, page, size), rel)
}

/// `X-Total-Count` plus a `Link` header with next / prev / last / first relations.
pub fn pagination_headers<T>(uri: &Uri, page: &Page<T>) -> Result<HeaderMap, AppError> {
    let number = page.request.page as u64;
    let size = page.request.size;
    let total_pages = page.total_pages();

    let mut links = Vec::with_capacity(4);
    if number + 1 < total_pages {
        links.push(link(uri, number + 1, size, "next"));
    }
    if number > 0 {
        links.push(link(uri, number - 1, size, "prev"));
    }
    let last = total_pages.saturating_sub(1);
    links.push(link(uri, last, size, "last"));
    links.push(link(uri, 0, size, "first"));

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(TOTAL_COUNT_HEADER), HeaderValue::from(page.total));
    let link_value = HeaderValue::from_str(&links.join(","))
        .map_err(|e| AppError::Internal(format!("invalid link header: {}", e)))?;
    headers.insert(axum::http::header::LINK, link_value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_when_absent() {
        let req = PageRequest::from_query(&[], 20).unwrap();
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn invalid_page_and_size_fall_back() {
        let req = PageRequest::from_query(&q(&[("page", "-3"), ("size", "zero")]), 20).unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 20);
        let req = PageRequest::from_query(&q(&[("size", "0")]), 15).unwrap();
        assert_eq!(req.size, 15);
    }

    #[test]
    fn size_is_capped() {
        let req = PageRequest::from_query(&q(&[("page", "2"), ("size", "99999")]), 20).unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(req.size, MAX_PAGE_SIZE);
        assert_eq!(req.offset(), 2 * MAX_PAGE_SIZE as u64);
    }

    #[test]
    fn sort_params() {
        let req = PageRequest::from_query(&q(&[("sort", "id,desc"), ("sort", "name")]), 20).unwrap();
        assert_eq!(
            req.sort,
            vec![
                SortOrder { property: RiddleProperty::Id, direction: Direction::Desc },
                SortOrder { property: RiddleProperty::Name, direction: Direction::Asc },
            ]
        );
        let req = PageRequest::from_query(&q(&[("sort", "name,id,DESC")]), 20).unwrap();
        assert!(req.sort.iter().all(|s| s.direction == Direction::Desc));
        assert_eq!(req.sort.len(), 2);
    }

    #[test]
    fn unknown_sort_property_is_rejected() {
        let err = PageRequest::from_query(&q(&[("sort", "answer,asc")]), 20).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn link_header_middle_page() {
        let uri: Uri = "/api/riddles?sort=id,desc&page=1&size=2".parse().unwrap();
        let page: Page<()> = Page {
            content: vec![],
            total: 5,
            request: PageRequest::new(1, 2),
        };
        let h = pagination_headers(&uri, &page).unwrap();
        assert_eq!(h.get(TOTAL_COUNT_HEADER).unwrap(), "5");
        let link = h.get("link").unwrap().to_str().unwrap();
        assert_eq!(
            link,
            "</api/riddles?sort=id,desc&page=2&size=2>; rel=\"next\",\
             </api/riddles?sort=id,desc&page=0&size=2>; rel=\"prev\",\
             </api/riddles?sort=id,desc&page=2&size=2>; rel=\"last\",\
             </api/riddles?sort=id,desc&page=0&size=2>; rel=\"first\""
        );
    }

    #[test]
    fn link_header_empty_result() {
        let uri: Uri = "/api/riddles".parse().unwrap();
        let page: Page<()> = Page {
            content: vec![],
            total: 0,
            request: PageRequest::default(),
        };
        let link = pagination_headers(&uri, &page).unwrap();
        let link = link.get("link").unwrap().to_str().unwrap();
        assert!(!link.contains("rel=\"next\""));
        assert!(!link.contains("rel=\"prev\""));
        assert!(link.contains("</api/riddles?page=0&size=20>; rel=\"last\""));
    }
}
