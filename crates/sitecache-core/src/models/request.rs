use serde::{Deserialize, Serialize};

/// An intercepted request.
///
/// Identity is the exact `(method, url)` pair. Cache matching is literal:
/// no canonicalization is applied, so the URL stored at install time must
/// equal the URL requested at fetch time character for character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub url: String,
}

impl Request {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        let method: String = method.into();
        Self {
            method: method.to_uppercase(),
            url: url.into(),
        }
    }

    /// A GET request, the common case for both precaching and page loads.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Key under which a response snapshot for this request is stored.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_is_normalized_to_uppercase() {
        let req = Request::new("get", "./index.html");
        assert_eq!(req.method, "GET");
    }

    #[test]
    fn cache_key_includes_method_and_url() {
        let req = Request::get("./styles.css");
        assert_eq!(req.cache_key(), "GET ./styles.css");
    }

    #[test]
    fn identical_requests_share_a_key() {
        assert_eq!(
            Request::get("./a").cache_key(),
            Request::new("GET", "./a").cache_key()
        );
        assert_ne!(
            Request::get("./a").cache_key(),
            Request::new("HEAD", "./a").cache_key()
        );
    }
}
