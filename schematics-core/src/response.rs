use reqwest::header::HeaderMap;

/// Result of a service call together with the HTTP envelope it arrived in.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub result: T,
}

impl<T> DetailedResponse<T> {
    pub fn new(status_code: u16, headers: HeaderMap, result: T) -> Self {
        Self {
            status_code,
            headers,
            result,
        }
    }

    /// Look up a response header as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailedResponse<U> {
        DetailedResponse {
            status_code: self.status_code,
            headers: self.headers,
            result: f(self.result),
        }
    }

    pub fn into_result(self) -> T {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_header_lookup_and_map() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc-123"));
        let response = DetailedResponse::new(200, headers, vec![1, 2, 3]);

        assert_eq!(response.header("X-Request-Id"), Some("abc-123"));
        assert_eq!(response.header("missing"), None);

        let mapped = response.map(|v| v.len());
        assert_eq!(mapped.status_code, 200);
        assert_eq!(mapped.into_result(), 3);
    }
}
