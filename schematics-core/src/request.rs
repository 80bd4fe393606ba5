//! Transport-neutral description of one API call.
//!
//! A [`ServiceRequest`] is turned into a fresh `reqwest::Request` on every
//! attempt, so a retried call never trips over a body that was already
//! consumed by the previous attempt.

use crate::error::{CoreError, Result};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// One file in a `multipart/form-data` upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FilePart {
    pub fn new(field: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            field: field.into(),
            file_name: None,
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FilePart>),
}

#[derive(Debug, Clone)]
pub struct ServiceRequest {
    method: Method,
    url: Url,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: RequestBody,
}

impl ServiceRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn header(mut self, name: &str, value: impl ToString) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header_opt<T: ToString>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.header(name, v),
            None => self,
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FilePart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

/// Join a path template such as `/v1/workspaces/{w_id}` onto the service URL.
///
/// Parameter values are percent-encoded as single path segments. A missing or
/// empty parameter is a validation error.
pub fn build_url(base: &str, template: &str, params: &[(&str, &str)]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| CoreError::Config(format!("Service URL cannot be a base: {base}")))?;
        segments.pop_if_empty();

        for raw in template.trim_start_matches('/').split('/') {
            match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| {
                            CoreError::Validation(format!("missing path parameter '{name}'"))
                        })?;
                    if value.is_empty() {
                        return Err(CoreError::Validation(format!(
                            "path parameter '{name}' must not be empty"
                        )));
                    }
                    segments.push(value);
                }
                None => {
                    segments.push(raw);
                }
            }
        }
    }
    Ok(url)
}
