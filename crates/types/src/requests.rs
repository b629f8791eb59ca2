//! Caller-facing request parameters.
//!
//! These are the already-validated tool arguments. Serializing one yields
//! the loose option bag the query normalizer turns into a query string, so
//! field names match the upstream parameters.

use serde::{Deserialize, Serialize};

/// Paging and filtering options shared by the collection endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub field_list: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub filter: Option<String>,
}

impl PageRequest {
    pub fn with_field_list(mut self, field_list: impl Into<String>) -> Self {
        self.field_list = Some(field_list.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Parameters of the multi-resource search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Comma separated resource names, e.g. `character,issue`.
    #[serde(default)]
    pub resources: Option<String>,
    #[serde(default)]
    pub field_list: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Self::default() }
    }

    pub fn with_resources(mut self, resources: impl Into<String>) -> Self {
        self.resources = Some(resources.into());
        self
    }

    pub fn with_field_list(mut self, field_list: impl Into<String>) -> Self {
        self.field_list = Some(field_list.into());
        self
    }
}

/// A free-text name plus paging, used by the name-driven composite tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRequest {
    /// Character name searched for, e.g. `Superman`.
    pub filter: String,
    #[serde(default)]
    pub field_list: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Options of the HTML digest of issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicsHtmlRequest {
    #[serde(default)]
    pub title: Option<String>,
    /// Restricts issues to this name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "issueNumber")]
    pub issue_number: Option<i64>,
    /// Upstream sort expression, e.g. `cover_date:desc`.
    #[serde(default, rename = "orderBy")]
    pub order_by: Option<String>,
    #[serde(default)]
    pub field_list: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl ComicsHtmlRequest {
    pub const DEFAULT_TITLE: &'static str = "DC Comics Issues";
    pub const DEFAULT_LIMIT: u32 = 20;

    /// Upstream `filter` expression combining the name and issue number.
    pub fn filter(&self) -> Option<String> {
        let mut clauses = Vec::new();
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
            clauses.push(format!("name:{name}"));
        }
        if let Some(number) = self.issue_number {
            clauses.push(format!("issue_number:{number}"));
        }
        (!clauses.is_empty()).then(|| clauses.join(","))
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().filter(|title| !title.trim().is_empty()).unwrap_or(Self::DEFAULT_TITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn digest_filter_combines_name_and_issue_number() {
        let request = ComicsHtmlRequest {
            name: Some("Batman".into()),
            issue_number: Some(27),
            ..ComicsHtmlRequest::default()
        };
        assert_eq!(request.filter().as_deref(), Some("name:Batman,issue_number:27"));
        assert_eq!(ComicsHtmlRequest::default().filter(), None);
        assert_eq!(ComicsHtmlRequest::default().title(), "DC Comics Issues");
    }

    #[test]
    fn digest_request_uses_camel_case_argument_names() {
        let request: ComicsHtmlRequest =
            serde_json::from_value(json!({ "issueNumber": 1, "orderBy": "cover_date:desc" })).unwrap();
        assert_eq!(request.issue_number, Some(1));
        assert_eq!(request.order_by.as_deref(), Some("cover_date:desc"));
    }

    #[test]
    fn page_request_serializes_to_upstream_parameter_names() {
        let page = PageRequest::default().with_limit(5).with_filter("name:Robin");
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["limit"], json!(5));
        assert_eq!(value["filter"], json!("name:Robin"));
        assert!(value["offset"].is_null());
    }
}
