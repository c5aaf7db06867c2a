//! Upstream content API wire format

use serde::{Deserialize, Serialize};

/// Method name of the "get article content" call
pub const GET_CONTENT_METHOD: &str = "v9_news_getcontent";

/// Request envelope, sent form-encoded as `Request=<json>`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ContentRequest {
    pub method: String,
    pub params: RequestParams,
    pub token: String,
    pub terminal: String,
    pub version: String,
    #[serde(rename = "UID")]
    pub uid: i64,
    pub app_flag: String,
    pub sign: String,
    pub ap_version_code: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RequestParams {
    pub id: u64,
}

impl ContentRequest {
    /// Anonymous request for one article
    pub fn for_article(id: u64) -> Self {
        Self {
            method: GET_CONTENT_METHOD.to_string(),
            params: RequestParams { id },
            token: String::new(),
            terminal: "11".to_string(),
            version: "4.0".to_string(),
            uid: 0,
            app_flag: "18".to_string(),
            sign: String::new(),
            ap_version_code: 1,
        }
    }

    /// Form body: a single `Request` field holding the JSON envelope
    pub fn form_body(&self) -> serde_json::Result<Vec<(&'static str, String)>> {
        Ok(vec![("Request", serde_json::to_string(self)?)])
    }
}

/// Top-level response; everything useful sits under `Data`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ContentResponse {
    #[serde(rename = "Data", default)]
    pub data: Option<ContentData>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ContentData {
    #[serde(default)]
    pub playurl: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<ContentItem>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One transcript line; only the English side is used
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ContentItem {
    #[serde(default)]
    pub en: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope_field_names() {
        let request = ContentRequest::for_article(704573);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["Method"], "v9_news_getcontent");
        assert_eq!(value["Params"]["id"], 704573);
        assert_eq!(value["Token"], "");
        assert_eq!(value["Terminal"], "11");
        assert_eq!(value["Version"], "4.0");
        assert_eq!(value["UID"], 0);
        assert_eq!(value["AppFlag"], "18");
        assert_eq!(value["Sign"], "");
        assert_eq!(value["ApVersionCode"], 1);
    }

    #[test]
    fn test_form_body() {
        let body = ContentRequest::for_article(1).form_body().unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].0, "Request");
        assert!(body[0].1.starts_with("{\"Method\":\"v9_news_getcontent\""));
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: ContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_none());

        let response: ContentResponse =
            serde_json::from_str(r#"{"Data": {"content": [{"cn": "只有中文"}]}}"#).unwrap();
        let data = response.data.unwrap();
        assert!(data.playurl.is_none());
        assert!(data.content.unwrap()[0].en.is_none());
    }
}
