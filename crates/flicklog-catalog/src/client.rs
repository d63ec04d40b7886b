use crate::error::CatalogError;
use flicklog_models::{MovieDetail, MovieId, MovieSummary};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Read-only client for the external movie catalog (TMDB). Two operations,
/// both treated as opaque JSON sources: search by title, fetch by id.
#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl CatalogClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CatalogError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CatalogError::MissingApiKey);
        }
        Ok(Self {
            http: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Search the catalog by title text. A payload that is not the expected
    /// shape degrades to zero results, per the lenient policy for this
    /// endpoint; an embedded error object is surfaced as `Api`.
    pub async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        let url = format!("{}/search/movie", self.base_url);
        debug!(query, "searching catalog");
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;
        parse_search_payload(payload)
    }

    /// Fetch the full detail record for one identifier.
    pub async fn movie_detail(&self, id: &MovieId) -> Result<MovieDetail, CatalogError> {
        let url = format!("{}/movie/{}", self.base_url, id);
        debug!(%id, "fetching catalog detail");
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;
        parse_detail_payload(payload)
    }
}

fn embedded_error(payload: &Value) -> Option<String> {
    let obj = payload.as_object()?;
    if obj.contains_key("status_code") || obj.contains_key("errors") {
        let message = obj
            .get("status_message")
            .and_then(Value::as_str)
            .unwrap_or("catalog reported an error");
        return Some(message.to_string());
    }
    None
}

pub(crate) fn parse_search_payload(payload: Value) -> Result<Vec<MovieSummary>, CatalogError> {
    if !payload.is_object() {
        return Err(CatalogError::Malformed(
            "search payload is not an object".to_string(),
        ));
    }
    if let Some(message) = embedded_error(&payload) {
        return Err(CatalogError::Api(message));
    }

    let Some(results) = payload.get("results").and_then(Value::as_array) else {
        warn!("search payload has no results array, treating as zero results");
        return Ok(Vec::new());
    };

    let mut summaries = Vec::with_capacity(results.len());
    for item in results {
        match serde_json::from_value::<MovieSummary>(item.clone()) {
            Ok(summary) => summaries.push(summary),
            Err(e) => debug!(error = %e, "skipping unparsable search result"),
        }
    }
    Ok(summaries)
}

pub(crate) fn parse_detail_payload(payload: Value) -> Result<MovieDetail, CatalogError> {
    if !payload.is_object() {
        return Err(CatalogError::Malformed(
            "detail payload is not an object".to_string(),
        ));
    }
    if let Some(message) = embedded_error(&payload) {
        return Err(CatalogError::Api(message));
    }
    serde_json::from_value(payload).map_err(|e| CatalogError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_api_key_is_a_configuration_error() {
        let err = CatalogClient::new("").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn search_payload_parses_summaries() {
        let payload = json!({
            "page": 1,
            "results": [
                {"id": 603, "title": "The Matrix", "genre_ids": [28, 878]},
                {"id": 604, "title": "The Matrix Reloaded"}
            ]
        });
        let results = parse_search_payload(payload).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "The Matrix");
    }

    #[test]
    fn search_payload_without_results_array_is_zero_results() {
        let results = parse_search_payload(json!({"page": 1, "results": "nope"})).unwrap();
        assert!(results.is_empty());
        let results = parse_search_payload(json!({"page": 1})).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn non_object_search_payload_is_malformed() {
        assert!(matches!(
            parse_search_payload(json!([1, 2, 3])),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn embedded_error_code_is_surfaced() {
        let payload = json!({
            "status_code": 7,
            "status_message": "Invalid API key"
        });
        match parse_search_payload(payload) {
            Err(CatalogError::Api(message)) => assert_eq!(message, "Invalid API key"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn unparsable_search_items_are_skipped() {
        let payload = json!({
            "results": [
                {"id": 603, "title": "The Matrix"},
                {"no_id": true}
            ]
        });
        let results = parse_search_payload(payload).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn detail_payload_parses_with_genres() {
        let payload = json!({
            "id": 603,
            "title": "The Matrix",
            "overview": "A hacker learns the truth.",
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]
        });
        let detail = parse_detail_payload(payload).unwrap();
        assert_eq!(detail.genres.len(), 2);
        assert_eq!(detail.overview, "A hacker learns the truth.");
    }

    #[test]
    fn detail_with_embedded_error_is_an_api_error() {
        let payload = json!({
            "status_code": 34,
            "status_message": "The resource you requested could not be found."
        });
        assert!(matches!(
            parse_detail_payload(payload),
            Err(CatalogError::Api(_))
        ));
    }
}
