// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main REST API client implementation

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, Response};
use serde::de::DeserializeOwned;
use url::Url;

use rp_api_contract::validation;
use rp_api_contract::*;
use rp_client_api::{AnalyticsApi, ClientApiError, ClientApiResult};

use crate::auth::AuthConfig;
use crate::error::{RestClientError, RestClientResult};

/// All endpoints live under this prefix.
const API_PREFIX: &str = "/api/v1";

/// REST API client for the RepoPulse analytics service
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
    auth: AuthConfig,
}

impl RestClient {
    /// Create a new REST client
    pub fn new(base_url: Url, auth: AuthConfig) -> Self {
        let http_client = HttpClient::builder()
            .user_agent("repopulse/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url,
            auth,
        }
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str, auth: AuthConfig) -> RestClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::new(base_url, auth))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the authentication config
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    // Private helper methods

    fn endpoint<P: serde::Serialize>(
        &self,
        path: &str,
        params: Option<&P>,
    ) -> RestClientResult<Url> {
        let mut url = self.base_url.join(&format!("{API_PREFIX}{path}"))?;
        if let Some(params) = params {
            let pairs = build_query_params(params)?;
            if !pairs.is_empty() {
                url.query_pairs_mut()
                    .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            }
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> RestClientResult<T> {
        self.request(Method::GET, url).await
    }

    async fn request<T: DeserializeOwned>(&self, method: Method, url: Url) -> RestClientResult<T> {
        tracing::debug!(%method, %url, "analytics request");

        let mut request = self.http_client.request(method, url);

        // Add authentication headers
        let auth_headers = self.auth.headers().map_err(|e| RestClientError::Auth(e.to_string()))?;
        request = request.headers(auth_headers);

        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> RestClientResult<T> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(RestClientError::from)
        } else {
            let text = response.text().await?;
            match serde_json::from_str::<ProblemDetails>(&text) {
                Ok(problem) => Err(RestClientError::ServerError {
                    status,
                    details: problem,
                }),
                Err(_) => Err(RestClientError::UnexpectedResponse { status, body: text }),
            }
        }
    }
}

/// Flatten a serializable parameter struct into query pairs. Null fields
/// are omitted; list fields expand into one pair per element, which is the
/// repeated-key form the service expects for id filters.
fn build_query_params<T: serde::Serialize>(params: &T) -> RestClientResult<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    let value = serde_json::to_value(params)?;

    if let serde_json::Value::Object(map) = value {
        for (key, val) in map {
            match val {
                serde_json::Value::Null => {}
                serde_json::Value::Array(items) => {
                    for item in items {
                        pairs.push((key.clone(), scalar_to_string(item)));
                    }
                }
                other => pairs.push((key, scalar_to_string(other))),
            }
        }
    }

    Ok(pairs)
}

fn scalar_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string().trim_matches('"').to_string(),
    }
}

#[async_trait]
impl AnalyticsApi for RestClient {
    async fn metrics_summary(&self, query: &MetricsQuery) -> ClientApiResult<MetricsSummaryDto> {
        validation::validate_metrics_query(query)
            .map_err(|e| ClientApiError::Validation(e.to_string()))?;
        let url = self.endpoint("/metrics/summary", Some(query))?;
        Ok(self.get(url).await?)
    }

    async fn timeline_summary(&self, query: &MetricsQuery) -> ClientApiResult<TimelineSummaryDto> {
        validation::validate_metrics_query(query)
            .map_err(|e| ClientApiError::Validation(e.to_string()))?;
        let url = self.endpoint("/metrics/timeline/summary", Some(query))?;
        Ok(self.get(url).await?)
    }

    async fn developers_summary(
        &self,
        query: &MetricsQuery,
    ) -> ClientApiResult<DevelopersSummaryDto> {
        validation::validate_metrics_query(query)
            .map_err(|e| ClientApiError::Validation(e.to_string()))?;
        let url = self.endpoint("/developers/summary", Some(query))?;
        Ok(self.get(url).await?)
    }

    async fn developer_profile(
        &self,
        author_id: &str,
        query: &DeveloperCommitsQuery,
    ) -> ClientApiResult<DeveloperProfileSummaryDto> {
        validation::validate_developer_commits_query(query)
            .map_err(|e| ClientApiError::Validation(e.to_string()))?;
        let url = self.endpoint(&format!("/developers/{author_id}/summary"), Some(query))?;
        Ok(self.get(url).await?)
    }

    async fn developer_commits(
        &self,
        author_id: &str,
        query: &DeveloperCommitsQuery,
    ) -> ClientApiResult<CursorPageDto<CommitDto>> {
        validation::validate_developer_commits_query(query)
            .map_err(|e| ClientApiError::Validation(e.to_string()))?;
        let url = self.endpoint(&format!("/developers/{author_id}/commits"), Some(query))?;
        Ok(self.get(url).await?)
    }

    async fn list_projects(&self) -> ClientApiResult<Vec<ProjectDto>> {
        let url = self.endpoint::<()>("/entities/projects/", None)?;
        Ok(self.get(url).await?)
    }

    async fn get_project(&self, project_id: i64) -> ClientApiResult<ProjectDetailDto> {
        let url = self.endpoint::<()>(&format!("/entities/projects/{project_id}/"), None)?;
        Ok(self.get(url).await?)
    }

    async fn list_project_repos(&self, project_id: i64) -> ClientApiResult<Vec<RepoDto>> {
        let url = self.endpoint::<()>(&format!("/entities/projects/{project_id}/repos"), None)?;
        Ok(self.get(url).await?)
    }

    async fn repo_commits(
        &self,
        repo_id: &str,
        query: &RepoCommitsQuery,
    ) -> ClientApiResult<CursorPageDto<CommitDto>> {
        validation::validate_repo_commits_query(query)
            .map_err(|e| ClientApiError::Validation(e.to_string()))?;
        let url = self.endpoint(&format!("/entities/repos/{repo_id}/commits"), Some(query))?;
        Ok(self.get(url).await?)
    }

    async fn repo_branches(
        &self,
        repo_id: &str,
        query: &PageQuery,
    ) -> ClientApiResult<CursorPageDto<BranchDto>> {
        let url = self.endpoint(&format!("/entities/repos/{repo_id}/branches"), Some(query))?;
        Ok(self.get(url).await?)
    }

    async fn insights(&self, query: &InsightsQuery) -> ClientApiResult<Vec<InsightDto>> {
        validation::validate_insights_query(query)
            .map_err(|e| ClientApiError::Validation(e.to_string()))?;
        let url = self.endpoint("/insights", Some(query))?;
        Ok(self.get(url).await?)
    }

    async fn sync_status(&self) -> ClientApiResult<SyncStatusDto> {
        let url = self.endpoint::<()>("/status/sync", None)?;
        Ok(self.get(url).await?)
    }

    fn description(&self) -> &str {
        "REST analytics client"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let base_url = "http://localhost:3001";
        let auth = AuthConfig::default();
        let client = RestClient::from_url(base_url, auth).unwrap();

        assert_eq!(client.base_url().to_string(), format!("{}/", base_url));
    }

    #[test]
    fn test_query_params_building() {
        let query = MetricsQuery {
            since: date(2025, 3, 1),
            until: date(2025, 3, 31),
            project_id: Some(7),
            repo_ids: Some(vec!["r1".to_string(), "r2".to_string()]),
            author_ids: None,
            latest_limit: Some(10),
        };

        let pairs = build_query_params(&query).unwrap();
        assert!(pairs.contains(&("since".to_string(), "2025-03-01".to_string())));
        assert!(pairs.contains(&("until".to_string(), "2025-03-31".to_string())));
        assert!(pairs.contains(&("project_id".to_string(), "7".to_string())));
        assert!(pairs.contains(&("latest_limit".to_string(), "10".to_string())));

        // Id lists expand into repeated keys
        let repo_pairs: Vec<_> = pairs.iter().filter(|(k, _)| k == "repo_ids").collect();
        assert_eq!(repo_pairs.len(), 2);

        // Absent optionals are omitted entirely
        assert!(!pairs.iter().any(|(k, _)| k == "author_ids"));
    }

    #[test]
    fn test_endpoint_url_encodes_cursor() {
        let client =
            RestClient::from_url("http://localhost:3001", AuthConfig::default()).unwrap();
        let query = RepoCommitsQuery {
            limit: Some(50),
            cursor: Some("b64+tok/en==".to_string()),
            after: None,
        };
        let url = client
            .endpoint("/entities/repos/r1/commits", Some(&query))
            .unwrap();
        let rendered = url.to_string();
        assert!(rendered.starts_with("http://localhost:3001/api/v1/entities/repos/r1/commits?"));
        // The opaque cursor survives a decode round-trip
        let decoded: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(decoded.contains(&("cursor".to_string(), "b64+tok/en==".to_string())));
    }

    #[test]
    fn test_validation_rejects_inverted_window() {
        let query = MetricsQuery {
            since: date(2025, 4, 2),
            until: date(2025, 4, 1),
            project_id: None,
            repo_ids: None,
            author_ids: None,
            latest_limit: None,
        };
        let err = rp_api_contract::validation::validate_metrics_query(&query).unwrap_err();
        assert!(matches!(
            err,
            rp_api_contract::ApiContractError::InvalidDateWindow { .. }
        ));
    }
}
