//! Thin Supabase REST (PostgREST) client

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use crate::config::SupabaseConfig;
use crate::domain::DomainError;

/// HTTP client for a Supabase project's REST endpoint.
///
/// All repository implementations share one client; it only knows about
/// tables, filters and rows, not about domain entities.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Select rows from a table; `filters` are PostgREST query pairs such as
    /// `("id", "eq.42")`
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, DomainError> {
        let request = self.authorize(self.http.get(self.table_url(table)).query(filters));
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Supabase request failed: {}", e)))?;

        Self::check_status(table, &response)?;

        response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Failed to parse Supabase response: {}", e)))
    }

    /// Insert a row and return the stored representation
    pub async fn insert<T, R>(&self, table: &str, row: &T) -> Result<R, DomainError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let request = self
            .authorize(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(row);

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Supabase request failed: {}", e)))?;

        Self::check_status(table, &response)?;
        Self::single_row(table, response).await
    }

    /// Update rows matching `id` and return the stored representation
    pub async fn update<T, R>(&self, table: &str, id: &str, row: &T) -> Result<R, DomainError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let request = self
            .authorize(self.http.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(row);

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Supabase request failed: {}", e)))?;

        Self::check_status(table, &response)?;
        Self::single_row(table, response).await
    }

    /// Delete rows matching `id`; returns whether anything was deleted
    pub async fn delete(&self, table: &str, id: &str) -> Result<bool, DomainError> {
        let request = self
            .authorize(self.http.delete(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation");

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Supabase request failed: {}", e)))?;

        Self::check_status(table, &response)?;

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Failed to parse Supabase response: {}", e)))?;

        Ok(!rows.is_empty())
    }

    /// Check that the project's storage endpoint is reachable
    pub async fn storage_healthy(&self) -> Result<(), DomainError> {
        let url = format!("{}/storage/v1/bucket", self.base_url);
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Supabase storage unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::upstream(format!(
                "Supabase storage returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn check_status(table: &str, response: &reqwest::Response) -> Result<(), DomainError> {
        let status = response.status();

        if !status.is_success() {
            return Err(DomainError::upstream(format!(
                "Supabase returned {} for table '{}'",
                status, table
            )));
        }

        Ok(())
    }

    async fn single_row<R: DeserializeOwned>(
        table: &str,
        response: reqwest::Response,
    ) -> Result<R, DomainError> {
        let mut rows: Vec<R> = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Failed to parse Supabase response: {}", e)))?;

        if rows.is_empty() {
            return Err(DomainError::not_found(format!(
                "No row returned from table '{}'",
                table
            )));
        }

        Ok(rows.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Row {
        id: String,
        name: String,
    }

    fn config(server: &MockServer) -> SupabaseConfig {
        SupabaseConfig {
            url: server.uri(),
            service_key: "test-key".to_string(),
        }
    }

    #[tokio::test]
    async fn test_select_sends_auth_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/categories"))
            .and(header("apikey", "test-key"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "a", "name": "Banners" }
            ])))
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(&server)).unwrap();
        let rows: Vec<Row> = client.select("categories", &[]).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Banners");
    }

    #[tokio::test]
    async fn test_select_with_filter() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/orders"))
            .and(query_param("id", "eq.42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "42", "name": "banner order" }
            ])))
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(&server)).unwrap();
        let rows: Vec<Row> = client
            .select("orders", &[("id", "eq.42".to_string())])
            .await
            .unwrap();

        assert_eq!(rows[0].id, "42");
    }

    #[tokio::test]
    async fn test_upstream_error_status_mapped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/categories"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(&server)).unwrap();
        let result: Result<Vec<Row>, _> = client.select("categories", &[]).await;

        assert!(matches!(result, Err(DomainError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_insert_returns_representation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/categories"))
            .and(header("prefer", "return=representation"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([
                { "id": "b", "name": "Flyers" }
            ])))
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(&server)).unwrap();
        let row = Row {
            id: "b".to_string(),
            name: "Flyers".to_string(),
        };
        let stored: Row = client.insert("categories", &row).await.unwrap();

        assert_eq!(stored, row);
    }

    #[tokio::test]
    async fn test_delete_reports_missing_row() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(&server)).unwrap();
        assert!(!client.delete("orders", "missing").await.unwrap());
    }
}
