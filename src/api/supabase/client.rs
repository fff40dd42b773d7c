use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{
    client::{
        MonthPatch, MonthRow, NewMonthRow, NewStrategyRow, NewTradeRow, StrategyPatch,
        StrategyRow, TableStore, TradePatch, TradeRow,
    },
    error::StoreError,
};
use crate::config::StoreConfig;

use super::types::PostgrestErrorBody;

const STRATEGIES_TABLE: &str = "strategies";
const MONTHS_TABLE: &str = "months";
const TRADES_TABLE: &str = "trades";

const CREATED_ORDER: &str = "created_at.asc";
const DATE_ORDER: &str = "date.asc";

/// PostgREST client for the hosted journal backend. One instance per
/// session; reqwest pools the underlying connections.
pub struct SupabaseStore {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl SupabaseStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            http_client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn build_headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| StoreError::Auth(format!("Invalid API key: {}", e)))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| StoreError::Auth(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    /// Triage the response status, returning the body text on success and a
    /// descriptive error otherwise.
    async fn read_body(&self, response: reqwest::Response) -> Result<String, StoreError> {
        let status = response.status();

        if status == 401 || status == 403 {
            return Err(StoreError::Auth(
                "Invalid API key or insufficient row-level permissions".to_string(),
            ));
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<PostgrestErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        order: &str,
    ) -> Result<Vec<T>, StoreError> {
        let url = format!("{}?select=*&order={}", self.table_url(table), order);
        let response = self
            .http_client
            .get(&url)
            .headers(self.build_headers()?)
            .send()
            .await?;

        let body = self.read_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| StoreError::Parse(format!("Failed to parse {} rows: {}", table, e)))
    }

    async fn insert_row<T, B>(&self, table: &str, row: &B) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let mut headers = self.build_headers()?;
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let response = self
            .http_client
            .post(self.table_url(table))
            .headers(headers)
            .json(row)
            .send()
            .await?;

        let body = self.read_body(response).await?;

        // PostgREST wraps the returned representation in an array.
        let rows: Vec<T> = serde_json::from_str(&body)
            .map_err(|e| StoreError::Parse(format!("Failed to parse inserted {} row: {}", table, e)))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Parse(format!("Insert into {} returned no row", table)))
    }

    async fn patch_row<B: Serialize>(
        &self,
        table: &str,
        id: &str,
        patch: &B,
    ) -> Result<(), StoreError> {
        let url = format!("{}?id=eq.{}", self.table_url(table), id);
        let response = self
            .http_client
            .patch(&url)
            .headers(self.build_headers()?)
            .json(patch)
            .send()
            .await?;

        self.read_body(response).await?;
        Ok(())
    }

    async fn delete_row(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let url = format!("{}?id=eq.{}", self.table_url(table), id);
        let response = self
            .http_client
            .delete(&url)
            .headers(self.build_headers()?)
            .send()
            .await?;

        self.read_body(response).await?;
        Ok(())
    }

    /// Call a remote procedure under /rest/v1/rpc.
    pub async fn rpc<T, B>(&self, function: &str, args: &B) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, function);
        let response = self
            .http_client
            .post(&url)
            .headers(self.build_headers()?)
            .json(args)
            .send()
            .await?;

        let body = self.read_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| StoreError::Parse(format!("Failed to parse {} result: {}", function, e)))
    }
}

#[async_trait]
impl TableStore for SupabaseStore {
    async fn list_strategies(&self) -> Result<Vec<StrategyRow>, StoreError> {
        self.fetch_rows(STRATEGIES_TABLE, CREATED_ORDER).await
    }

    async fn insert_strategy(&self, row: NewStrategyRow) -> Result<StrategyRow, StoreError> {
        self.insert_row(STRATEGIES_TABLE, &row).await
    }

    async fn update_strategy(&self, id: &str, patch: StrategyPatch) -> Result<(), StoreError> {
        self.patch_row(STRATEGIES_TABLE, id, &patch).await
    }

    async fn delete_strategy(&self, id: &str) -> Result<(), StoreError> {
        self.delete_row(STRATEGIES_TABLE, id).await
    }

    async fn list_months(&self) -> Result<Vec<MonthRow>, StoreError> {
        self.fetch_rows(MONTHS_TABLE, CREATED_ORDER).await
    }

    async fn insert_month(&self, row: NewMonthRow) -> Result<MonthRow, StoreError> {
        self.insert_row(MONTHS_TABLE, &row).await
    }

    async fn update_month(&self, id: &str, patch: MonthPatch) -> Result<(), StoreError> {
        self.patch_row(MONTHS_TABLE, id, &patch).await
    }

    async fn delete_month(&self, id: &str) -> Result<(), StoreError> {
        self.delete_row(MONTHS_TABLE, id).await
    }

    async fn list_trades(&self) -> Result<Vec<TradeRow>, StoreError> {
        self.fetch_rows(TRADES_TABLE, DATE_ORDER).await
    }

    async fn insert_trade(&self, row: NewTradeRow) -> Result<TradeRow, StoreError> {
        self.insert_row(TRADES_TABLE, &row).await
    }

    async fn update_trade(&self, id: &str, patch: TradePatch) -> Result<(), StoreError> {
        self.patch_row(TRADES_TABLE, id, &patch).await
    }

    async fn delete_trade(&self, id: &str) -> Result<(), StoreError> {
        self.delete_row(TRADES_TABLE, id).await
    }
}
