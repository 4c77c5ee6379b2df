use crate::AppError;
use crate::api::client::SnowClient;
use crate::api::record::Record;
use crate::utils::validation::validate_table_name;

pub const TABLE_API_PREFIX: &str = "/api/now/table";

/// Record listing parameters
#[derive(Debug, Clone)]
pub struct RecordQuery {
    pub table: String,
    pub limit: u32,
    /// Encoded query, e.g. `active=true^priority=1`
    pub query: Option<String>,
}

/// Raw record access for any table
pub struct RecordService<'a> {
    client: &'a SnowClient,
}

impl<'a> RecordService<'a> {
    pub fn new(client: &'a SnowClient) -> Self {
        Self { client }
    }

    pub fn endpoint(table: &str) -> String {
        format!("{}/{}", TABLE_API_PREFIX, table)
    }

    pub async fn fetch_records(&self, params: &RecordQuery) -> Result<Vec<Record>, AppError> {
        validate_table_name(&params.table)?;

        let endpoint = Self::endpoint(&params.table);
        let limit = params.limit.to_string();
        let mut query: Vec<(&str, &str)> = vec![("sysparm_limit", limit.as_str())];
        if let Some(filter) = params.query.as_deref().filter(|q| !q.is_empty()) {
            query.push(("sysparm_query", filter));
        }

        let records: Vec<Record> = self
            .client
            .get_result(&endpoint, &query, "records")
            .await?;
        log::debug!("fetched {} records from {}", records.len(), params.table);
        Ok(records)
    }
}
