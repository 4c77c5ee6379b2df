//! Schema crawler: tables, fields and derived relationships for a scope

use super::types::{CrawlParams, Relationship};
use crate::api::client::SnowClient;
use crate::api::models::{ReferenceHit, Table, TableField, resolve_super_classes};
use crate::error::{ApiError, CrawlError};
use futures::{StreamExt, TryStreamExt, stream};

pub const TABLE_ENDPOINT: &str = "/api/now/table/sys_db_object";
pub const DICTIONARY_ENDPOINT: &str = "/api/now/table/sys_dictionary";

pub const TABLE_FIELDS: &str = concat!(
    "name,label,sys_id,scope,description,",
    "super_class,super_class.name,",
    "accessible_from,extendable,number_prefix"
);
pub const FIELD_FIELDS: &str = "element,column_label,internal_type,max_length,reference,mandatory,unique";
pub const REFERENCE_FIELDS: &str = "name,element,column_label,reference";

/// Crawls table metadata through a borrowed client
pub struct SchemaService<'a> {
    client: &'a SnowClient,
    concurrency: usize,
}

impl<'a> SchemaService<'a> {
    pub fn new(client: &'a SnowClient) -> Self {
        Self {
            client,
            concurrency: 1,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Encoded query selecting the tables of a scope
    pub fn scope_query(scope: &str) -> String {
        if scope == "global" {
            "sys_scope=global".to_string()
        } else {
            format!("sys_scope.scope={}", scope)
        }
    }

    /// Tables in `scope`; with `detailed`, every table also gets its fields.
    ///
    /// The projection always includes `super_class.name`, so super classes
    /// come back as table names in both modes.
    ///
    /// Field lookups happen one table at a time unless a concurrency bound
    /// was set. The first failing table aborts the whole call.
    pub async fn get_tables(&self, scope: &str, detailed: bool) -> Result<Vec<Table>, CrawlError> {
        let query = Self::scope_query(scope);
        let mut params: Vec<(&str, &str)> = vec![
            ("sysparm_query", query.as_str()),
            ("sysparm_fields", TABLE_FIELDS),
        ];
        if detailed {
            params.push(("sysparm_display_value", "true"));
        }

        let mut tables: Vec<Table> = self
            .client
            .get_result(TABLE_ENDPOINT, &params, "table data")
            .await
            .map_err(CrawlError::Tables)?;
        resolve_super_classes(&mut tables);
        log::debug!("scope {} has {} tables", scope, tables.len());

        if detailed {
            let fields: Vec<Vec<TableField>> = stream::iter(tables.iter())
                .map(|table| async move {
                    self.get_table_fields(&table.name)
                        .await
                        .map_err(|source| CrawlError::Fields {
                            table: table.name.clone(),
                            source,
                        })
                })
                .buffered(self.concurrency)
                .try_collect()
                .await?;

            for (table, table_fields) in tables.iter_mut().zip(fields) {
                table.fields = table_fields;
            }
        }

        Ok(tables)
    }

    /// Field definitions of one table from the dictionary
    pub async fn get_table_fields(&self, table_name: &str) -> Result<Vec<TableField>, ApiError> {
        let query = format!("name={}", table_name);
        let fields: Vec<TableField> = self
            .client
            .get_result(
                DICTIONARY_ENDPOINT,
                &[("sysparm_query", query.as_str()), ("sysparm_fields", FIELD_FIELDS)],
                "field data",
            )
            .await?;
        log::debug!("table {} has {} fields", table_name, fields.len());
        Ok(fields)
    }

    /// Dictionary entries of type reference that point at `table_name`
    pub async fn get_inbound_references(
        &self,
        table_name: &str,
    ) -> Result<Vec<ReferenceHit>, ApiError> {
        let query = format!("internal_type=reference^reference={}", table_name);
        self.client
            .get_result(
                DICTIONARY_ENDPOINT,
                &[
                    ("sysparm_query", query.as_str()),
                    ("sysparm_fields", REFERENCE_FIELDS),
                ],
                "relationship data",
            )
            .await
    }

    /// Relationships for `tables`, one dictionary request per table.
    ///
    /// Output follows table order, then response order, with a table's
    /// inheritance link after its inbound references. Repeats are kept.
    pub async fn get_relationships(&self, tables: &[Table]) -> Result<Vec<Relationship>, CrawlError> {
        let per_table: Vec<Vec<Relationship>> = stream::iter(tables)
            .map(|table| async move {
                let hits = self
                    .get_inbound_references(&table.name)
                    .await
                    .map_err(|source| CrawlError::Relationships {
                        table: table.name.clone(),
                        source,
                    })?;
                Ok::<_, CrawlError>(relationships_for(table, &hits))
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        Ok(per_table.into_iter().flatten().collect())
    }

    /// Full crawl: tables (and fields when detailed) plus relationships
    pub async fn crawl(&self, params: &CrawlParams) -> Result<(Vec<Table>, Vec<Relationship>), CrawlError> {
        let tables = self.get_tables(&params.scope, params.detailed).await?;
        let relationships = self.get_relationships(&tables).await?;
        Ok((tables, relationships))
    }
}

/// Relationships contributed by one table given its inbound reference hits
pub fn relationships_for(table: &Table, hits: &[ReferenceHit]) -> Vec<Relationship> {
    let mut relationships: Vec<Relationship> = hits
        .iter()
        .map(|hit| Relationship::reference(&hit.table, &table.name, &hit.element))
        .collect();
    relationships.extend(Relationship::inheritance(table));
    relationships
}
