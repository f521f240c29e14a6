use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::model::{DriverRecord, RawDriverRow};
use super::transform;
use crate::athena::{QueryResult, QuerySource};
use crate::etl::{ETLPipeline, StageError};
use crate::supabase::RestTable;

/// Driver dimension query; both columns are aliased to the destination names.
pub const EXTRACT_QUERY: &str = r#"SELECT
    matricula_motorista AS chapa,
    ope_nome AS nome
FROM "csc-views-gestao-informacao"."dim_motorista""#;

/// Key column used by the delete filter.
pub const KEY_COLUMN: &str = "chapa";

/// A badge value no driver can have. The data API refuses unfiltered
/// deletes, so "delete all" is `chapa <> DELETE_SENTINEL`.
pub const DELETE_SENTINEL: &str = "__NONE__";

/// Moves the driver dimension from a query source into a REST table.
pub struct DriverPipeline<S, D> {
    source: S,
    table: D,
}

impl<S, D> DriverPipeline<S, D>
where
    S: QuerySource,
    D: RestTable,
{
    pub fn new(source: S, table: D) -> Self {
        DriverPipeline { source, table }
    }
}

/// Reads the `chapa` and `nome` columns out of a query result.
pub fn rows_from_result(result: &QueryResult) -> Result<Vec<RawDriverRow>, StageError> {
    let chapa = result.column_index("chapa")?;
    let nome = result.column_index("nome")?;

    Ok((0..result.row_count())
        .map(|i| RawDriverRow {
            chapa: result.cell(i, chapa).map(str::to_string),
            nome: result.cell(i, nome).map(str::to_string),
        })
        .collect())
}

#[async_trait]
impl<S, D> ETLPipeline<RawDriverRow, DriverRecord> for DriverPipeline<S, D>
where
    S: QuerySource,
    D: RestTable,
{
    async fn extract(&self, _cancel: &CancellationToken) -> Result<Vec<RawDriverRow>, StageError> {
        let result = self.source.query(EXTRACT_QUERY).await?;
        rows_from_result(&result)
    }

    fn transform(&self, items: Vec<RawDriverRow>) -> Vec<DriverRecord> {
        transform::clean(items)
    }

    async fn clear(&self, _cancel: &CancellationToken) -> Result<(), StageError> {
        self.table.delete_neq(KEY_COLUMN, DELETE_SENTINEL).await?;
        Ok(())
    }

    async fn load(
        &self,
        _cancel: &CancellationToken,
        items: &[DriverRecord],
    ) -> Result<Option<usize>, StageError> {
        let rows = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        let inserted = self.table.insert_rows(&rows).await?;
        Ok(inserted.map(|rows| rows.len()))
    }
}
