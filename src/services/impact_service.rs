//! Pre-delete impact report.
//!
//! Walks the association table from the target row and counts, per table, the rows a
//! delete would remove and the rows whose foreign key it would clear. Each reached
//! table is selected with nested `IN (SELECT ...)` filters that follow the cascade
//! edges back to the target.

use std::collections::BTreeSet;

use sea_orm::{
    ConnectionTrait, Value,
    sea_query::{Alias, Asterisk, Condition, Expr, Query, SelectStatement},
};

use crate::{
    associations::{AssociationGraph, OnDelete},
    dto::impact::DeletionImpact,
    error::{AppError, AppResult},
    schema,
    state::AppState,
};

struct Target<'a> {
    graph: &'a AssociationGraph,
    table: &'a str,
    key_column: String,
    key: Value,
    closure: BTreeSet<&'static str>,
}

impl Target<'_> {
    fn reaches(&self, table: &str) -> bool {
        table == self.table || self.closure.contains(table)
    }

    /// Rows of `table` that go away with the target.
    fn doomed(&self, table: &str) -> Condition {
        if table == self.table {
            return Condition::all().add(Expr::col(Alias::new(&self.key_column)).eq(self.key.clone()));
        }
        let mut any = Condition::any();
        for edge in self.graph.parents_of(table) {
            if edge.on_delete == OnDelete::Cascade && self.reaches(edge.parent) {
                any = any.add(
                    Expr::col(Alias::new(edge.foreign_key))
                        .in_subquery(self.keys_of(edge.parent, edge.parent_key)),
                );
            }
        }
        any
    }

    fn keys_of(&self, table: &str, column: &str) -> SelectStatement {
        Query::select()
            .column(Alias::new(column))
            .from(Alias::new(table))
            .cond_where(self.doomed(table))
            .to_owned()
    }
}

async fn count<C: ConnectionTrait>(conn: &C, table: &str, condition: Condition) -> AppResult<u64> {
    let select = Query::select()
        .expr(Expr::col(Asterisk).count())
        .from(Alias::new(table))
        .cond_where(condition)
        .to_owned();
    let row = conn
        .query_one(conn.get_database_backend().build(&select))
        .await?
        .ok_or_else(|| anyhow::anyhow!("no count row for {table}"))?;
    let rows = row.try_get_by_index::<i64>(0)?;
    Ok(u64::try_from(rows).unwrap_or_default())
}

/// Count what deleting the row of `table` keyed by `key` would remove or orphan.
pub async fn deletion_impact(
    state: &AppState,
    table: &str,
    key: impl Into<Value>,
) -> AppResult<DeletionImpact> {
    let info = schema::find_table(table)
        .ok_or_else(|| AppError::BadRequest(format!("unknown table {table}")))?;
    let key_column = match info.primary_key.as_slice() {
        [only] => only.clone(),
        _ => return Err(AppError::BadRequest(format!("{table} has no single-column key"))),
    };

    let graph = &state.associations;
    let target = Target {
        graph,
        table,
        key_column,
        key: key.into(),
        closure: graph.cascade_closure(table),
    };

    let mut impact = DeletionImpact::default();
    let found = count(&state.orm, table, target.doomed(table)).await?;
    if found == 0 {
        return Err(AppError::NotFound);
    }
    impact.deleted.insert(table.to_owned(), found);

    for &child in &target.closure {
        let rows = count(&state.orm, child, target.doomed(child)).await?;
        impact.deleted.insert(child.to_owned(), rows);
    }

    for edge in graph.nullified_by(table) {
        let mut condition = Condition::all().add(
            Expr::col(Alias::new(edge.foreign_key)).in_subquery(target.keys_of(edge.parent, edge.parent_key)),
        );
        // Rows deleted through another edge are not left behind with a cleared key.
        if target.reaches(edge.child) {
            condition = condition.add(target.doomed(edge.child).not());
        }
        let rows = count(&state.orm, edge.child, condition).await?;
        impact.cleared.insert(edge.name.to_owned(), rows);
    }

    tracing::debug!(table, deleted = ?impact.deleted, cleared = ?impact.cleared, "deletion impact");
    Ok(impact)
}
