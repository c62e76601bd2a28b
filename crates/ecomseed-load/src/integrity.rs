use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnection;
use tracing::{info, warn};

use ecomseed_core::{FOREIGN_KEYS, ForeignKey, TableName};

use crate::errors::LoadError;
use crate::model::LoadWarning;

/// Stored row count of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCount {
    pub table: TableName,
    pub rows: u64,
}

/// Orphan count for one foreign-key relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipCheck {
    pub relationship: String,
    pub child: TableName,
    pub parent: TableName,
    pub orphans: u64,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub checks: Vec<RelationshipCheck>,
}

impl IntegrityReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    pub fn total_orphans(&self) -> u64 {
        self.checks.iter().map(|check| check.orphans).sum()
    }

    /// One `OrphanRows` warning per failing relationship.
    pub fn warnings(&self) -> Vec<LoadWarning> {
        self.checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| LoadWarning::OrphanRows {
                relationship: check.relationship.clone(),
                orphans: check.orphans,
            })
            .collect()
    }
}

/// Row count for every catalog table, in load order.
pub async fn row_counts(conn: &mut SqliteConnection) -> Result<Vec<TableCount>, LoadError> {
    let mut counts = Vec::with_capacity(TableName::LOAD_ORDER.len());
    for table in TableName::LOAD_ORDER {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let rows: i64 = sqlx::query_scalar(&sql).fetch_one(&mut *conn).await?;
        info!(table = %table, rows, "table row count");
        counts.push(TableCount {
            table,
            rows: rows as u64,
        });
    }
    Ok(counts)
}

pub fn orphan_query(fk: &ForeignKey) -> String {
    let child = fk.table.as_str();
    let parent = fk.referenced_table.as_str();
    format!(
        "SELECT COUNT(*) FROM {child} c \
         LEFT JOIN {parent} p ON c.{column} = p.{referenced} \
         WHERE p.{referenced} IS NULL",
        column = fk.column,
        referenced = fk.referenced_column,
    )
}

/// Count child rows whose foreign key has no matching parent, for every
/// declared relationship.
pub async fn verify_integrity(conn: &mut SqliteConnection) -> Result<IntegrityReport, LoadError> {
    let mut report = IntegrityReport::default();
    for fk in &FOREIGN_KEYS {
        let sql = orphan_query(fk);
        let orphans: i64 = sqlx::query_scalar(&sql).fetch_one(&mut *conn).await?;
        let orphans = orphans as u64;
        if orphans == 0 {
            info!(relationship = fk.label, "integrity check passed");
        } else {
            warn!(relationship = fk.label, orphans, "orphan rows detected");
        }
        report.checks.push(RelationshipCheck {
            relationship: fk.label.to_string(),
            child: fk.table,
            parent: fk.referenced_table,
            orphans,
            passed: orphans == 0,
        });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orphan_query_joins_child_to_parent() {
        assert_eq!(
            orphan_query(&FOREIGN_KEYS[0]),
            "SELECT COUNT(*) FROM orders c LEFT JOIN customers p ON c.customer_id = p.customer_id \
             WHERE p.customer_id IS NULL"
        );
    }

    #[test]
    fn failing_checks_become_warnings() {
        let report = IntegrityReport {
            checks: vec![
                RelationshipCheck {
                    relationship: "Orders -> Customers".to_string(),
                    child: TableName::Orders,
                    parent: TableName::Customers,
                    orphans: 0,
                    passed: true,
                },
                RelationshipCheck {
                    relationship: "Shipments -> Orders".to_string(),
                    child: TableName::Shipments,
                    parent: TableName::Orders,
                    orphans: 3,
                    passed: false,
                },
            ],
        };
        assert!(!report.all_passed());
        assert_eq!(report.total_orphans(), 3);
        assert_eq!(
            report.warnings(),
            vec![LoadWarning::OrphanRows {
                relationship: "Shipments -> Orders".to_string(),
                orphans: 3,
            }]
        );
    }
}
