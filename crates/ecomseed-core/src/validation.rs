use std::collections::BTreeSet;

use crate::catalog::{FOREIGN_KEYS, INDEXES, TableName};
use crate::error::{Error, Result};

/// Validate internal consistency of the table catalog.
///
/// This checks:
/// - every table appears exactly once in the load order
/// - every foreign key parent is loaded before its child
/// - foreign key and index columns exist on their tables
pub fn validate_catalog() -> Result<()> {
    let mut seen = BTreeSet::new();
    for table in TableName::LOAD_ORDER {
        if !seen.insert(table) {
            return Err(Error::InvalidCatalog(format!(
                "table listed twice in load order: {table}"
            )));
        }
    }

    for fk in &FOREIGN_KEYS {
        let child = position(fk.table);
        let parent = position(fk.referenced_table);
        if parent >= child {
            return Err(Error::InvalidCatalog(format!(
                "{} is loaded before its parent {}",
                fk.table, fk.referenced_table
            )));
        }

        if !fk.table.columns().contains(&fk.column) {
            return Err(Error::InvalidCatalog(format!(
                "foreign key column not found: {}.{}",
                fk.table, fk.column
            )));
        }

        if fk.referenced_table.primary_key() != fk.referenced_column {
            return Err(Error::InvalidCatalog(format!(
                "foreign key {}.{} must reference the primary key of {}",
                fk.table, fk.column, fk.referenced_table
            )));
        }
    }

    for index in &INDEXES {
        if !index.table.columns().contains(&index.column) {
            return Err(Error::InvalidCatalog(format!(
                "index column not found: {}.{}",
                index.table, index.column
            )));
        }
    }

    Ok(())
}

fn position(table: TableName) -> usize {
    TableName::LOAD_ORDER
        .iter()
        .position(|candidate| *candidate == table)
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_consistent() {
        validate_catalog().expect("catalog should validate");
    }

    #[test]
    fn every_foreign_key_column_is_indexed() {
        for fk in &FOREIGN_KEYS {
            assert!(
                INDEXES
                    .iter()
                    .any(|index| index.table == fk.table && index.column == fk.column),
                "missing index for {}.{}",
                fk.table,
                fk.column
            );
        }
    }
}
