//! Ordered schema steps for the `landing_pages` store.
//!
//! Each step runs inside one upgrade transaction and bumps
//! `PRAGMA user_version` as it lands, so a failed step rolls the whole
//! upgrade back and reports which version broke.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "landing_pages",
        sql: include_str!("0001_landing_pages.sql"),
    },
    SchemaStep {
        version: 2,
        name: "landing_page_indexes",
        sql: include_str!("0002_landing_page_indexes.sql"),
    },
];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version stamped on the connection.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings the page store up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is newer than this build; the
///   file is left untouched.
/// - `Migration` naming the first step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    upgrade(conn, SCHEMA_STEPS)
}

fn upgrade(conn: &mut Connection, steps: &[SchemaStep]) -> DbResult<()> {
    let from = schema_version(conn)?;
    let latest = steps.last().map_or(0, |step| step.version);

    if from > latest {
        error!(
            "event=db_migrate module=db status=error reason=newer_schema db_version={} latest={}",
            from, latest
        );
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = steps.iter().filter(|step| step.version > from).collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        apply_step(&tx, step)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from, latest
    );
    Ok(())
}

fn apply_step(tx: &Transaction<'_>, step: &SchemaStep) -> DbResult<()> {
    let stamped = format!("{}\nPRAGMA user_version = {};", step.sql, step.version);
    tx.execute_batch(&stamped).map_err(|source| {
        error!(
            "event=db_migrate module=db status=error version={} name={} error={}",
            step.version, step.name, source
        );
        DbError::Migration {
            version: step.version,
            name: step.name,
            source,
        }
    })?;
    info!(
        "event=db_migrate module=db status=step version={} name={}",
        step.version, step.name
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, schema_version, upgrade, SchemaStep};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn rejects_newer_schema() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
        let err = apply_migrations(&mut conn).unwrap_err();
        assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
    }

    #[test]
    fn failing_step_reports_its_version_and_rolls_back() {
        let steps = [
            SchemaStep {
                version: 1,
                name: "pages",
                sql: "CREATE TABLE pages (id TEXT PRIMARY KEY);",
            },
            SchemaStep {
                version: 2,
                name: "broken",
                sql: "CREATE INDEX idx_missing ON no_such_table (id);",
            },
        ];
        let mut conn = Connection::open_in_memory().unwrap();

        match upgrade(&mut conn, &steps).unwrap_err() {
            DbError::Migration { version, name, .. } => {
                assert_eq!(version, 2);
                assert_eq!(name, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(schema_version(&conn).unwrap(), 0);
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'pages';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0);
    }

    #[test]
    fn partial_upgrade_applies_only_pending_steps() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE landing_pages (id TEXT);
             PRAGMA user_version = 1;",
        )
        .unwrap();
        let steps = [
            SchemaStep {
                version: 1,
                name: "would_fail_if_rerun",
                sql: "CREATE TABLE landing_pages (id TEXT);",
            },
            SchemaStep {
                version: 2,
                name: "index",
                sql: "CREATE INDEX idx_pages_id ON landing_pages (id);",
            },
        ];

        upgrade(&mut conn, &steps).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 2);
    }
}
