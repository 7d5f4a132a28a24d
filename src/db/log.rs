use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Append an audit entry (`operation`, `target`, `message`) to the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Audit entries for `operation`, optionally narrowed to one target key.
pub fn count_entries(conn: &Connection, operation: &str, target: Option<&str>) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM log
         WHERE operation = ?1 AND (?2 IS NULL OR target = ?2)",
        params![operation, target],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::DbPool;

    #[test]
    fn entries_are_counted_per_operation_and_target() {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();

        ttlog(&pool.conn, "queue", "GEO202", "2024-07-20 present queued offline").unwrap();
        ttlog(&pool.conn, "queue", "MIN101", "2024-07-15 absent queued offline").unwrap();
        ttlog(&pool.conn, "sync", "S1", "2 queued record(s) applied").unwrap();

        assert_eq!(count_entries(&pool.conn, "queue", None).unwrap(), 2);
        assert_eq!(count_entries(&pool.conn, "queue", Some("GEO202")).unwrap(), 1);
        assert_eq!(count_entries(&pool.conn, "mark", None).unwrap(), 0);
    }
}
