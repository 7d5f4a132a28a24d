use crate::db::migrate::applied_count;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

fn count(pool: &DbPool, sql: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(sql, [], |row| row.get(0))
}

/// Total queued items across every student's offline queue.
fn pending_queue_items(pool: &DbPool) -> rusqlite::Result<usize> {
    let mut stmt = pool
        .conn
        .prepare("SELECT value FROM kv WHERE key LIKE 'queue:%'")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut total = 0;
    for raw in rows {
        // Malformed blobs are reported by the session when it loads them.
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(&raw?) {
            total += items.len();
        }
    }
    Ok(total)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) CONTENT
    //
    let students = count(pool, "SELECT COUNT(*) FROM students")?;
    let courses = count(pool, "SELECT COUNT(*) FROM courses")?;
    let keys = count(pool, "SELECT COUNT(*) FROM kv")?;
    let log_rows = count(pool, "SELECT COUNT(*) FROM log")?;

    println!("{}• Students:{} {}{}{}", CYAN, RESET, GREEN, students, RESET);
    println!("{}• Courses:{} {}", CYAN, RESET, courses);
    println!("{}• Stored keys:{} {}", CYAN, RESET, keys);
    println!("{}• Log entries:{} {}", CYAN, RESET, log_rows);

    //
    // 3) OFFLINE QUEUE
    //
    let pending = pending_queue_items(pool)?;
    if pending == 0 {
        println!("{}• Pending offline records:{} {}0{}", CYAN, RESET, GREY, RESET);
    } else {
        println!(
            "{}• Pending offline records:{} {}{}{}",
            CYAN, RESET, YELLOW, pending, RESET
        );
    }

    //
    // 4) SCHEMA
    //
    println!(
        "{}• Migrations applied:{} {}",
        CYAN,
        RESET,
        applied_count(&pool.conn)?
    );

    println!();
    Ok(())
}
