use chrono::{DateTime, NaiveDateTime, Utc};
use common::model::chat::ChatEntry;
use rusqlite::{params, Connection, Result};

pub fn insert_entry(conn: &Connection, entry: &ChatEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO chat_history (id, user_id, query, response) VALUES (?1, ?2, ?3, ?4)",
        params![entry.id, entry.user_id, entry.query, entry.response],
    )?;
    Ok(())
}

/// Chat history of `user_id`, oldest first.
pub fn list_entries(conn: &Connection, user_id: &str) -> Result<Vec<ChatEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, query, response, created_at
         FROM chat_history
         WHERE user_id = ?1
         ORDER BY created_at, rowid",
    )?;

    let entries = stmt
        .query_map(params![user_id], |row| {
            let created_at: Option<String> = row.get(4)?;
            Ok(ChatEntry {
                id: row.get(0)?,
                user_id: row.get(1)?,
                query: row.get(2)?,
                response: row.get(3)?,
                created_at: created_at.as_deref().and_then(parse_timestamp),
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(entries)
}

/// SQLite `CURRENT_TIMESTAMP` text (`YYYY-MM-DD HH:MM:SS`, UTC).
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;

    fn entry(id: &str, user: &str, query: &str) -> ChatEntry {
        ChatEntry {
            id: id.to_string(),
            user_id: user.to_string(),
            query: query.to_string(),
            response: format!("answer to {}", query),
            created_at: None,
        }
    }

    #[test]
    fn test_history_is_per_user_and_ordered() {
        let conn = test_connection();
        insert_entry(&conn, &entry("1", "a", "first")).unwrap();
        insert_entry(&conn, &entry("2", "b", "other")).unwrap();
        insert_entry(&conn, &entry("3", "a", "second")).unwrap();

        let history = list_entries(&conn, "a").unwrap();
        let queries: Vec<&str> = history.iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["first", "second"]);
        assert!(history[0].created_at.is_some());
    }

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2024-05-01 09:30:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
