use chrono::Utc;
use common::model::profile::{ProfileUpdate, UserProfile, DEFAULT_ROLE};
use common::model::session::SessionUser;
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Creates the profile row for a signed-in user if it does not exist yet.
pub fn ensure_profile(conn: &Connection, user: &SessionUser) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO profiles (id, email, first_name, last_name, role) VALUES (?1, ?2, ?3, '', ?4)",
        params![user.id, user.email, user.name, user.role],
    )?;
    Ok(())
}

pub fn get_profile(conn: &Connection, user_id: &str) -> Result<Option<UserProfile>> {
    conn.query_row(
        "SELECT id, email, first_name, last_name, role, created_at, updated_at FROM profiles WHERE id = ?1",
        params![user_id],
        |row| {
            Ok(UserProfile {
                id: row.get(0)?,
                email: row.get(1)?,
                first_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                last_name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                role: row
                    .get::<_, Option<String>>(4)?
                    .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
                created_at: row.get(5)?,
                updated_at: row.get(6)?,
            })
        },
    )
    .optional()
}

/// Returns `false` when no profile exists for `user_id`.
pub fn update_profile(conn: &Connection, user_id: &str, update: &ProfileUpdate) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE profiles SET first_name = ?1, last_name = ?2, updated_at = ?3 WHERE id = ?4",
        params![
            update.first_name.trim(),
            update.last_name.trim(),
            Utc::now().to_rfc3339(),
            user_id
        ],
    )?;
    Ok(updated > 0)
}
