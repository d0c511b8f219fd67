//! User account repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and look up the accounts that own notes.
//! - Delete accounts while keeping their notes (author is set to NULL).
//!
//! # Invariants
//! - Usernames are unique; collisions surface as `DuplicateUsername`.
//! - Deleting a user never deletes notes (`ON DELETE SET NULL`).

use super::{ensure_schema_current, is_unique_violation, parse_uuid, RepoError, RepoResult};
use crate::model::user::{User, UserId};
use rusqlite::{params, Connection, OptionalExtension};

const USERNAME_COLUMN: &str = "users.username";

/// Repository interface for user accounts.
pub trait UserRepository {
    fn insert_user(&self, user: &User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_current(conn)?;
        Ok(Self { conn })
    }

    fn query_one(&self, sql: &str, value: &str) -> RepoResult<Option<User>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(sql, [value], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;
        match row {
            Some((uuid_text, username)) => Ok(Some(User {
                id: parse_uuid(&uuid_text, "users.uuid")?,
                username,
            })),
            None => Ok(None),
        }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(&self, user: &User) -> RepoResult<UserId> {
        let result = self.conn.execute(
            "INSERT INTO users (uuid, username) VALUES (?1, ?2);",
            params![user.id.to_string(), user.username.as_str()],
        );
        match result {
            Ok(_) => Ok(user.id),
            Err(err) if is_unique_violation(&err, USERNAME_COLUMN) => {
                Err(RepoError::DuplicateUsername(user.username.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.query_one(
            "SELECT uuid, username FROM users WHERE uuid = ?1;",
            &id.to_string(),
        )
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.query_one(
            "SELECT uuid, username FROM users WHERE username = ?1;",
            username,
        )
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}
