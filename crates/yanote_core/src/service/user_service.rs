//! User account use-case service.
//!
//! # Responsibility
//! - Provision, look up and remove the accounts that own notes.
//!
//! # Invariants
//! - Usernames are trimmed and non-blank before persistence.
//! - Removing an account keeps its notes, with the author cleared.

use crate::model::user::{User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for account use-cases.
#[derive(Debug)]
pub enum UserServiceError {
    InvalidUsername(String),
    DuplicateUsername(String),
    UserNotFound(String),
    Repo(RepoError),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUsername(value) => write!(f, "invalid username: `{value}`"),
            Self::DuplicateUsername(value) => write!(f, "username already exists: `{value}`"),
            Self::UserNotFound(value) => write!(f, "user not found: `{value}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for UserServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateUsername(name) => Self::DuplicateUsername(name),
            other => Self::Repo(other),
        }
    }
}

/// Account service facade over repository implementations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an account with a fresh id.
    pub fn create_user(&self, username: &str) -> Result<User, UserServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(UserServiceError::InvalidUsername(username.to_string()));
        }

        let user = User::new(username);
        self.repo.insert_user(&user)?;
        Ok(user)
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<User>, UserServiceError> {
        Ok(self.repo.get_user(id)?)
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repo.find_by_username(username.trim())?)
    }

    /// Removes an account; its notes remain stored without an author.
    pub fn delete_user(&self, username: &str) -> Result<User, UserServiceError> {
        let user = self
            .find_by_username(username)?
            .ok_or_else(|| UserServiceError::UserNotFound(username.trim().to_string()))?;
        self.repo.delete_user(user.id)?;
        Ok(user)
    }
}
