//! Local user directory and sign-in flows.
//!
//! # Responsibility
//! - Register users in the `phil_users` blob and sign them in.
//! - Track the signed-in user in the `phil_current_user` blob.
//!
//! # Invariants
//! - Emails are unique within the directory and compared exactly, without
//!   trimming or case folding.
//! - Validation failures are recoverable and carry user-facing text.
//! - Credentials are never logged.

use crate::model::user::User;
use crate::repo::blobs::{self, CURRENT_USER_KEY, USERS_KEY};
use crate::repo::kv_repo::{KeyValueStore, RepoError};
use chrono::Utc;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_ROLE: &str = "Productivity Enthusiast";
const GOOGLE_EMAIL: &str = "user@gmail.com";
const GOOGLE_NAME: &str = "Google User";
const GOOGLE_ROLE: &str = "New Member";
const GOOGLE_AVATAR: &str = "https://lh3.googleusercontent.com/a/default-user=s96-c";

/// Sign-up form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub enum AuthError {
    MissingFields,
    UserExists,
    InvalidCredentials,
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Please fill in all fields."),
            Self::UserExists => write!(f, "User already exists."),
            Self::InvalidCredentials => write!(f, "Invalid email or password."),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Use-case service over a borrowed key-value store.
pub struct AuthService<'s, S: KeyValueStore + ?Sized> {
    store: &'s mut S,
}

impl<'s, S: KeyValueStore + ?Sized> AuthService<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    /// Registers a password account and signs it in.
    pub fn sign_up(&mut self, request: &SignUpRequest) -> AuthResult<User> {
        let name = request.name.as_str();
        let email = request.email.as_str();
        if name.is_empty() || email.is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let mut users = self.users();
        if users.iter().any(|user| user.email == email) {
            return Err(AuthError::UserExists);
        }

        let user = User {
            id: Utc::now().timestamp_millis().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: DEFAULT_ROLE.to_string(),
            avatar: avatar_url(name),
            password: Some(request.password.clone()),
        };
        users.push(user.clone());
        blobs::save(&mut *self.store, USERS_KEY, &users)?;
        self.set_current_user(&user)?;

        info!("event=auth_sign_up module=auth status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Signs in with an exact email and password match.
    pub fn log_in(&mut self, email: &str, password: &str) -> AuthResult<User> {
        let found = self
            .users()
            .into_iter()
            .find(|user| user.email == email && user.password.as_deref() == Some(password));

        let Some(user) = found else {
            info!("event=auth_log_in module=auth status=rejected");
            return Err(AuthError::InvalidCredentials);
        };
        self.set_current_user(&user)?;
        info!("event=auth_log_in module=auth status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Mock federated sign-in.
    ///
    /// The first call registers the Google account; later calls return the
    /// registered record so task ownership stays stable.
    pub fn google_log_in(&mut self) -> AuthResult<User> {
        let mut users = self.users();
        let existing = users.iter().find(|user| user.email == GOOGLE_EMAIL).cloned();
        let user = match existing {
            Some(existing) => existing,
            None => {
                let user = User {
                    id: format!("google-user-{}", Utc::now().timestamp_millis()),
                    name: GOOGLE_NAME.to_string(),
                    email: GOOGLE_EMAIL.to_string(),
                    role: GOOGLE_ROLE.to_string(),
                    avatar: GOOGLE_AVATAR.to_string(),
                    password: None,
                };
                users.push(user.clone());
                blobs::save(&mut *self.store, USERS_KEY, &users)?;
                user
            }
        };

        self.set_current_user(&user)?;
        info!("event=auth_google module=auth status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Registered users; a missing or corrupt blob reads as empty and
    /// undecodable entries are skipped.
    pub fn users(&self) -> Vec<User> {
        blobs::load_list(&*self.store, USERS_KEY)
    }

    pub fn current_user(&self) -> Option<User> {
        blobs::load_optional(&*self.store, CURRENT_USER_KEY)
    }

    pub fn set_current_user(&mut self, user: &User) -> AuthResult<()> {
        blobs::save(&mut *self.store, CURRENT_USER_KEY, user)?;
        Ok(())
    }

    pub fn log_out(&mut self) -> AuthResult<()> {
        self.store.remove(CURRENT_USER_KEY)?;
        info!("event=auth_log_out module=auth status=ok");
        Ok(())
    }
}

fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=153e28&color=fff",
        urlencoding::encode(name)
    )
}

#[cfg(test)]
mod tests {
    use super::avatar_url;

    #[test]
    fn avatar_url_encodes_the_name() {
        assert_eq!(
            avatar_url("Zevanya Casey"),
            "https://ui-avatars.com/api/?name=Zevanya%20Casey&background=153e28&color=fff"
        );
    }
}
