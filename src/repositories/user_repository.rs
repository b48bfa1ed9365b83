use std::sync::Arc;
use uuid::Uuid;

use crate::database::{RecordCollection, RecordStore};
use crate::models::user::User;
use crate::utils::errors::{not_found_error, AppResult};

pub const USERS_KEY: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    records: RecordCollection<User>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            records: RecordCollection::new(store, USERS_KEY),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.records.load().await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Búsqueda por email sin distinguir mayúsculas
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim();
        let users = self.records.load().await?;
        Ok(users.into_iter().find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    pub async fn insert(&self, user: &User) -> AppResult<()> {
        let mut users = self.records.load().await?;
        users.push(user.clone());
        self.records.save(&users).await?;
        Ok(())
    }

    pub async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.records.load().await?;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| not_found_error("User", &user.id.to_string()))?;
        *slot = user.clone();
        self.records.save(&users).await?;
        Ok(())
    }
}
