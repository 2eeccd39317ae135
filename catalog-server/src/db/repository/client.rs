//! Client Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Client, ClientCreate, ClientStatus, ClientUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CLIENT_TABLE: &str = "client";

#[derive(Clone)]
pub struct ClientRepository {
    base: BaseRepository,
}

impl ClientRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Client>> {
        let clients: Vec<Client> = self
            .base
            .db()
            .query("SELECT * FROM client ORDER BY name")
            .await?
            .take(0)?;
        Ok(clients)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Client>> {
        let pure_id = strip_table_prefix(CLIENT_TABLE, id);
        let client: Option<Client> = self.base.db().select((CLIENT_TABLE, pure_id)).await?;
        Ok(client)
    }

    pub async fn create(&self, data: ClientCreate) -> RepoResult<Client> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("client name cannot be empty".into()));
        }
        if data.email.trim().is_empty() {
            return Err(RepoError::Validation("client email cannot be empty".into()));
        }

        let now = Utc::now();
        let client = Client {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            company: data.company,
            status: ClientStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Client> = self
            .base
            .db()
            .create(CLIENT_TABLE)
            .content(client)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create client".to_string()))
    }

    pub async fn update(&self, id: &str, data: ClientUpdate) -> RepoResult<Client> {
        let pure_id = strip_table_prefix(CLIENT_TABLE, id);
        let thing = super::make_thing(CLIENT_TABLE, pure_id);

        let mut set_parts: Vec<&str> = vec!["updatedAt = $updated_at"];

        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.email.is_some() {
            set_parts.push("email = $email");
        }
        if data.phone.is_some() {
            set_parts.push("phone = $phone");
        }
        if data.company.is_some() {
            set_parts.push("company = $company");
        }
        if data.status.is_some() {
            set_parts.push("status = $status");
        }

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("thing", thing))
            .bind(("updated_at", Utc::now()));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.email {
            query = query.bind(("email", v));
        }
        if let Some(v) = data.phone {
            query = query.bind(("phone", v));
        }
        if let Some(v) = data.company {
            query = query.bind(("company", v));
        }
        if let Some(v) = data.status {
            query = query.bind(("status", v));
        }

        let mut result = query.await?;
        let clients: Vec<Client> = result.take(0)?;

        clients
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Client {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(CLIENT_TABLE, id);
        let result: Option<Client> = self.base.db().delete((CLIENT_TABLE, pure_id)).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Client {} not found", id)));
        }
        Ok(())
    }
}
