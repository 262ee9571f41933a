//! Client service - cached reads, invalidating writes

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{
    Client, ClientRepository, DomainError, FetchKey, InvalidationSignal, ResourceKind,
};
use crate::infrastructure::fetch::{FetchOptions, InvalidationBus, SwrCache};

/// Payload for creating a client
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Payload for updating a client; absent fields are left untouched
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
    cache: SwrCache,
    bus: InvalidationBus,
    options: FetchOptions,
}

impl ClientService {
    pub fn new(
        repository: Arc<dyn ClientRepository>,
        cache: SwrCache,
        bus: InvalidationBus,
        options: FetchOptions,
    ) -> Self {
        Self {
            repository,
            cache,
            bus,
            options,
        }
    }

    /// List all clients, cached under the collection key
    pub async fn list(&self) -> Result<Vec<Client>, DomainError> {
        let key = FetchKey::collection(ResourceKind::Clients);
        let repository = Arc::clone(&self.repository);

        let outcome = self
            .cache
            .fetch(&key, &self.options, move || async move {
                repository.list().await
            })
            .await;

        outcome.ok_or_upstream(key.as_str())
    }

    /// Get one client, cached under its item key
    pub async fn get(&self, id: &str) -> Result<Option<Client>, DomainError> {
        let key = FetchKey::item(ResourceKind::Clients, id);
        let repository = Arc::clone(&self.repository);
        let id = id.to_string();

        let outcome = self
            .cache
            .fetch(&key, &self.options, move || async move {
                repository.get(&id).await
            })
            .await;

        outcome.ok_or_upstream(key.as_str())
    }

    pub async fn create(&self, request: CreateClientRequest) -> Result<Client, DomainError> {
        let mut client = Client::new(request.name)?;

        if let Some(email) = request.email {
            client = client.with_email(email);
        }

        if let Some(phone) = request.phone {
            client = client.with_phone(phone);
        }

        let created = self.repository.create(client).await?;

        self.bus
            .publish(InvalidationSignal::broad(ResourceKind::Clients));

        Ok(created)
    }

    pub async fn update(&self, id: &str, request: UpdateClientRequest) -> Result<Client, DomainError> {
        let mut client = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Client '{}' not found", id)))?;

        if let Some(name) = request.name {
            client.set_name(name)?;
        }

        if let Some(email) = request.email {
            client = client.with_email(email);
        }

        if let Some(phone) = request.phone {
            client = client.with_phone(phone);
        }

        match request.active {
            Some(true) => client.activate(),
            Some(false) => client.deactivate(),
            None => {}
        }

        let updated = self.repository.update(client).await?;

        self.bus
            .publish(InvalidationSignal::targeted(ResourceKind::Clients, id));

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(DomainError::not_found(format!("Client '{}' not found", id)));
        }

        self.bus
            .publish(InvalidationSignal::targeted(ResourceKind::Clients, id));

        Ok(())
    }
}
