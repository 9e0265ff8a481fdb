use std::time::Duration;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::session::{Credentials, LoginResponse, SessionContext};
use crate::core::{
    AtelierError, CatalogItem, Client, Device, DeviceModel, Enterprise, Intervention, Invoice,
    Store, Technician,
};
use crate::workflow::api::{
    BillingApi, IntakeApi, NewClient, NewDevice, NewIntervention, StoreInvoiceRequest,
};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `https://localhost:7163/api`.
    pub base_url: String,
    /// Per-request timeout; timeouts surface as generic remote failures.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Payload to add a line item to an intervention.
///
/// Reference, name, and price are snapshotted from the catalog item at
/// add time.
#[derive(Debug, Clone, Serialize)]
pub struct NewLineItem {
    #[serde(rename = "produitID")]
    pub catalog_item_id: Uuid,
    #[serde(rename = "referenceProduit")]
    pub reference: String,
    #[serde(rename = "nomProduit")]
    pub name: String,
    #[serde(rename = "prixAppliqueHT")]
    pub unit_price: Decimal,
    #[serde(rename = "quantite")]
    pub quantity: Decimal,
    #[serde(rename = "totalLigneHT")]
    pub line_total: Decimal,
}

impl NewLineItem {
    /// Snapshot a catalog item at the given quantity.
    pub fn from_catalog(item: &CatalogItem, quantity: Decimal) -> Result<Self, AtelierError> {
        if quantity <= Decimal::ZERO {
            return Err(AtelierError::Validation(
                "la quantité doit être positive".into(),
            ));
        }
        Ok(Self {
            catalog_item_id: item.id,
            reference: item.reference.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity,
            line_total: item.unit_price * quantity,
        })
    }
}

/// Typed REST client for the backend API.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionContext,
}

impl ApiClient {
    /// Unauthenticated client (only [`login`](Self::login) is useful).
    pub fn new(config: ApiConfig) -> Result<Self, AtelierError> {
        Self::with_session(config, SessionContext::anonymous())
    }

    /// Client bound to an existing session.
    pub fn with_session(config: ApiConfig, session: SessionContext) -> Result<Self, AtelierError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AtelierError::network(e.to_string()))?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Authenticate and bind the returned session to this client.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<&SessionContext, AtelierError> {
        let response: LoginResponse = self.post_json("/Utilisateur/login", credentials).await?;
        let username = response
            .username
            .unwrap_or_else(|| credentials.username.clone());
        self.session = SessionContext::authenticated(response.token, username);
        Ok(&self.session)
    }

    /// Drop the session; subsequent calls run unauthenticated.
    pub fn logout(&mut self) {
        self.session = SessionContext::anonymous();
    }

    // --- Clients ---

    pub async fn list_clients(&self) -> Result<Vec<Client>, AtelierError> {
        self.get_json("/Client").await
    }

    pub async fn client_by_id(&self, id: Uuid) -> Result<Client, AtelierError> {
        self.get_json(&format!("/Client/{id}")).await
    }

    pub async fn update_client(&self, client: &Client) -> Result<Client, AtelierError> {
        self.put_json(&format!("/Client/{}", client.id), client).await
    }

    pub async fn delete_client(&self, id: Uuid) -> Result<(), AtelierError> {
        self.delete(&format!("/Client/{id}")).await
    }

    /// Delete several clients; stops at the first failure (the backend
    /// has no bulk endpoint).
    pub async fn delete_clients(&self, ids: &[Uuid]) -> Result<(), AtelierError> {
        for id in ids {
            self.delete_client(*id).await?;
        }
        Ok(())
    }

    // --- Stores ---

    pub async fn list_stores(&self) -> Result<Vec<Store>, AtelierError> {
        self.get_json("/MagasinPartenaire").await
    }

    pub async fn create_store(&self, store: &Store) -> Result<Store, AtelierError> {
        self.post_json("/MagasinPartenaire", store).await
    }

    pub async fn update_store(&self, store: &Store) -> Result<Store, AtelierError> {
        self.put_json(&format!("/MagasinPartenaire/{}", store.id), store)
            .await
    }

    pub async fn delete_store(&self, id: Uuid) -> Result<(), AtelierError> {
        self.delete(&format!("/MagasinPartenaire/{id}")).await
    }

    // --- Technicians ---

    pub async fn list_technicians(&self) -> Result<Vec<Technician>, AtelierError> {
        self.get_json("/Technicien").await
    }

    pub async fn create_technician(&self, technician: &Technician) -> Result<Technician, AtelierError> {
        self.post_json("/Technicien", technician).await
    }

    pub async fn delete_technician(&self, id: Uuid) -> Result<(), AtelierError> {
        self.delete(&format!("/Technicien/{id}")).await
    }

    // --- Devices ---

    pub async fn list_devices(&self) -> Result<Vec<Device>, AtelierError> {
        self.get_json("/Appareil").await
    }

    pub async fn device_by_id(&self, id: Uuid) -> Result<Device, AtelierError> {
        self.get_json(&format!("/Appareil/{id}")).await
    }

    // --- Device models & catalog ---

    pub async fn list_device_models(&self) -> Result<Vec<DeviceModel>, AtelierError> {
        self.get_json("/Modele").await
    }

    pub async fn create_device_model(&self, model: &DeviceModel) -> Result<DeviceModel, AtelierError> {
        self.post_json("/Modele", model).await
    }

    pub async fn list_catalog_items(&self) -> Result<Vec<CatalogItem>, AtelierError> {
        self.get_json("/Produit").await
    }

    pub async fn create_catalog_item(&self, item: &CatalogItem) -> Result<CatalogItem, AtelierError> {
        self.post_json("/Produit", item).await
    }

    // --- Interventions ---

    pub async fn list_interventions(&self) -> Result<Vec<Intervention>, AtelierError> {
        self.get_json("/Intervention").await
    }

    pub async fn intervention_by_id(&self, id: Uuid) -> Result<Intervention, AtelierError> {
        self.get_json(&format!("/Intervention/{id}")).await
    }

    pub async fn update_intervention(
        &self,
        intervention: &Intervention,
    ) -> Result<Intervention, AtelierError> {
        self.put_json(&format!("/Intervention/{}", intervention.id), intervention)
            .await
    }

    pub async fn delete_intervention(&self, id: Uuid) -> Result<(), AtelierError> {
        self.delete(&format!("/Intervention/{id}")).await
    }

    pub async fn add_line_item(
        &self,
        intervention_id: Uuid,
        line: &NewLineItem,
    ) -> Result<Intervention, AtelierError> {
        self.post_json(&format!("/Intervention/{intervention_id}/pieces"), line)
            .await
    }

    pub async fn remove_line_item(
        &self,
        intervention_id: Uuid,
        line_id: Uuid,
    ) -> Result<(), AtelierError> {
        self.delete(&format!("/Intervention/{intervention_id}/pieces/{line_id}"))
            .await
    }

    // --- Invoices ---

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, AtelierError> {
        self.get_json("/Facture").await
    }

    /// Create an invoice for a single out-of-warranty intervention.
    pub async fn invoice_from_intervention(
        &self,
        intervention_id: Uuid,
    ) -> Result<Invoice, AtelierError> {
        self.post_json(&format!("/Facture/generate/{intervention_id}"), &())
            .await
    }

    // --- Enterprise ---

    /// First enterprise record, or `None` when none is configured.
    pub async fn enterprise_profile(&self) -> Result<Option<Enterprise>, AtelierError> {
        let mut all: Vec<Enterprise> = self.get_json("/Entreprise").await?;
        Ok(if all.is_empty() {
            None
        } else {
            Some(all.remove(0))
        })
    }

    pub async fn update_enterprise(&self, enterprise: &Enterprise) -> Result<Enterprise, AtelierError> {
        self.put_json(&format!("/Entreprise/{}", enterprise.id), enterprise)
            .await
    }

    // --- Request plumbing ---

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AtelierError> {
        debug!(path, "GET");
        let result = self.execute(self.request(reqwest::Method::GET, path)).await;
        if let Err(error) = &result {
            // Read failures are surfaced too, but always leave a trace.
            warn!(path, %error, "lecture échouée");
        }
        result
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AtelierError> {
        debug!(path, "POST");
        self.execute(self.request(reqwest::Method::POST, path).json(body))
            .await
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AtelierError> {
        debug!(path, "PUT");
        self.execute(self.request(reqwest::Method::PUT, path).json(body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<(), AtelierError> {
        debug!(path, "DELETE");
        let response = self
            .request(reqwest::Method::DELETE, path)
            .send()
            .await
            .map_err(|e| AtelierError::network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(remote_error(status.as_u16(), body));
        }
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, AtelierError> {
        let response = builder
            .send()
            .await
            .map_err(|e| AtelierError::network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AtelierError::network(e.to_string()))?;
        if !status.is_success() {
            return Err(remote_error(status.as_u16(), body));
        }
        serde_json::from_str(&body).map_err(|e| AtelierError::Remote {
            status: Some(status.as_u16()),
            message: format!("réponse illisible: {e}"),
        })
    }
}

/// Surface the backend's own message when it supplied one, otherwise a
/// generic localized message.
fn remote_error(status: u16, body: String) -> AtelierError {
    let message = if body.trim().is_empty() {
        "Erreur inconnue".to_string()
    } else {
        body
    };
    AtelierError::remote(status, message)
}

impl BillingApi for ApiClient {
    async fn create_store_invoice(
        &self,
        request: &StoreInvoiceRequest,
    ) -> Result<Invoice, AtelierError> {
        self.post_json("/Facture/generate/magasin", request).await
    }

    async fn invoice_by_id(&self, id: Uuid) -> Result<Invoice, AtelierError> {
        self.get_json(&format!("/Facture/{id}")).await
    }
}

impl IntakeApi for ApiClient {
    async fn create_client(&self, request: &NewClient) -> Result<Client, AtelierError> {
        self.post_json("/Client", request).await
    }

    async fn create_device(&self, request: &NewDevice) -> Result<Device, AtelierError> {
        self.post_json("/Appareil", request).await
    }

    async fn create_intervention(
        &self,
        request: &NewIntervention,
    ) -> Result<Intervention, AtelierError> {
        self.post_json("/Intervention", request).await
    }
}
