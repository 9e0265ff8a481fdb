//! Backend operations consumed by the workflows, plus the request
//! payloads they send.
//!
//! The gateway's HTTP client implements these traits; tests implement
//! them with in-memory fakes.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::core::{
    AtelierError, Client, ClientDraft, ClientType, Device, DeviceDraft, Intervention,
    InterventionDraft, InterventionStatus, Invoice,
};

/// Request for batch invoice creation: one store, a list of completed
/// interventions. The backend creates the invoice atomically.
#[derive(Debug, Clone, Serialize)]
pub struct StoreInvoiceRequest {
    #[serde(rename = "magasinID")]
    pub store_id: Uuid,
    #[serde(rename = "interventionIDs")]
    pub intervention_ids: Vec<Uuid>,
    #[serde(rename = "dateEcheance", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Payload to create a client.
#[derive(Debug, Clone, Serialize)]
pub struct NewClient {
    #[serde(rename = "typeClient")]
    pub client_type: ClientType,
    #[serde(rename = "nomContact")]
    pub last_name: String,
    #[serde(rename = "prenomContact")]
    pub first_name: String,
    #[serde(rename = "numTelephone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "ville")]
    pub city: String,
}

impl From<&ClientDraft> for NewClient {
    fn from(draft: &ClientDraft) -> Self {
        Self {
            client_type: draft.client_type,
            last_name: draft.last_name.clone(),
            first_name: draft.first_name.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            address: draft.address.clone(),
            city: draft.city.clone(),
        }
    }
}

/// Payload to create a device for an existing client.
#[derive(Debug, Clone, Serialize)]
pub struct NewDevice {
    #[serde(rename = "clientID")]
    pub client_id: Uuid,
    #[serde(rename = "modeleID")]
    pub model_id: Uuid,
    #[serde(rename = "numeroSerie")]
    pub serial_number: String,
    #[serde(rename = "dateAchat", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(rename = "finGarantie", skip_serializing_if = "Option::is_none")]
    pub warranty_end: Option<NaiveDate>,
}

impl NewDevice {
    /// Build from the device sub-form, once the client id is known.
    pub fn from_draft(client_id: Uuid, draft: &DeviceDraft) -> Result<Self, AtelierError> {
        let model_id = draft
            .model_id
            .ok_or_else(|| AtelierError::Validation("aucun modèle sélectionné".into()))?;
        Ok(Self {
            client_id,
            model_id,
            serial_number: draft.serial_number.clone(),
            purchase_date: draft.purchase_date,
            warranty_end: draft.warranty_end,
        })
    }
}

/// Payload to create an intervention for an existing client and device.
#[derive(Debug, Clone, Serialize)]
pub struct NewIntervention {
    #[serde(rename = "clientID")]
    pub client_id: Uuid,
    #[serde(rename = "appareilID")]
    pub device_id: Uuid,
    #[serde(rename = "technicienID", skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<Uuid>,
    #[serde(rename = "magasinID")]
    pub store_id: Option<Uuid>,
    #[serde(rename = "dateDebut")]
    pub start_date: NaiveDate,
    #[serde(rename = "panneReclamee")]
    pub reported_fault: String,
    #[serde(rename = "panneConstatee")]
    pub observed_fault: String,
    #[serde(rename = "travailEffectue")]
    pub work_performed: String,
    #[serde(rename = "statut")]
    pub status: InterventionStatus,
}

impl NewIntervention {
    /// Build from the intervention sub-form, once the client and device
    /// ids are known.
    pub fn from_draft(client_id: Uuid, device_id: Uuid, draft: &InterventionDraft) -> Self {
        Self {
            client_id,
            device_id,
            technician_id: draft.technician_id,
            store_id: draft.store_id,
            start_date: draft.start_date,
            reported_fault: draft.reported_fault.clone(),
            observed_fault: draft.observed_fault.clone(),
            work_performed: draft.work_performed.clone(),
            status: draft.status,
        }
    }
}

/// Backend operations needed by the invoice generation workflow.
#[allow(async_fn_in_trait)]
pub trait BillingApi {
    /// Create a consolidated store invoice. The response may lack nested
    /// interventions — fetch the invoice by id for the full record.
    async fn create_store_invoice(
        &self,
        request: &StoreInvoiceRequest,
    ) -> Result<Invoice, AtelierError>;

    /// Fetch a fully populated invoice, nested interventions included.
    async fn invoice_by_id(&self, id: Uuid) -> Result<Invoice, AtelierError>;
}

/// Backend operations needed by the intake saga.
#[allow(async_fn_in_trait)]
pub trait IntakeApi {
    async fn create_client(&self, request: &NewClient) -> Result<Client, AtelierError>;
    async fn create_device(&self, request: &NewDevice) -> Result<Device, AtelierError>;
    async fn create_intervention(
        &self,
        request: &NewIntervention,
    ) -> Result<Intervention, AtelierError>;
}
