//! Typed drafts for the intervention intake form.
//!
//! The intake form captures a new client, their device, and the
//! intervention itself in one screen. Each sub-form gets its own draft
//! struct and field-level updates are tagged variants, so form state
//! changes are explicit rather than untyped partial merges.

use chrono::NaiveDate;
use uuid::Uuid;

use super::types::{ClientType, InterventionStatus};

/// Draft of the client sub-form.
#[derive(Debug, Clone, Default)]
pub struct ClientDraft {
    pub client_type: ClientType,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
}

/// Draft of the device sub-form.
#[derive(Debug, Clone, Default)]
pub struct DeviceDraft {
    pub model_id: Option<Uuid>,
    pub serial_number: String,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end: Option<NaiveDate>,
}

/// Draft of the intervention sub-form.
#[derive(Debug, Clone)]
pub struct InterventionDraft {
    pub technician_id: Option<Uuid>,
    /// Referring partner store; `None` for out-of-warranty repairs.
    pub store_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub reported_fault: String,
    pub observed_fault: String,
    pub work_performed: String,
    pub status: InterventionStatus,
}

impl InterventionDraft {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            technician_id: None,
            store_id: None,
            start_date,
            reported_fault: String::new(),
            observed_fault: String::new(),
            work_performed: String::new(),
            status: InterventionStatus::Planned,
        }
    }
}

/// The whole intake form: client + device + intervention.
#[derive(Debug, Clone)]
pub struct IntakeDraft {
    pub client: ClientDraft,
    pub device: DeviceDraft,
    pub intervention: InterventionDraft,
}

impl IntakeDraft {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            client: ClientDraft::default(),
            device: DeviceDraft::default(),
            intervention: InterventionDraft::new(start_date),
        }
    }

    /// Apply a single field edit.
    pub fn apply(&mut self, update: DraftUpdate) {
        match update {
            DraftUpdate::Client(f) => self.client.apply(f),
            DraftUpdate::Device(f) => self.device.apply(f),
            DraftUpdate::Intervention(f) => self.intervention.apply(f),
        }
    }
}

/// A field edit, tagged by sub-form.
#[derive(Debug, Clone)]
pub enum DraftUpdate {
    Client(ClientField),
    Device(DeviceField),
    Intervention(InterventionField),
}

#[derive(Debug, Clone)]
pub enum ClientField {
    ClientType(ClientType),
    LastName(String),
    FirstName(String),
    Phone(String),
    Email(String),
    Address(String),
    City(String),
}

#[derive(Debug, Clone)]
pub enum DeviceField {
    ModelId(Option<Uuid>),
    SerialNumber(String),
    PurchaseDate(Option<NaiveDate>),
    WarrantyEnd(Option<NaiveDate>),
}

#[derive(Debug, Clone)]
pub enum InterventionField {
    TechnicianId(Option<Uuid>),
    StoreId(Option<Uuid>),
    StartDate(NaiveDate),
    ReportedFault(String),
    ObservedFault(String),
    WorkPerformed(String),
    Status(InterventionStatus),
}

impl ClientDraft {
    fn apply(&mut self, field: ClientField) {
        match field {
            ClientField::ClientType(v) => self.client_type = v,
            ClientField::LastName(v) => self.last_name = v,
            ClientField::FirstName(v) => self.first_name = v,
            ClientField::Phone(v) => self.phone = v,
            ClientField::Email(v) => self.email = v,
            ClientField::Address(v) => self.address = v,
            ClientField::City(v) => self.city = v,
        }
    }
}

impl DeviceDraft {
    fn apply(&mut self, field: DeviceField) {
        match field {
            DeviceField::ModelId(v) => self.model_id = v,
            DeviceField::SerialNumber(v) => self.serial_number = v,
            DeviceField::PurchaseDate(v) => self.purchase_date = v,
            DeviceField::WarrantyEnd(v) => self.warranty_end = v,
        }
    }
}

impl InterventionDraft {
    fn apply(&mut self, field: InterventionField) {
        match field {
            InterventionField::TechnicianId(v) => self.technician_id = v,
            InterventionField::StoreId(v) => self.store_id = v,
            InterventionField::StartDate(v) => self.start_date = v,
            InterventionField::ReportedFault(v) => self.reported_fault = v,
            InterventionField::ObservedFault(v) => self.observed_fault = v,
            InterventionField::WorkPerformed(v) => self.work_performed = v,
            InterventionField::Status(v) => self.status = v,
        }
    }
}
