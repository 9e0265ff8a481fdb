use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a repair intervention.
///
/// Wire values are the backend's French labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterventionStatus {
    /// Scheduled, work not started.
    #[serde(rename = "Planifiée")]
    Planned,
    /// Work in progress.
    #[serde(rename = "En Cours")]
    InProgress,
    /// Work completed.
    #[serde(rename = "Terminée")]
    Done,
    /// Abandoned.
    #[serde(rename = "Annulée")]
    Cancelled,
    /// Completed and queued for invoicing.
    #[serde(rename = "A facturer")]
    ToInvoice,
}

impl InterventionStatus {
    /// Backend label, as displayed to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planned => "Planifiée",
            Self::InProgress => "En Cours",
            Self::Done => "Terminée",
            Self::Cancelled => "Annulée",
            Self::ToInvoice => "A facturer",
        }
    }
}

/// A repair intervention — the central record of the system.
///
/// List responses carry denormalized display fields (`client_name`,
/// `device_name`, `store_name`, …) snapshotted by the backend at read time.
/// They may be stale relative to the referenced records and must not be
/// treated as live joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intervention {
    #[serde(rename = "interventionID")]
    pub id: Uuid,
    #[serde(rename = "clientID")]
    pub client_id: Uuid,
    #[serde(rename = "appareilID")]
    pub device_id: Uuid,
    #[serde(rename = "technicienID", default)]
    pub technician_id: Option<Uuid>,
    /// Referring partner store. Present (and non-nil) only for
    /// store-warranty repairs.
    #[serde(rename = "magasinID", default)]
    pub store_id: Option<Uuid>,
    /// Set once the intervention has been covered by an invoice.
    #[serde(rename = "factureID", default)]
    pub invoice_id: Option<Uuid>,
    /// Date work began — the billing reference date.
    #[serde(rename = "dateDebut")]
    pub start_date: NaiveDate,
    #[serde(rename = "dateFin", default)]
    pub end_date: Option<NaiveDate>,
    /// Fault as reported by the client.
    #[serde(rename = "panneReclamee", default)]
    pub reported_fault: String,
    /// Fault as observed by the technician.
    #[serde(rename = "panneConstatee", default)]
    pub observed_fault: String,
    #[serde(rename = "travailEffectue", default)]
    pub work_performed: String,
    #[serde(rename = "statut")]
    pub status: InterventionStatus,
    /// Repair-order slip number, when one was issued.
    #[serde(rename = "bonReparation", default)]
    pub repair_order: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Total amount (HT), computed by the backend from the line items.
    #[serde(rename = "somme", default)]
    pub total: Decimal,
    /// Parts and services applied, owned by this intervention.
    #[serde(rename = "pieces", default)]
    pub line_items: Vec<LineItem>,

    // Snapshot display fields (may be stale).
    #[serde(rename = "nomClient", default)]
    pub client_name: Option<String>,
    #[serde(rename = "clientTelephone", default)]
    pub client_phone: Option<String>,
    #[serde(rename = "clientAdresse", default)]
    pub client_address: Option<String>,
    #[serde(rename = "clientVille", default)]
    pub client_city: Option<String>,
    #[serde(rename = "nomAppareil", default)]
    pub device_name: Option<String>,
    #[serde(rename = "appareilNumeroSerie", default)]
    pub device_serial: Option<String>,
    #[serde(rename = "appareilDateAchat", default)]
    pub device_purchase_date: Option<NaiveDate>,
    #[serde(rename = "appareilFinGarantie", default)]
    pub device_warranty_end: Option<NaiveDate>,
    #[serde(rename = "nomTechnicien", default)]
    pub technician_name: Option<String>,
    #[serde(rename = "nomMagasin", default)]
    pub store_name: Option<String>,
    #[serde(rename = "magasinVille", default)]
    pub store_city: Option<String>,
    #[serde(rename = "magasinResponsable", default)]
    pub store_contact: Option<String>,
}

impl Intervention {
    /// Minimal intervention with every optional field empty.
    pub fn new(id: Uuid, client_id: Uuid, device_id: Uuid, start_date: NaiveDate) -> Self {
        Self {
            id,
            client_id,
            device_id,
            technician_id: None,
            store_id: None,
            invoice_id: None,
            start_date,
            end_date: None,
            reported_fault: String::new(),
            observed_fault: String::new(),
            work_performed: String::new(),
            status: InterventionStatus::Planned,
            repair_order: None,
            notes: None,
            total: Decimal::ZERO,
            line_items: Vec::new(),
            client_name: None,
            client_phone: None,
            client_address: None,
            client_city: None,
            device_name: None,
            device_serial: None,
            device_purchase_date: None,
            device_warranty_end: None,
            technician_name: None,
            store_name: None,
            store_city: None,
            store_contact: None,
        }
    }

    /// Referring store id, with the nil-UUID sentinel treated as absent.
    pub fn store_ref(&self) -> Option<Uuid> {
        self.store_id.filter(|id| !id.is_nil())
    }

    /// Whether this repair is covered by a partner-store warranty
    /// arrangement. Store-linked repairs are warranty work.
    pub fn under_warranty(&self) -> bool {
        self.store_ref().is_some()
    }

    /// Whether this intervention can be put on a store invoice:
    /// work completed, not yet billed, and linked to a partner store.
    pub fn is_billable(&self) -> bool {
        self.status == InterventionStatus::Done
            && self.invoice_id.is_none()
            && self.store_ref().is_some()
    }
}

/// A part or service applied during an intervention.
///
/// Reference, name, and unit price are captured from the catalog item at
/// add time, not joined live — later catalog edits do not affect past
/// interventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Backend-assigned line id; absent until the line is persisted.
    #[serde(rename = "ligneInterventionID", default)]
    pub id: Option<Uuid>,
    #[serde(rename = "produitID")]
    pub catalog_item_id: Uuid,
    #[serde(rename = "referenceProduit", default)]
    pub reference: String,
    #[serde(rename = "nomProduit", default)]
    pub name: String,
    /// Unit price (HT) at time of use.
    #[serde(rename = "prixAppliqueHT")]
    pub unit_price: Decimal,
    /// Quantity, strictly positive.
    #[serde(rename = "quantite")]
    pub quantity: Decimal,
}

impl LineItem {
    /// Line total (HT) = unit price × quantity.
    pub fn total_ht(&self) -> Decimal {
        self.unit_price * self.quantity
    }
}

/// A consolidated invoice issued to a partner store (or, for direct
/// repairs, to an end client).
///
/// Created atomically server-side from a store id plus a list of
/// intervention ids; read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "factureID")]
    pub id: Uuid,
    /// Human-readable invoice number, assigned by the backend.
    #[serde(rename = "numeroFacture", default)]
    pub number: String,
    #[serde(rename = "magasinID", default)]
    pub store_id: Option<Uuid>,
    #[serde(rename = "nomMagasin", default)]
    pub store_name: Option<String>,
    /// End-client name for single-intervention invoices.
    #[serde(rename = "nomClient", default)]
    pub client_name: Option<String>,
    #[serde(rename = "dateFacturation")]
    pub issue_date: NaiveDate,
    #[serde(rename = "dateEcheance", default)]
    pub due_date: Option<NaiveDate>,
    /// Interventions covered by this invoice. May be absent on the
    /// creation response; fetch the invoice by id for the full record.
    #[serde(default)]
    pub interventions: Vec<Intervention>,
    /// Total before tax. The backend may omit it on older records.
    #[serde(rename = "montantTotalHT", default)]
    pub net_total: Option<Decimal>,
    /// Total after tax.
    #[serde(rename = "montantTotalTTC", default)]
    pub gross_total: Decimal,
}

/// Client category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    #[default]
    Particulier,
    Professionnel,
}

/// An end client — the person or business whose device is repaired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "clientID")]
    pub id: Uuid,
    #[serde(rename = "typeClient", default)]
    pub client_type: ClientType,
    #[serde(rename = "nomContact", default)]
    pub last_name: String,
    #[serde(rename = "prenomContact", default)]
    pub first_name: String,
    #[serde(rename = "numTelephone", default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    #[serde(rename = "ville", default)]
    pub city: Option<String>,
}

impl Client {
    /// Display name: first and last name joined, skipping empty parts.
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if !self.first_name.is_empty() {
            parts.push(self.first_name.as_str());
        }
        if !self.last_name.is_empty() {
            parts.push(self.last_name.as_str());
        }
        parts.join(" ")
    }
}

/// A partner retail store whose referred repairs are consolidated into
/// periodic invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "magasinID")]
    pub id: Uuid,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "ville", default)]
    pub city: Option<String>,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    /// Contact person at the store.
    #[serde(rename = "responsable", default)]
    pub contact: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
}

/// A repair technician.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    #[serde(rename = "technicienID")]
    pub id: Uuid,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom", default)]
    pub first_name: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
    #[serde(rename = "specialite", default)]
    pub specialty: Option<String>,
}

/// A device model from the reference catalog (e.g. a TV or phone model).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceModel {
    #[serde(rename = "modeleID")]
    pub id: Uuid,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "marque", default)]
    pub brand: Option<String>,
}

/// A concrete device owned by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "appareilID")]
    pub id: Uuid,
    #[serde(rename = "clientID")]
    pub client_id: Uuid,
    #[serde(rename = "modeleID")]
    pub model_id: Uuid,
    #[serde(rename = "numeroSerie", default)]
    pub serial_number: String,
    #[serde(rename = "dateAchat", default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(rename = "finGarantie", default)]
    pub warranty_end: Option<NaiveDate>,
}

/// A catalog item — a spare part or a standard service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "produitID")]
    pub id: Uuid,
    #[serde(rename = "reference", default)]
    pub reference: String,
    #[serde(rename = "nom")]
    pub name: String,
    /// Unit price before tax.
    #[serde(rename = "prixUnitaireHT")]
    pub unit_price: Decimal,
}

/// The issuing business's profile — read-only input to document
/// rendering. At most one active profile is expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enterprise {
    #[serde(rename = "entrepriseID")]
    pub id: Uuid,
    #[serde(rename = "nomCommercial")]
    pub name: String,
    /// Line of business (e.g. "Réparation Électronique").
    #[serde(rename = "activite", default)]
    pub activity: Option<String>,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    #[serde(rename = "ville", default)]
    pub city: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "siteWeb", default)]
    pub website: Option<String>,
    /// ICE — business identification number.
    #[serde(default)]
    pub ice: Option<String>,
    /// Fiscal identifier.
    #[serde(rename = "identifiantFiscal", default)]
    pub tax_id: Option<String>,
    /// Commercial register number.
    #[serde(rename = "registreCommerce", default)]
    pub commercial_register: Option<String>,
}
