use uuid::Uuid;

use super::api::{BillingApi, StoreInvoiceRequest};
use crate::core::{AtelierError, Invoice, SelectionState};

/// A validated, not-yet-confirmed invoice generation for one store.
///
/// [`prepare`](Self::prepare) validates the selection without touching the
/// backend; the caller then shows [`confirmation_prompt`](Self::confirmation_prompt)
/// and, on explicit user confirmation, calls [`execute`](Self::execute).
/// Nothing is sent before that point.
#[derive(Debug, Clone)]
pub struct InvoiceGeneration {
    store_id: Uuid,
    intervention_ids: Vec<Uuid>,
}

impl InvoiceGeneration {
    /// Validate the current selection for `store_id`.
    ///
    /// Fails with a validation error when nothing is selected; no gateway
    /// call is made in that case.
    pub fn prepare(store_id: Uuid, selection: &SelectionState) -> Result<Self, AtelierError> {
        let ids: Vec<Uuid> = selection.selected(store_id).iter().copied().collect();
        Self::from_ids(store_id, ids)
    }

    /// Validate an explicit id list (e.g. from a non-interactive caller).
    pub fn from_ids(store_id: Uuid, intervention_ids: Vec<Uuid>) -> Result<Self, AtelierError> {
        if intervention_ids.is_empty() {
            return Err(AtelierError::Validation(
                "aucune intervention sélectionnée".into(),
            ));
        }
        Ok(Self {
            store_id,
            intervention_ids,
        })
    }

    pub fn store_id(&self) -> Uuid {
        self.store_id
    }

    pub fn count(&self) -> usize {
        self.intervention_ids.len()
    }

    /// Text for the confirmation dialog shown before anything is sent.
    pub fn confirmation_prompt(&self) -> String {
        format!(
            "Générer une facture pour {} intervention(s) ?",
            self.count()
        )
    }

    /// Run the confirmed generation: create the invoice, then re-fetch it
    /// by id to obtain the fully populated record (the creation response
    /// is known to be partially populated).
    ///
    /// On success the store's selection set is cleared; the caller should
    /// then refresh its billing view, since the covered interventions are
    /// no longer billable. On failure the selection is left intact so the
    /// user can retry without re-selecting.
    pub async fn execute<A: BillingApi>(
        &self,
        api: &A,
        selection: &mut SelectionState,
    ) -> Result<Invoice, AtelierError> {
        let request = StoreInvoiceRequest {
            store_id: self.store_id,
            intervention_ids: self.intervention_ids.clone(),
            due_date: None,
        };
        let created = api.create_store_invoice(&request).await?;
        let full = api.invoice_by_id(created.id).await?;
        selection.clear_store(self.store_id);
        Ok(full)
    }

    /// Run the confirmed generation and render the printable invoice.
    ///
    /// The invoice is persisted even if rendering fails afterwards; it can
    /// be re-printed from the invoice history.
    #[cfg(feature = "pdf")]
    pub async fn execute_and_render<A: BillingApi>(
        &self,
        api: &A,
        selection: &mut SelectionState,
        enterprise: Option<&crate::core::Enterprise>,
    ) -> Result<(Invoice, crate::document::DocumentFile), AtelierError> {
        let invoice = self.execute(api, selection).await?;
        let layout = crate::document::store_invoice(&invoice, enterprise)?;
        let file = crate::document::pdf::render(&layout)?;
        Ok((invoice, file))
    }
}
