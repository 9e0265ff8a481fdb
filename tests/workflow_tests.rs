use std::cell::RefCell;

use atelier::core::*;
use atelier::workflow::api::*;
use atelier::workflow::{submit_intake, IntakeStep, InvoiceGeneration};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn billable(id: u128, store: Uuid, total: rust_decimal::Decimal) -> Intervention {
    let mut i = Intervention::new(
        Uuid::from_u128(id),
        Uuid::from_u128(0x1000 + id),
        Uuid::from_u128(0x2000 + id),
        date(2025, 3, 10),
    );
    i.status = InterventionStatus::Done;
    i.store_id = Some(store);
    i.store_name = Some("Electro Plus".into());
    i.total = total;
    i
}

/// In-memory billing backend recording the calls it receives.
struct FakeBilling {
    calls: RefCell<Vec<String>>,
    fail_create: bool,
    /// Interventions the full invoice will carry after the refetch.
    interventions: Vec<Intervention>,
}

impl FakeBilling {
    fn new(interventions: Vec<Intervention>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_create: false,
            interventions,
        }
    }

    fn failing() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_create: true,
            interventions: Vec::new(),
        }
    }

    fn invoice_id() -> Uuid {
        Uuid::from_u128(0xfac)
    }
}

impl BillingApi for FakeBilling {
    async fn create_store_invoice(
        &self,
        request: &StoreInvoiceRequest,
    ) -> Result<Invoice, AtelierError> {
        self.calls
            .borrow_mut()
            .push(format!("create:{}", request.intervention_ids.len()));
        if self.fail_create {
            return Err(AtelierError::remote(
                409,
                "Interventions déjà facturées".to_string(),
            ));
        }
        // Creation response is partially populated: no nested interventions.
        Ok(Invoice {
            id: Self::invoice_id(),
            number: String::new(),
            store_id: Some(request.store_id),
            store_name: None,
            client_name: None,
            issue_date: date(2025, 4, 1),
            due_date: None,
            interventions: Vec::new(),
            net_total: None,
            gross_total: dec!(0),
        })
    }

    async fn invoice_by_id(&self, id: Uuid) -> Result<Invoice, AtelierError> {
        self.calls.borrow_mut().push(format!("get:{id}"));
        let mut covered = self.interventions.clone();
        for i in &mut covered {
            i.invoice_id = Some(id);
        }
        let gross = covered.iter().map(|i| i.total).sum();
        Ok(Invoice {
            id,
            number: "FAC-2025-001".into(),
            store_id: covered.first().and_then(|i| i.store_id),
            store_name: Some("Electro Plus".into()),
            client_name: None,
            issue_date: date(2025, 4, 1),
            due_date: None,
            interventions: covered,
            net_total: None,
            gross_total: gross,
        })
    }
}

#[test]
fn empty_selection_fails_validation_without_any_gateway_call() {
    let store = Uuid::from_u128(1);
    let selection = SelectionState::new();

    let result = InvoiceGeneration::prepare(store, &selection);
    assert!(matches!(result, Err(AtelierError::Validation(_))));

    let result = InvoiceGeneration::from_ids(store, Vec::new());
    assert!(matches!(result, Err(AtelierError::Validation(_))));
}

#[tokio::test]
async fn successful_generation_refetches_and_clears_only_that_store() {
    let s1 = Uuid::from_u128(1);
    let s2 = Uuid::from_u128(2);
    let interventions = vec![billable(10, s1, dec!(150.50)), billable(11, s1, dec!(49.50))];
    let api = FakeBilling::new(interventions.clone());

    let mut selection = SelectionState::new();
    selection.toggle(s1, Uuid::from_u128(10));
    selection.toggle(s1, Uuid::from_u128(11));
    selection.toggle(s2, Uuid::from_u128(77));

    let generation = InvoiceGeneration::prepare(s1, &selection).unwrap();
    assert_eq!(generation.count(), 2);
    assert!(generation.confirmation_prompt().contains("2 intervention(s)"));

    let invoice = generation.execute(&api, &mut selection).await.unwrap();

    // Create first, then refetch by the returned id.
    let calls = api.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], "create:2");
    assert_eq!(calls[1], format!("get:{}", FakeBilling::invoice_id()));
    drop(calls);

    // The refetched record is fully populated.
    assert_eq!(invoice.number, "FAC-2025-001");
    assert_eq!(invoice.interventions.len(), 2);
    assert_eq!(invoice.gross_total, dec!(200.00));

    // Selection cleared for S1 only.
    assert_eq!(selection.count(s1), 0);
    assert_eq!(selection.count(s2), 1);

    // After the refresh, the billed interventions are gone from the
    // billing view: their invoice reference is now set.
    let refreshed = invoice.interventions.clone();
    assert!(compute_billing_groups(&refreshed).is_empty());
}

#[tokio::test]
async fn failed_generation_keeps_the_selection_for_retry() {
    let s1 = Uuid::from_u128(1);
    let api = FakeBilling::failing();

    let mut selection = SelectionState::new();
    selection.toggle(s1, Uuid::from_u128(10));

    let generation = InvoiceGeneration::prepare(s1, &selection).unwrap();
    let error = generation.execute(&api, &mut selection).await.unwrap_err();

    match error {
        AtelierError::Remote { status, message } => {
            assert_eq!(status, Some(409));
            assert_eq!(message, "Interventions déjà facturées");
        }
        other => panic!("unexpected error: {other}"),
    }

    // No refetch happened, and the user can retry without re-selecting.
    assert_eq!(api.calls.borrow().len(), 1);
    assert_eq!(selection.count(s1), 1);
}

// --- Intake saga ---

#[derive(Default)]
struct FakeIntake {
    fail_device: bool,
    device_requests: RefCell<Vec<NewDevice>>,
    intervention_requests: RefCell<Vec<NewIntervention>>,
}

impl FakeIntake {
    fn client_id() -> Uuid {
        Uuid::from_u128(0xc11)
    }

    fn device_id() -> Uuid {
        Uuid::from_u128(0xd27)
    }
}

impl IntakeApi for FakeIntake {
    async fn create_client(&self, request: &NewClient) -> Result<Client, AtelierError> {
        Ok(Client {
            id: Self::client_id(),
            client_type: request.client_type,
            last_name: request.last_name.clone(),
            first_name: request.first_name.clone(),
            phone: request.phone.clone(),
            email: None,
            address: None,
            city: None,
        })
    }

    async fn create_device(&self, request: &NewDevice) -> Result<Device, AtelierError> {
        if self.fail_device {
            return Err(AtelierError::remote(400, "Numéro de série requis"));
        }
        self.device_requests.borrow_mut().push(request.clone());
        Ok(Device {
            id: Self::device_id(),
            client_id: request.client_id,
            model_id: request.model_id,
            serial_number: request.serial_number.clone(),
            purchase_date: request.purchase_date,
            warranty_end: request.warranty_end,
        })
    }

    async fn create_intervention(
        &self,
        request: &NewIntervention,
    ) -> Result<Intervention, AtelierError> {
        self.intervention_requests.borrow_mut().push(request.clone());
        let mut i = Intervention::new(
            Uuid::from_u128(0x1a7),
            request.client_id,
            request.device_id,
            request.start_date,
        );
        i.status = request.status;
        i.store_id = request.store_id;
        Ok(i)
    }
}

fn draft() -> IntakeDraft {
    let mut draft = IntakeDraft::new(date(2025, 5, 2));
    draft.apply(DraftUpdate::Client(ClientField::LastName("Alami".into())));
    draft.apply(DraftUpdate::Client(ClientField::FirstName("Yassine".into())));
    draft.apply(DraftUpdate::Device(DeviceField::ModelId(Some(
        Uuid::from_u128(0x30d),
    ))));
    draft.apply(DraftUpdate::Device(DeviceField::SerialNumber(
        "SN-4521".into(),
    )));
    draft.apply(DraftUpdate::Intervention(InterventionField::ReportedFault(
        "Écran cassé".into(),
    )));
    draft
}

#[tokio::test]
async fn intake_chains_generated_ids_through_all_three_steps() {
    let api = FakeIntake::default();
    let outcome = submit_intake(&api, &draft()).await.unwrap();

    assert_eq!(outcome.client_id, FakeIntake::client_id());
    assert_eq!(outcome.device_id, FakeIntake::device_id());
    assert_eq!(outcome.intervention.client_id, FakeIntake::client_id());
    assert_eq!(outcome.intervention.device_id, FakeIntake::device_id());

    // The device payload used the id the backend generated for the client.
    let devices = api.device_requests.borrow();
    assert_eq!(devices[0].client_id, FakeIntake::client_id());

    let interventions = api.intervention_requests.borrow();
    assert_eq!(interventions[0].device_id, FakeIntake::device_id());
}

#[tokio::test]
async fn intake_failure_reports_the_failed_step_and_partial_chain() {
    let api = FakeIntake {
        fail_device: true,
        ..FakeIntake::default()
    };
    let error = submit_intake(&api, &draft()).await.unwrap_err();

    assert_eq!(error.step, IntakeStep::Device);
    assert_eq!(error.client_id, Some(FakeIntake::client_id()));
    assert_eq!(error.device_id, None);
    assert!(error.to_string().contains("appareil"));
}

#[tokio::test]
async fn intake_without_model_fails_validation_before_the_device_call() {
    let api = FakeIntake::default();
    let mut incomplete = draft();
    incomplete.apply(DraftUpdate::Device(DeviceField::ModelId(None)));

    let error = submit_intake(&api, &incomplete).await.unwrap_err();
    assert_eq!(error.step, IntakeStep::Device);
    assert!(matches!(error.source, AtelierError::Validation(_)));
    assert!(api.device_requests.borrow().is_empty());
}
