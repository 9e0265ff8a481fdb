use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use super::api::{IntakeApi, NewClient, NewDevice, NewIntervention};
use crate::core::{AtelierError, IntakeDraft, Intervention};

/// The step of the intake saga at which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStep {
    Client,
    Device,
    Intervention,
}

impl fmt::Display for IntakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Client => "client",
            Self::Device => "appareil",
            Self::Intervention => "intervention",
        };
        f.write_str(s)
    }
}

/// A failed intake, tagged with the step that failed and the ids created
/// before it — partial progress is observable, not just logged.
#[derive(Debug, Error)]
#[error("création {step} échouée: {source}")]
pub struct IntakeError {
    pub step: IntakeStep,
    /// Client created before the failure, if any.
    pub client_id: Option<Uuid>,
    /// Device created before the failure, if any.
    pub device_id: Option<Uuid>,
    #[source]
    pub source: AtelierError,
}

/// A completed intake: the full id chain plus the created intervention.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub client_id: Uuid,
    pub device_id: Uuid,
    pub intervention: Intervention,
}

/// Cascading creation: client, then the client's device, then the
/// intervention, each call using the previous result's generated id.
///
/// Each step awaits the previous one — the backend generates the ids the
/// next payload needs. There is no rollback: records created before a
/// failure remain, and their ids are reported in the error.
pub async fn submit_intake<A: IntakeApi>(
    api: &A,
    draft: &IntakeDraft,
) -> Result<IntakeOutcome, IntakeError> {
    let client = api
        .create_client(&NewClient::from(&draft.client))
        .await
        .map_err(|source| IntakeError {
            step: IntakeStep::Client,
            client_id: None,
            device_id: None,
            source,
        })?;

    let device_request =
        NewDevice::from_draft(client.id, &draft.device).map_err(|source| IntakeError {
            step: IntakeStep::Device,
            client_id: Some(client.id),
            device_id: None,
            source,
        })?;
    let device = api
        .create_device(&device_request)
        .await
        .map_err(|source| IntakeError {
            step: IntakeStep::Device,
            client_id: Some(client.id),
            device_id: None,
            source,
        })?;

    let intervention = api
        .create_intervention(&NewIntervention::from_draft(
            client.id,
            device.id,
            &draft.intervention,
        ))
        .await
        .map_err(|source| IntakeError {
            step: IntakeStep::Intervention,
            client_id: Some(client.id),
            device_id: Some(device.id),
            source,
        })?;

    Ok(IntakeOutcome {
        client_id: client.id,
        device_id: device.id,
        intervention,
    })
}
