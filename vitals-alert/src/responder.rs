//! Classification use case and the reading-to-dispatch pipeline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vitals_core::{
    is_critical, reason_for, CriticalFinding, CriticalVitalsResult, EmergencyConfig, VitalSigns,
};

use crate::dispatcher::EmergencyDispatcher;
use crate::ports::{Clock, Collaborators, ContactDirectory};
use crate::report::DispatchReport;
use crate::DispatchError;

/// Classifies a reading and, when critical, attaches the account's contacts.
#[derive(Clone)]
pub struct CriticalVitalsCheck {
    contacts: Arc<dyn ContactDirectory>,
}

impl CriticalVitalsCheck {
    pub fn new(contacts: Arc<dyn ContactDirectory>) -> Self {
        Self { contacts }
    }

    /// Normal readings return without touching the contact directory.
    pub async fn check(
        &self,
        vitals: VitalSigns,
        user_id: &str,
    ) -> Result<CriticalVitalsResult, DispatchError> {
        if !is_critical(&vitals) {
            return Ok(CriticalVitalsResult::Normal);
        }

        let contacts = self
            .contacts
            .emergency_contacts(user_id)
            .await
            .map_err(DispatchError::Contacts)?;
        Ok(CriticalVitalsResult::Critical(CriticalFinding::new(
            vitals, contacts,
        )?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReadingOutcome {
    Normal,
    Dispatched {
        reason: String,
        report: DispatchReport,
    },
}

/// Entry point for incoming readings: classify, then dispatch if critical.
pub struct EmergencyResponder {
    check: CriticalVitalsCheck,
    dispatcher: EmergencyDispatcher,
}

impl EmergencyResponder {
    pub fn new(config: EmergencyConfig, services: Collaborators) -> Result<Self, DispatchError> {
        Ok(Self {
            check: CriticalVitalsCheck::new(services.contacts.clone()),
            dispatcher: EmergencyDispatcher::new(config, services)?,
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.dispatcher = self.dispatcher.with_clock(clock);
        self
    }

    /// A failed contact lookup during classification does not stop the
    /// dispatch: the ambulance call still goes out before contacts are
    /// fetched again.
    pub async fn handle_reading(
        &self,
        vitals: VitalSigns,
        user_id: &str,
    ) -> Result<ReadingOutcome, DispatchError> {
        let reason = match self.check.check(vitals, user_id).await {
            Ok(CriticalVitalsResult::Normal) => {
                tracing::debug!(user_id, "Reading within normal thresholds");
                return Ok(ReadingOutcome::Normal);
            }
            Ok(CriticalVitalsResult::Critical(finding)) => finding.reason().to_string(),
            Err(DispatchError::Contacts(err)) => {
                tracing::warn!(error = %err, "Contact lookup failed during classification");
                reason_for(&vitals)?
            }
            Err(err) => return Err(err),
        };

        tracing::warn!(user_id, reason = %reason, "Critical vitals detected");
        let report = self
            .dispatcher
            .trigger_emergency_protocol(vitals, user_id)
            .await?;
        Ok(ReadingOutcome::Dispatched { reason, report })
    }
}
