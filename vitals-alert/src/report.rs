//! Observable outcome of a dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitals_core::Location;

use crate::CollaboratorError;

/// Result of one best-effort delivery step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Skipped { reason: String },
    Failed { error: String },
}

impl DeliveryStatus {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl From<Result<(), CollaboratorError>> for DeliveryStatus {
    fn from(result: Result<(), CollaboratorError>) -> Self {
        match result {
            Ok(()) => Self::Sent,
            Err(err @ CollaboratorError::PermissionDenied(_)) => Self::Skipped {
                reason: err.to_string(),
            },
            Err(err) => Self::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// What happened for a single emergency contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDelivery {
    pub phone_number: String,
    pub sms: DeliveryStatus,
    pub alert: DeliveryStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchReport {
    pub dispatched_at: DateTime<Utc>,
    pub message: String,
    pub location: Option<Location>,
    pub call: DeliveryStatus,
    pub deliveries: Vec<ContactDelivery>,
}

impl DispatchReport {
    /// Contacts that received the SMS.
    pub fn sms_sent(&self) -> usize {
        self.deliveries.iter().filter(|d| d.sms.is_sent()).count()
    }

    pub fn alerts_submitted(&self) -> usize {
        self.deliveries.iter().filter(|d| d.alert.is_sent()).count()
    }

    /// True when the call and every SMS and alert record went through.
    pub fn fully_delivered(&self) -> bool {
        self.call.is_sent()
            && self
                .deliveries
                .iter()
                .all(|d| d.sms.is_sent() && d.alert.is_sent())
    }

    pub fn any_contact_reached(&self) -> bool {
        self.deliveries
            .iter()
            .any(|d| d.sms.is_sent() || d.alert.is_sent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(sms: DeliveryStatus, alert: DeliveryStatus) -> ContactDelivery {
        ContactDelivery {
            phone_number: "+15550100".to_string(),
            sms,
            alert,
        }
    }

    fn report(call: DeliveryStatus, deliveries: Vec<ContactDelivery>) -> DispatchReport {
        DispatchReport {
            dispatched_at: Utc::now(),
            message: String::new(),
            location: None,
            call,
            deliveries,
        }
    }

    #[test]
    fn permission_denied_maps_to_skipped() {
        let status: DeliveryStatus =
            Err(CollaboratorError::PermissionDenied("SEND_SMS".to_string())).into();
        assert_eq!(status, DeliveryStatus::skipped("permission denied: SEND_SMS"));
    }

    #[test]
    fn transport_error_maps_to_failed() {
        let status: DeliveryStatus =
            Err(CollaboratorError::Transport("radio off".to_string())).into();
        assert!(matches!(status, DeliveryStatus::Failed { .. }));
    }

    #[test]
    fn counters_reflect_partial_delivery() {
        let report = report(
            DeliveryStatus::Sent,
            vec![
                delivery(DeliveryStatus::Sent, DeliveryStatus::Sent),
                delivery(
                    DeliveryStatus::Failed {
                        error: "boom".to_string(),
                    },
                    DeliveryStatus::Sent,
                ),
            ],
        );

        assert_eq!(report.sms_sent(), 1);
        assert_eq!(report.alerts_submitted(), 2);
        assert!(!report.fully_delivered());
        assert!(report.any_contact_reached());
    }

    #[test]
    fn empty_contact_list_reaches_nobody() {
        let report = report(DeliveryStatus::Sent, Vec::new());
        assert!(report.fully_delivered());
        assert!(!report.any_contact_reached());
    }
}
