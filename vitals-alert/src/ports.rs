//! Boundaries to platform and backend services.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use vitals_core::{EmergencyAlert, EmergencyContact, Location};

use crate::CollaboratorError;

/// Current device location. `Ok(None)` means no fix is available.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Option<Location>, CollaboratorError>;
}

/// Emergency contacts registered for an account, in display order.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn emergency_contacts(
        &self,
        user_id: &str,
    ) -> Result<Vec<EmergencyContact>, CollaboratorError>;
}

/// Places an outgoing call. Returns once the call is initiated, not completed.
#[async_trait]
pub trait Telephony: Send + Sync {
    async fn place_call(&self, phone_number: &str) -> Result<(), CollaboratorError>;
}

#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn send_sms(&self, phone_number: &str, body: &str) -> Result<(), CollaboratorError>;
}

/// Remote store receiving one alert record per notified contact.
#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn submit_alert(&self, alert: &EmergencyAlert) -> Result<(), CollaboratorError>;
}

/// Wall-clock source for the alert message timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local time of the device.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// The full set of services a dispatch talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub location: Arc<dyn LocationProvider>,
    pub contacts: Arc<dyn ContactDirectory>,
    pub telephony: Arc<dyn Telephony>,
    pub sms: Arc<dyn SmsTransport>,
    pub alerts: Arc<dyn AlertStore>,
}
