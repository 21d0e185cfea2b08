#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use vitals_alert::{
    AlertStore, CollaboratorError, Collaborators, ContactDirectory, LocationProvider,
    SmsTransport, Telephony,
};
use vitals_core::{EmergencyAlert, EmergencyContact, Location};

/// Every collaborator call, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Location,
    Contacts(String),
    PhoneCall(String),
    Sms(String),
    Alert(String),
}

#[derive(Default)]
pub struct Fake {
    pub calls: Mutex<Vec<Call>>,
    pub location: Mutex<Option<Location>>,
    pub location_fails: Mutex<bool>,
    pub contacts: Mutex<Vec<EmergencyContact>>,
    pub contacts_fail: Mutex<bool>,
    pub call_denied: Mutex<bool>,
    pub call_fails: Mutex<bool>,
    pub sms_failures: Mutex<HashSet<String>>,
    pub sms_denied: Mutex<bool>,
    pub alert_failures: Mutex<HashSet<String>>,
    pub sent_sms: Mutex<Vec<(String, String)>>,
    pub stored_alerts: Mutex<Vec<EmergencyAlert>>,
}

impl Fake {
    pub fn with_contacts(numbers: &[&str]) -> Arc<Self> {
        let fake = Self::default();
        *fake.contacts.lock() = numbers.iter().map(|n| EmergencyContact::new(*n)).collect();
        Arc::new(fake)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

pub fn services(fake: &Arc<Fake>) -> Collaborators {
    Collaborators {
        location: fake.clone(),
        contacts: fake.clone(),
        telephony: fake.clone(),
        sms: fake.clone(),
        alerts: fake.clone(),
    }
}

pub fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(12, 30, 45)
        .unwrap()
}

#[async_trait]
impl LocationProvider for Fake {
    async fn current_location(&self) -> Result<Option<Location>, CollaboratorError> {
        self.record(Call::Location);
        if *self.location_fails.lock() {
            return Err(CollaboratorError::Unavailable("gps".to_string()));
        }
        Ok(*self.location.lock())
    }
}

#[async_trait]
impl ContactDirectory for Fake {
    async fn emergency_contacts(
        &self,
        user_id: &str,
    ) -> Result<Vec<EmergencyContact>, CollaboratorError> {
        self.record(Call::Contacts(user_id.to_string()));
        if *self.contacts_fail.lock() {
            return Err(CollaboratorError::Unavailable("backend down".to_string()));
        }
        Ok(self.contacts.lock().clone())
    }
}

#[async_trait]
impl Telephony for Fake {
    async fn place_call(&self, phone_number: &str) -> Result<(), CollaboratorError> {
        self.record(Call::PhoneCall(phone_number.to_string()));
        if *self.call_denied.lock() {
            return Err(CollaboratorError::PermissionDenied("CALL_PHONE".to_string()));
        }
        if *self.call_fails.lock() {
            return Err(CollaboratorError::Transport("no signal".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SmsTransport for Fake {
    async fn send_sms(&self, phone_number: &str, body: &str) -> Result<(), CollaboratorError> {
        self.record(Call::Sms(phone_number.to_string()));
        if *self.sms_denied.lock() {
            return Err(CollaboratorError::PermissionDenied("SEND_SMS".to_string()));
        }
        if self.sms_failures.lock().contains(phone_number) {
            return Err(CollaboratorError::Transport("generic failure".to_string()));
        }
        self.sent_sms
            .lock()
            .push((phone_number.to_string(), body.to_string()));
        Ok(())
    }
}

#[async_trait]
impl AlertStore for Fake {
    async fn submit_alert(&self, alert: &EmergencyAlert) -> Result<(), CollaboratorError> {
        self.record(Call::Alert(alert.phone_number.clone()));
        if self.alert_failures.lock().contains(&alert.phone_number) {
            return Err(CollaboratorError::Unavailable("alert store".to_string()));
        }
        self.stored_alerts.lock().push(alert.clone());
        Ok(())
    }
}
