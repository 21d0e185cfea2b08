//! Sequential emergency notification protocol.

use std::sync::Arc;

use chrono::Utc;
use vitals_core::{
    format_alert_message, EmergencyAlert, EmergencyConfig, EmergencyContact, Location,
    VitalSigns,
};

use crate::ports::{Clock, Collaborators, SystemClock};
use crate::report::{ContactDelivery, DeliveryStatus, DispatchReport};
use crate::DispatchError;

/// Runs the notification cascade for a confirmed critical reading.
pub struct EmergencyDispatcher {
    config: EmergencyConfig,
    services: Collaborators,
    clock: Arc<dyn Clock>,
}

impl EmergencyDispatcher {
    pub fn new(config: EmergencyConfig, services: Collaborators) -> Result<Self, DispatchError> {
        config.validate()?;
        Ok(Self {
            config,
            services,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the wall clock used for the message timestamp.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &EmergencyConfig {
        &self.config
    }

    /// Location, message, ambulance call, then SMS and alert record per contact.
    ///
    /// Only a failed contact lookup aborts; every other failure is recorded in
    /// the returned report and the protocol moves on.
    #[tracing::instrument(skip(self, vitals))]
    pub async fn trigger_emergency_protocol(
        &self,
        vitals: VitalSigns,
        user_id: &str,
    ) -> Result<DispatchReport, DispatchError> {
        let dispatched_at = Utc::now();
        tracing::info!("Starting emergency protocol");

        let location = self.locate().await;
        let message = format_alert_message(&vitals, location.as_ref(), self.clock.now());
        let call = self.call_ambulance().await;

        let contacts = self
            .services
            .contacts
            .emergency_contacts(user_id)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Failed to fetch emergency contacts");
                DispatchError::Contacts(err)
            })?;

        let mut deliveries = Vec::with_capacity(contacts.len());
        for contact in &contacts {
            deliveries.push(self.notify(contact, &message).await);
        }

        let report = DispatchReport {
            dispatched_at,
            message,
            location,
            call,
            deliveries,
        };

        tracing::info!(
            contacts = report.deliveries.len(),
            sms_sent = report.sms_sent(),
            alerts_submitted = report.alerts_submitted(),
            "Emergency protocol finished"
        );

        Ok(report)
    }

    async fn locate(&self) -> Option<Location> {
        match self.services.location.current_location().await {
            Ok(Some(location)) => Some(location),
            Ok(None) => {
                tracing::debug!("No location fix available");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "Location lookup failed");
                None
            }
        }
    }

    async fn call_ambulance(&self) -> DeliveryStatus {
        if !self.config.call_ambulance {
            tracing::debug!("Ambulance call disabled");
            return DeliveryStatus::skipped("ambulance call disabled");
        }

        let result = self
            .services
            .telephony
            .place_call(&self.config.ambulance_number)
            .await;
        if let Err(err) = &result {
            tracing::warn!(
                number = %self.config.ambulance_number,
                error = %err,
                "Ambulance call was not placed"
            );
        }
        result.into()
    }

    async fn notify(&self, contact: &EmergencyContact, message: &str) -> ContactDelivery {
        let sms = self.send_sms(contact, message).await;

        let alert = EmergencyAlert {
            phone_number: contact.phone_number.clone(),
            body: message.to_string(),
        };
        let submitted = self.services.alerts.submit_alert(&alert).await;
        if let Err(err) = &submitted {
            tracing::warn!(error = %err, "Alert record was not stored");
            tracing::debug!(phone_number = %contact.phone_number, "Alert store rejected contact");
        }

        ContactDelivery {
            phone_number: contact.phone_number.clone(),
            sms,
            alert: submitted.into(),
        }
    }

    async fn send_sms(&self, contact: &EmergencyContact, message: &str) -> DeliveryStatus {
        if !self.config.sms_enabled {
            return DeliveryStatus::skipped("sms disabled");
        }
        if !contact.has_phone_number() {
            tracing::debug!("Skipping SMS for contact without phone number");
            return DeliveryStatus::skipped("blank phone number");
        }

        let result = self
            .services
            .sms
            .send_sms(&contact.phone_number, message)
            .await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "SMS delivery failed");
            tracing::debug!(phone_number = %contact.phone_number, "SMS not delivered to contact");
        }
        result.into()
    }
}
