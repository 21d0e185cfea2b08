//! Dịch vụ giả lập: ghi log thay vì gọi điện, nhắn tin hay gửi lên máy chủ.

use async_trait::async_trait;
use vitals_alert::{
    AlertStore, CollaboratorError, ContactDirectory, LocationProvider, SmsTransport, Telephony,
};
use vitals_core::{EmergencyAlert, EmergencyContact, Location};

/// Vị trí cố định lấy từ tham số dòng lệnh.
pub struct FixedLocation(pub Option<Location>);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Option<Location>, CollaboratorError> {
        Ok(self.0)
    }
}

/// Danh bạ khẩn cấp đọc từ file JSON.
pub struct FileContacts(pub Vec<EmergencyContact>);

#[async_trait]
impl ContactDirectory for FileContacts {
    async fn emergency_contacts(
        &self,
        user_id: &str,
    ) -> Result<Vec<EmergencyContact>, CollaboratorError> {
        tracing::debug!(user_id, count = self.0.len(), "Loaded emergency contacts");
        Ok(self.0.clone())
    }
}

pub struct LoggingPhone;

#[async_trait]
impl Telephony for LoggingPhone {
    async fn place_call(&self, phone_number: &str) -> Result<(), CollaboratorError> {
        tracing::info!(phone_number, "Would place call");
        Ok(())
    }
}

#[async_trait]
impl SmsTransport for LoggingPhone {
    async fn send_sms(&self, phone_number: &str, body: &str) -> Result<(), CollaboratorError> {
        tracing::info!(phone_number, bytes = body.len(), "Would send SMS");
        Ok(())
    }
}

pub struct LoggingAlertStore;

#[async_trait]
impl AlertStore for LoggingAlertStore {
    async fn submit_alert(&self, alert: &EmergencyAlert) -> Result<(), CollaboratorError> {
        tracing::info!(phone_number = %alert.phone_number, "Would submit alert record");
        Ok(())
    }
}
