//! Emergency notification cascade on top of `vitals-core`.
//!
//! A reading is classified first; only critical readings reach the
//! [`EmergencyDispatcher`], which calls an ambulance and notifies every
//! emergency contact by SMS and by a record in the remote alert store.
//! Each step is best-effort and its outcome lands in a [`DispatchReport`].

mod dispatcher;
mod ports;
mod report;
mod responder;

pub use dispatcher::EmergencyDispatcher;
pub use ports::{
    AlertStore, Clock, Collaborators, ContactDirectory, FixedClock, LocationProvider,
    SmsTransport, SystemClock, Telephony,
};
pub use report::{ContactDelivery, DeliveryStatus, DispatchReport};
pub use responder::{CriticalVitalsCheck, EmergencyResponder, ReadingOutcome};

use vitals_core::VitalsError;

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Errors that abort a dispatch. Per-contact failures never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to fetch emergency contacts: {0}")]
    Contacts(CollaboratorError),
    #[error(transparent)]
    Vitals(#[from] VitalsError),
}
