//! Simulated mail delivery behind a transport seam.
//!
//! The dashboard "emails" a doctor's profile to an address the user enters.
//! Delivery is simulated — no network I/O happens anywhere in this crate —
//! but the transport is a trait so a real SMTP implementation can be slotted
//! in by a host without touching the profile formatting or the handlers.

use crate::doctor::DoctorRecord;
use crate::error::RosterResult;
use docmatch_types::EmailAddress;

/// Confirmation of a (possibly simulated) delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailReceipt {
    pub recipient: EmailAddress,
    pub summary: String,
}

/// Narrow seam for outbound mail.
pub trait MailTransport: Send + Sync {
    /// Delivers one message.
    ///
    /// # Errors
    ///
    /// Implementations return [`crate::RosterError::Mail`] when delivery
    /// fails; the simulated transport never does.
    fn send(&self, recipient: &EmailAddress, subject: &str, body: &str) -> RosterResult<()>;
}

/// Transport that records the send in the log and succeeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedTransport;

impl MailTransport for SimulatedTransport {
    fn send(&self, recipient: &EmailAddress, subject: &str, _body: &str) -> RosterResult<()> {
        tracing::info!("simulated mail to {}: {}", recipient, subject);
        Ok(())
    }
}

/// Renders a doctor profile as a human-readable email.
///
/// Returns `(subject, body)`.
pub fn profile_message(doctor: &DoctorRecord) -> (String, String) {
    let subject = format!("Doctor profile: {}", doctor.name);
    let body = format!(
        "{name}\nSpecialty: {specialty}\nLocation: {location}\nTreats: {symptoms}\n",
        name = doctor.name,
        specialty = doctor.specialty,
        location = doctor.location,
        symptoms = doctor.symptoms,
    );
    (subject, body)
}

/// Sends a doctor's profile through `transport` and builds the confirmation
/// shown to the user.
///
/// # Errors
///
/// Propagates the transport's delivery error.
pub fn send_profile(
    transport: &dyn MailTransport,
    recipient: &EmailAddress,
    doctor: &DoctorRecord,
) -> RosterResult<MailReceipt> {
    let (subject, body) = profile_message(doctor);
    transport.send(recipient, &subject, &body)?;

    Ok(MailReceipt {
        recipient: recipient.clone(),
        summary: format!(
            "Email sent to {} with profile of {}, {} in {}.",
            recipient, doctor.name, doctor.specialty, doctor.location
        ),
    })
}
