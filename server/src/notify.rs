use url::Url;

use rsvp::client::{Email, EmailClient};
use rsvp::domain::EmailAddress;
use rsvp::model::GuestResponse;
use rsvp::summary::GuestSummary;

/// Which store mutation triggered the notification
#[derive(Debug, Clone, Copy)]
pub enum RsvpEvent {
    Created,
    Updated,
}

/// Outcome of a best-effort dispatch. Consumed for logging only, never
/// for control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Sent,
    /// No email credentials configured
    Skipped,
    /// Send failed; the error has already been logged
    Failed,
}

/// Best-effort notification sender. A failed or skipped dispatch never
/// affects the outcome of the store mutation that triggered it.
pub struct Notifier {
    client: Option<EmailClient>,
    couple_name: String,
    couple_recipients: Vec<EmailAddress>,
    gift_page_url: Url,
}

impl Notifier {
    pub fn new(
        client: Option<EmailClient>,
        couple_name: String,
        couple_recipients: Vec<EmailAddress>,
        gift_page_url: Url,
    ) -> Self {
        Self {
            client,
            couple_name,
            couple_recipients,
            gift_page_url,
        }
    }

    /// Send the couple their running guest-count summary
    #[tracing::instrument(name = "Notify couple", skip(self, summary))]
    pub async fn couple_summary(
        &self,
        event: RsvpEvent,
        guest: &GuestResponse,
        summary: &GuestSummary,
    ) -> Dispatch {
        let subject = match (event, guest.attending) {
            (RsvpEvent::Created, true) => "New RSVP confirmation ✨".to_string(),
            (RsvpEvent::Created, false) => format!("{} cannot make it", guest.name),
            (RsvpEvent::Updated, true) => format!("{} updated their RSVP", guest.name),
            (RsvpEvent::Updated, false) => format!("{} changed to not attending", guest.name),
        };

        let headline = match (event, guest.attending) {
            (RsvpEvent::Created, true) => format!(
                "🎉 YEYY! {} confirmed their attendance with {} adult companion(s) and {} child companion(s)!",
                guest.name, guest.companion_adults, guest.companion_children
            ),
            (RsvpEvent::Created, false) => format!("{} sent their regrets.", guest.name),
            (RsvpEvent::Updated, true) => format!(
                "{} updated their confirmation: now {} adult companion(s) and {} child companion(s).",
                guest.name, guest.companion_adults, guest.companion_children
            ),
            (RsvpEvent::Updated, false) => format!("{} can no longer attend.", guest.name),
        };

        let body = format!(
            "{}\n\n📋 Confirmed so far:\n{}\n\n👥 Total people expected: {}",
            headline,
            summary.lines.join("\n"),
            summary.total_headcount,
        );

        let mut outcome = Dispatch::Sent;
        for recipient in &self.couple_recipients {
            let email = Email {
                recipient: recipient.clone(),
                subject: subject.clone(),
                html_body: body.clone(),
                text_body: body.clone(),
            };
            match self.dispatch(email).await {
                Dispatch::Sent => {}
                other => outcome = other,
            }
        }
        outcome
    }

    /// Thank (or console) the guest, pointing at the gift page either way
    #[tracing::instrument(name = "Notify guest", skip(self))]
    pub async fn guest_acknowledgment(&self, guest: &GuestResponse) -> Dispatch {
        let recipient: EmailAddress = match guest.email.parse() {
            Ok(recipient) => recipient,
            Err(error) => {
                tracing::warn!(
                    error.cause_chain = ?error,
                    "Skipping acknowledgment, stored guest email failed to parse (email: {})",
                    guest.email
                );
                return Dispatch::Failed;
            }
        };

        let (subject, opening) = if guest.attending {
            (
                "Thank you for confirming! 💍".to_string(),
                format!(
                    "Thank you for confirming your attendance at {}'s wedding!",
                    self.couple_name
                ),
            )
        } else {
            (
                "We will miss you! 💍".to_string(),
                format!(
                    "We are sorry you cannot join us at {}'s wedding.",
                    self.couple_name
                ),
            )
        };

        let body = format!(
            "Hello {},\n\n{}\nWe are very happy to share this moment with you.\n\n\
             If you would like to leave a gift, you can do so here:\n{}\n\n\
             With love,\n{}",
            guest.name, opening, self.gift_page_url, self.couple_name,
        );

        let email = Email {
            recipient,
            subject,
            html_body: body.clone(),
            text_body: body,
        };

        self.dispatch(email).await
    }

    async fn dispatch(&self, email: Email) -> Dispatch {
        let Some(client) = &self.client else {
            tracing::info!("Email credentials not configured; skipping send");
            return Dispatch::Skipped;
        };

        match client.send(email).await {
            Ok(()) => Dispatch::Sent,
            Err(error) => {
                tracing::warn!("Failed to send notification email: {}", error);
                Dispatch::Failed
            }
        }
    }
}
