//! Donation form handler.
//!
//! Submissions are acknowledged and nothing else: no field is read, stored
//! or forwarded anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

/// Acknowledgment shown after a submission.
pub const DONATION_THANKS: &str = "Thank you for your donation! 💚";

/// Donation form fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/donation_form.html")]
pub struct DonationFormTemplate {
    pub donation_acknowledged: bool,
}

/// Acknowledge a donation and hand back a cleared form (HTMX).
#[instrument]
pub async fn submit() -> impl IntoResponse {
    tracing::info!("Donation form acknowledged");
    DonationFormTemplate {
        donation_acknowledged: true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledged_form_renders_thanks_and_empty_fields() {
        let html = DonationFormTemplate {
            donation_acknowledged: true,
        }
        .render()
        .unwrap();

        assert!(html.contains(DONATION_THANKS));
        assert!(html.contains("id=\"donation-form\""));
        assert!(!html.contains("value=\""));
    }

    #[test]
    fn test_fresh_form_has_no_thanks() {
        let html = DonationFormTemplate {
            donation_acknowledged: false,
        }
        .render()
        .unwrap();

        assert!(!html.contains(DONATION_THANKS));
    }
}
