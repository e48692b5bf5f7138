use chrono::Local;

use crate::config::RelayConfig;
use crate::error::SubmitError;
use crate::mailer::MailRelay;
use crate::models::join_request::JoinRequest;
use crate::models::message::OutboundMessage;

/// Runs a join request through the full pipeline: parse, validate, probe the
/// relay, then deliver the admin notification and the applicant confirmation
/// together. Either delivery failing fails the whole submission.
pub async fn submit(
    raw: &[u8],
    config: &RelayConfig,
    relay: &dyn MailRelay,
) -> Result<(), SubmitError> {
    let request: JoinRequest =
        serde_json::from_slice(raw).map_err(|e| SubmitError::Unexpected(e.to_string()))?;

    request.validate()?;

    relay
        .verify()
        .await
        .map_err(|e| SubmitError::RelayUnavailable(e.to_string()))?;

    let submitted_at = Local::now();
    let notification = OutboundMessage::admin_notification(&request, config, submitted_at);
    let confirmation = OutboundMessage::submitter_confirmation(&request, config, submitted_at);

    let (notification_sent, confirmation_sent) =
        tokio::join!(relay.send(&notification), relay.send(&confirmation));

    notification_sent
        .and(confirmation_sent)
        .map_err(|e| SubmitError::Delivery(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::fake::FakeRelay;
    use serde_json::json;

    fn config() -> RelayConfig {
        RelayConfig {
            host: "relay.test".to_string(),
            port: 587,
            secure: false,
            username: "club@relay.test".to_string(),
            password: "hunter2".to_string(),
            admin_email: "admin@club.test".to_string(),
            accept_invalid_certs: false,
            timeout_secs: 30,
        }
    }

    fn payload() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "skillLevel": "beginner",
            "reason": "curious"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn malformed_payload_is_an_unexpected_error() {
        let relay = FakeRelay::reliable();
        let result = submit(b"not json", &config(), &relay).await;

        assert!(matches!(result, Err(SubmitError::Unexpected(_))));
        assert_eq!(relay.verify_count(), 0);
    }

    #[tokio::test]
    async fn missing_fields_never_touch_the_relay() {
        let incomplete = [
            json!({"email": "ada@example.com", "skillLevel": "beginner", "reason": "curious"}),
            json!({"name": "Ada", "skillLevel": "beginner", "reason": "curious"}),
            json!({"name": "Ada", "email": "ada@example.com", "reason": "curious"}),
            json!({"name": "Ada", "email": "ada@example.com", "skillLevel": "beginner"}),
        ];

        for body in incomplete {
            let relay = FakeRelay::reliable();
            let raw = serde_json::to_vec(&body).unwrap();
            let result = submit(&raw, &config(), &relay).await;

            assert!(matches!(result, Err(SubmitError::MissingFields)), "{body}");
            assert_eq!(relay.verify_count(), 0);
            assert!(relay.sent_messages().is_empty());
        }
    }

    #[tokio::test]
    async fn bad_email_shapes_never_touch_the_relay() {
        for email in ["abc", "a@b", "@b.com"] {
            let relay = FakeRelay::reliable();
            let raw = serde_json::to_vec(&json!({
                "name": "Ada",
                "email": email,
                "skillLevel": "beginner",
                "reason": "curious"
            }))
            .unwrap();
            let result = submit(&raw, &config(), &relay).await;

            assert!(matches!(result, Err(SubmitError::InvalidEmail)), "{email}");
            assert_eq!(relay.verify_count(), 0);
        }
    }

    #[tokio::test]
    async fn failed_probe_sends_nothing() {
        let relay = FakeRelay::unreachable();
        let result = submit(&payload(), &config(), &relay).await;

        assert!(matches!(result, Err(SubmitError::RelayUnavailable(_))));
        assert_eq!(relay.verify_count(), 1);
        assert!(relay.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn success_dispatches_exactly_two_messages() {
        let relay = FakeRelay::reliable();
        submit(&payload(), &config(), &relay).await.unwrap();

        let sent = relay.sent_messages();
        assert_eq!(sent.len(), 2);

        let recipients: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
        assert!(recipients.contains(&"admin@club.test"));
        assert!(recipients.contains(&"ada@example.com"));
    }

    #[tokio::test]
    async fn one_failed_delivery_collapses_to_a_single_error() {
        // Confirmation bounces, notification goes through.
        let relay = FakeRelay::rejecting("ada@example.com");
        let result = submit(&payload(), &config(), &relay).await;

        match result {
            Err(SubmitError::Delivery(detail)) => {
                assert!(detail.contains("550 mailbox unavailable"))
            }
            other => panic!("expected a delivery error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_admin_delivery_is_the_same_single_error() {
        let relay = FakeRelay::rejecting("admin@club.test");
        let result = submit(&payload(), &config(), &relay).await;

        assert!(matches!(result, Err(SubmitError::Delivery(_))));
    }

    #[tokio::test]
    async fn repeated_submissions_are_not_deduplicated() {
        let relay = FakeRelay::reliable();
        submit(&payload(), &config(), &relay).await.unwrap();
        submit(&payload(), &config(), &relay).await.unwrap();

        assert_eq!(relay.sent_messages().len(), 4);
    }
}
