use chrono::{DateTime, Local};

use crate::config::RelayConfig;
use crate::models::join_request::JoinRequest;

/// A fully composed mail, ready to hand to the relay. Every accepted join
/// request produces exactly two of these.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl OutboundMessage {
    /// Notification to the club administrator with the submitted details.
    pub fn admin_notification(
        request: &JoinRequest,
        config: &RelayConfig,
        submitted_at: DateTime<Local>,
    ) -> Self {
        let html_body = format!(
            r#"
        <h1 style="color: #1E90FF; border-bottom: 2px solid #1E90FF; padding-bottom: 10px;">New Join Request</h1>
        <div style="background-color: #f5f5f5; padding: 20px; border-radius: 10px; margin-top: 20px;">
          <p><strong>Name:</strong> {name}</p>
          <p><strong>Email:</strong> {email}</p>
          <p><strong>Skill Level:</strong> {skill_level}</p>
          <p><strong>Reason for Joining:</strong> {reason}</p>
        </div>
        <p style="margin-top: 20px; font-style: italic; color: #666;">This request was submitted on {submitted}</p>
      "#,
            name = request.name,
            email = request.email,
            skill_level = request.skill_level,
            reason = request.reason,
            submitted = submitted_at.format("%-m/%-d/%Y, %-I:%M:%S %p"),
        );

        OutboundMessage {
            from_name: "Community Join Request".to_string(),
            from_address: config.username.clone(),
            to: config.admin_email.clone(),
            subject: format!("New Join Request from {}", request.name),
            html_body,
        }
    }

    /// Confirmation back to the applicant echoing their submission.
    pub fn submitter_confirmation(
        request: &JoinRequest,
        config: &RelayConfig,
        submitted_at: DateTime<Local>,
    ) -> Self {
        let html_body = format!(
            r#"
        <!DOCTYPE html>
        <html>
        <head>
          <meta charset="utf-8">
          <meta name="viewport" content="width=device-width, initial-scale=1.0">
          <title>Thank You for Your Interest</title>
          <style>
            body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; }}
            .header {{ background-color: #1E90FF; padding: 20px; text-align: center; }}
            .header h1 {{ color: white; margin: 0; }}
            .content {{ padding: 20px; }}
            .summary {{ background-color: #f5f5f5; padding: 20px; border-radius: 10px; margin: 20px 0; }}
            .footer {{ text-align: center; padding: 20px; font-size: 12px; color: #666; }}
          </style>
        </head>
        <body>
          <div class="header">
            <h1>Thank You for Your Interest!</h1>
          </div>
          <div class="content">
            <p>Dear {name},</p>
            <p>We've received your request to join our community. Our team will review your application and get back to you soon.</p>
            <p>Here's a summary of your submission:</p>
            <div class="summary">
              <p><strong>Name:</strong> {name}</p>
              <p><strong>Email:</strong> {email}</p>
              <p><strong>Skill Level:</strong> {skill_level}</p>
              <p><strong>Your Message:</strong> "{reason}"</p>
            </div>
            <p>We look forward to welcoming you to our community!</p>
            <p>Best regards,<br/>The Web Dev Community Team</p>
          </div>
          <div class="footer">
            <p>© {year} Web Development Community. All rights reserved.</p>
          </div>
        </body>
        </html>
      "#,
            name = request.name,
            email = request.email,
            skill_level = request.skill_level,
            reason = request.reason,
            year = submitted_at.format("%Y"),
        );

        OutboundMessage {
            from_name: "Web Dev Community".to_string(),
            from_address: config.username.clone(),
            to: request.email.clone(),
            subject: "Thank you for your interest in joining our community".to_string(),
            html_body,
        }
    }
}
