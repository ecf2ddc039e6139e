use chrono::FixedOffset;

use super::reminder::guest_letter;
use super::{escape_html, format_timestamp, ComposedEmail};
use crate::models::{ContactMessage, RsvpRecord};

/// Alert for the couple when a new RSVP arrives
pub fn compose_admin_alert(record: &RsvpRecord, offset: &FixedOffset) -> ComposedEmail {
    let profile = record.site_variant.profile();

    let html = format!(
        r#"<p>A new RSVP has been submitted on <strong>{site}</strong>.</p>
<table border="1" cellpadding="8" cellspacing="0" style="border-collapse: collapse; font-family: Arial, sans-serif; font-size: 14px;">
  <tr><th align="left">Name</th><td>{name}</td></tr>
  <tr><th align="left">Email</th><td>{email}</td></tr>
  <tr><th align="left">Attending</th><td>{attending}</td></tr>
  <tr><th align="left">Number of Guests</th><td>{guests}</td></tr>
  <tr><th align="left">Website Version</th><td>{site} (site {code})</td></tr>
  <tr><th align="left">Submitted At</th><td>{created}</td></tr>
</table>"#,
        site = profile.site_title,
        name = escape_html(&record.name),
        email = escape_html(&record.email),
        attending = record.attending.label(),
        guests = record.num_guests,
        code = record.site_variant,
        created = format_timestamp(record.created_at, offset),
    );

    ComposedEmail {
        // Subjects are plain text.
        subject: format!("New RSVP: {} ({})", record.name, profile.site_title),
        html,
    }
}

/// Confirmation sent to the guest right after they RSVP
pub fn compose_guest_confirmation(record: &RsvpRecord) -> ComposedEmail {
    let profile = record.site_variant.profile();

    let intro = format!(
        "Thank you for your RSVP! We have noted {} joining us for {}. \
         Here is what to expect:",
        guest_phrase(record.num_guests),
        record.attending.phrase()
    );

    ComposedEmail {
        subject: format!("{} – RSVP Confirmation", profile.couple_names),
        html: guest_letter(record, &intro),
    }
}

fn guest_phrase(num_guests: u32) -> String {
    match num_guests {
        1 => "1 guest".to_string(),
        n => format!("{} guests", n),
    }
}

/// Forward a contact-form message to the couple
pub fn compose_contact_alert(message: &ContactMessage, offset: &FixedOffset) -> ComposedEmail {
    let reply_to = message
        .email
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "not provided".to_string());

    ComposedEmail {
        subject: format!("New message from {}", message.name),
        html: format!(
            r#"<p><strong>From:</strong> {name} ({reply_to})</p>
<p><strong>Received:</strong> {received}</p>
<blockquote style="border-left: 3px solid #617939; margin: 12px 0; padding: 4px 12px; white-space: pre-wrap;">{body}</blockquote>"#,
            name = escape_html(&message.name),
            reply_to = reply_to,
            received = format_timestamp(message.created_at, offset),
            body = escape_html(&message.message),
        ),
    }
}
