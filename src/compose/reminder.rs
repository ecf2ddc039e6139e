use super::{escape_html, event_blocks_html, select_event_blocks, venue_html, ComposedEmail};
use crate::models::RsvpRecord;

/// Per-guest reminder sent ahead of the wedding
pub fn compose_reminder(record: &RsvpRecord) -> ComposedEmail {
    let profile = record.site_variant.profile();

    let intro = format!(
        "Thank you once again for your RSVP. We're excited that you'll be joining us for {}. \
         Here are the event details as the day approaches:",
        record.attending.phrase()
    );

    ComposedEmail {
        subject: format!("{} – Wedding Reminder & Thank You 🙏", profile.couple_names),
        html: guest_letter(record, &intro),
    }
}

/// Letter layout shared by every guest-facing email
pub(crate) fn guest_letter(record: &RsvpRecord, intro: &str) -> String {
    let profile = record.site_variant.profile();
    let blocks = select_event_blocks(record.site_variant, record.attending);
    let name = if record.name.trim().is_empty() {
        "Guest".to_string()
    } else {
        escape_html(record.name.trim())
    };

    format!(
        r#"<div style="font-family:'Abhaya Libre',serif; max-width:640px; margin:0 auto; background:#fff7e1; padding:28px; color:#333;">
  <div style="text-align:center; margin-bottom:26px;">
    <h1 style="margin:0 0 10px; font-size:28px; color:#617939;">{couple}</h1>
    <p style="margin:0; font-size:16px; letter-spacing:0.5px;">{event_title}</p>
  </div>
  <p style="font-size:17px; line-height:1.55;">Dear {name},</p>
  <p style="font-size:17px; line-height:1.55;">{intro}</p>
  <div style="margin:25px 0;">
{events}
  </div>
{venue}
  <p style="font-size:16px; line-height:1.55;">If you need to make any changes or check details again, you can revisit the website:</p>
  <p style="text-align:center; margin:28px 0;">
    <a href="{url}" style="background:#617939; color:#fff; padding:12px 24px; text-decoration:none; border-radius:6px; font-size:16px; font-weight:600; display:inline-block;">Visit Wedding Website</a>
  </p>
  <p style="text-align:center; font-size:13px; margin:-18px 0 24px;">Or copy this link: <a href="{url}" style="color:#617939; text-decoration:none;">{url}</a></p>
  <p style="font-size:15px; line-height:1.55;">We can't wait to celebrate with you!</p>
  <p style="font-size:15px; line-height:1.55; margin-top:24px;">Warmly,<br/>{couple}</p>
  <hr style="border:none; border-top:1px solid #d8d2c1; margin:30px 0 12px;"/>
  <p style="font-size:11px; color:#777; line-height:1.4;">You're receiving this email because you RSVP'd on our wedding website. If you believe this is an error, please ignore this email.</p>
</div>"#,
        couple = profile.couple_names,
        event_title = profile.event_title,
        name = name,
        intro = intro,
        events = event_blocks_html(&blocks),
        venue = venue_html(),
        url = profile.site_url,
    )
}
