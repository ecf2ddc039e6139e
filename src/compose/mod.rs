//! HTML email composition. Everything here is pure: records in, strings out.

pub mod notification;
pub mod reminder;
pub mod report;

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::AttendanceCode;
use crate::variant::{EventBlock, SiteVariant, MUHURTHAM, SOIREE, VENUE};

/// Subject and body of one outgoing email
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedEmail {
    pub subject: String,
    pub html: String,
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Which events a guest should be told about.
///
/// Sites with a fixed schedule always list all of their events; elsewhere the
/// guest's answer decides, soirée first.
pub fn select_event_blocks(variant: SiteVariant, attending: AttendanceCode) -> Vec<EventBlock> {
    let profile = variant.profile();
    if profile.fixed_schedule {
        return profile.event_blocks.to_vec();
    }

    match attending {
        AttendanceCode::CeremonyOnly => vec![MUHURTHAM],
        AttendanceCode::Both => vec![SOIREE, MUHURTHAM],
        AttendanceCode::EveningOnly => vec![SOIREE],
    }
}

/// "21 Aug 2025, 12:05 PM" in the given offset
pub fn format_timestamp(ts: DateTime<Utc>, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format("%d %b %Y, %I:%M %p").to_string()
}

pub(crate) fn event_blocks_html(blocks: &[EventBlock]) -> String {
    blocks
        .iter()
        .map(|block| {
            format!(
                r#"<div class="event-block" style="margin-bottom:18px; padding:14px 18px; background:#fff; border:1px solid #e3e3e3; border-radius:8px;">
  <h3 style="margin:0 0 6px; font-size:18px; color:#617939; font-family:'Abhaya Libre',serif;">{}</h3>
  <p style="margin:4px 0; font-size:15px;">{}</p>
  <p style="margin:4px 0; font-size:15px; font-weight:500;">{}</p>
</div>"#,
                block.title, block.date, block.time_range
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn venue_html() -> String {
    format!(
        r#"<div style="background:#fff; padding:18px 20px; border:1px solid #e3e3e3; border-radius:8px; margin-bottom:24px;">
  <p style="margin:0 0 8px; font-size:15px; font-weight:600; color:#617939;">Venue</p>
  <p style="margin:0; font-size:15px; line-height:1.5;">{}<br/>{}<br/>{}</p>
  <p style="margin:10px 0 0;"><a href="{}" style="color:#617939; font-weight:600; text-decoration:none;">Open in Google Maps →</a></p>
</div>"#,
        VENUE.name, VENUE.address_lines[0], VENUE.address_lines[1], VENUE.map_url
    )
}
