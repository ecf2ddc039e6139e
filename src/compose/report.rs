use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use rand::Rng;

use super::{escape_html, format_timestamp};
use crate::models::RsvpRecord;
use crate::variant::SiteVariant;

pub const SIGN_OFFS: [&str; 5] = [
    "Kind regards,",
    "Warm wishes,",
    "Best regards,",
    "Cheers,",
    "With appreciation,",
];

const SIGNATURE: &str = "Anvi";

/// Pick a closing line for the report
pub fn random_sign_off() -> &'static str {
    let mut rng = rand::rng();
    SIGN_OFFS[rng.random_range(0..SIGN_OFFS.len())]
}

/// Totals shown at the top of the report
#[derive(Debug, Default, PartialEq)]
pub struct ReportSummary {
    pub total_rsvps: usize,
    pub total_guests: u32,
    pub guests_by_variant: BTreeMap<SiteVariant, u32>,
}

pub fn summarize(records: &[RsvpRecord]) -> ReportSummary {
    let mut summary = ReportSummary {
        total_rsvps: records.len(),
        ..Default::default()
    };

    for record in records {
        // Stored counts are not range-checked on read.
        summary.total_guests = summary.total_guests.saturating_add(record.num_guests);
        let by_variant = summary.guests_by_variant.entry(record.site_variant).or_insert(0);
        *by_variant = by_variant.saturating_add(record.num_guests);
    }

    summary
}

pub fn report_subject(generated_at: DateTime<Utc>, offset: &FixedOffset) -> String {
    format!(
        "Good Morning – Daily RSVP Summary ({})",
        generated_at.with_timezone(offset).format("%d/%m/%Y")
    )
}

/// Render the admin RSVP summary
pub fn compose_report(
    records: &[RsvpRecord],
    generated_at: DateTime<Utc>,
    offset: &FixedOffset,
    sign_off: &str,
) -> String {
    let footer = format!(
        r#"<p style="font-size: 12px; color: #888;">Report generated on {}</p>
<br/>
<p>{}<br/><strong>{}</strong></p>"#,
        format_timestamp(generated_at, offset),
        escape_html(sign_off),
        SIGNATURE
    );

    if records.is_empty() {
        return format!(
            "<p>Good morning,</p>\n<p>There are no RSVPs yet.</p>\n{}",
            footer
        );
    }

    let summary = summarize(records);

    let by_variant = summary
        .guests_by_variant
        .iter()
        .map(|(variant, guests)| {
            format!(
                "{} (site {}): {} guests",
                variant.profile().site_title,
                variant,
                guests
            )
        })
        .collect::<Vec<_>>()
        .join("<br/>");

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                index + 1,
                escape_html(&record.name),
                escape_html(&record.email),
                record.attending.label(),
                record.num_guests,
                record.site_variant.profile().site_title,
                format_timestamp(record.created_at, offset),
            )
        })
        .collect::<String>();

    format!(
        r#"<p>Good morning,</p>
<p>Please find below the daily RSVP summary:</p>
<div class="summary" style="background-color: #f9f9f9; padding: 15px; margin: 15px 0; border-radius: 5px;">
  <h3 style="margin-top: 0;">Summary</h3>
  <p><strong>Total RSVPs:</strong> {total_rsvps}</p>
  <p><strong>Total Guests:</strong> {total_guests}</p>
  <p><strong>By Website Version:</strong><br/>{by_variant}</p>
</div>
<table border="1" cellpadding="8" cellspacing="0" style="border-collapse: collapse; font-family: Arial, sans-serif; font-size: 14px; width: 100%;">
  <thead style="background-color: #f2f2f2;">
    <tr><th>#</th><th>Name</th><th>Email</th><th>Attending</th><th>Number of Guests</th><th>Website Version</th><th>Created At</th></tr>
  </thead>
  <tbody>
{rows}  </tbody>
</table>
{footer}"#,
        total_rsvps = summary.total_rsvps,
        total_guests = summary.total_guests,
        by_variant = by_variant,
        rows = rows,
        footer = footer,
    )
}
