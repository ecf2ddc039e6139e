//! Site variants: which deployment of the wedding site is serving the request.
//!
//! Every deployment runs the same code; the variant only changes display text,
//! the canonical URL and which event blocks a guest is told about.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single event on the wedding schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBlock {
    pub title: &'static str,
    pub date: &'static str,
    pub time_range: &'static str,
}

pub const SOIREE: EventBlock = EventBlock {
    title: "Soirée",
    date: "Wednesday, 20 August 2025",
    time_range: "6:00 PM – 9:00 PM IST",
};

pub const MUHURTHAM: EventBlock = EventBlock {
    title: "Wedding – Muhurtham",
    date: "Thursday, 21 August 2025",
    time_range: "12:05 PM IST",
};

pub const MUHURTHAM_FIRST: EventBlock = EventBlock {
    title: "Wedding – Muhurtham 1",
    date: "Thursday, 21 August 2025",
    time_range: "12:05 PM IST",
};

pub const MUHURTHAM_SECOND: EventBlock = EventBlock {
    title: "Wedding – Muhurtham 2",
    date: "Thursday, 21 August 2025",
    time_range: "08:00 AM IST",
};

/// Venue shown in every guest-facing email
pub struct Venue {
    pub name: &'static str,
    pub address_lines: [&'static str; 2],
    pub map_url: &'static str,
}

pub const VENUE: Venue = Venue {
    name: "Villa Kasu",
    address_lines: [
        "1, Kariyammana Agrahara Rd, Yemalur, Bengaluru 560037",
        "Karnataka, India",
    ],
    map_url: "https://maps.google.com/?q=12.943319832193993,77.68109909325422",
};

/// Display data for one site variant
#[derive(Debug)]
pub struct VariantProfile {
    pub couple_names: &'static str,
    pub site_title: &'static str,
    pub site_url: &'static str,
    pub event_title: &'static str,
    pub event_blocks: &'static [EventBlock],
    /// Guests of this site always see the full schedule, whatever they answered.
    pub fixed_schedule: bool,
}

const EVENT_TITLE: &str = "Wedding Celebrations – August 2025";

static PROFILE_ZERO: VariantProfile = VariantProfile {
    couple_names: "Athira & Gowtham",
    site_title: "Athira weds Gowtham",
    site_url: "https://athiraandgowtham.onrender.com",
    event_title: EVENT_TITLE,
    event_blocks: &[MUHURTHAM, SOIREE],
    fixed_schedule: false,
};

static PROFILE_ONE: VariantProfile = VariantProfile {
    couple_names: "Athira & Gowtham",
    site_title: "Athira weds Gowtham",
    site_url: "https://athirawedsgowtham2025.onrender.com",
    event_title: EVENT_TITLE,
    event_blocks: &[MUHURTHAM, SOIREE],
    fixed_schedule: false,
};

static PROFILE_TWO: VariantProfile = VariantProfile {
    couple_names: "Gowtham & Athira",
    site_title: "Gowtham weds Athira",
    site_url: "https://gowthamwedsathira2025.onrender.com",
    event_title: EVENT_TITLE,
    event_blocks: &[SOIREE, MUHURTHAM_FIRST, MUHURTHAM_SECOND],
    fixed_schedule: true,
};

// No dedicated site exists for "3"; it keeps variant 0 presentation.
static PROFILE_THREE: VariantProfile = VariantProfile {
    couple_names: "Athira & Gowtham",
    site_title: "Athira weds Gowtham",
    site_url: "https://athiraandgowtham.onrender.com",
    event_title: EVENT_TITLE,
    event_blocks: &[MUHURTHAM, SOIREE],
    fixed_schedule: false,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SiteVariant {
    #[default]
    Zero,
    One,
    Two,
    Three,
}

impl SiteVariant {
    /// Resolve a variant code. Unknown codes fall back to `Zero`.
    pub fn parse(code: &str) -> Self {
        match code.trim() {
            "1" => SiteVariant::One,
            "2" => SiteVariant::Two,
            "3" => SiteVariant::Three,
            _ => SiteVariant::Zero,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            SiteVariant::Zero => "0",
            SiteVariant::One => "1",
            SiteVariant::Two => "2",
            SiteVariant::Three => "3",
        }
    }

    pub fn profile(self) -> &'static VariantProfile {
        match self {
            SiteVariant::Zero => &PROFILE_ZERO,
            SiteVariant::One => &PROFILE_ONE,
            SiteVariant::Two => &PROFILE_TWO,
            SiteVariant::Three => &PROFILE_THREE,
        }
    }
}

impl fmt::Display for SiteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for SiteVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for SiteVariant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(SiteVariant::parse(&code))
    }
}
