// campaign.rs — OutreachCampaign: one scheduled messaging effort.
//
// A campaign runs one channel against one voter segment across a subset of
// the fixed 12-week calendar. Scheduled weeks are stored ascending with no
// duplicates. Actual contacts and payment flags are sparse per-week maps;
// an absent week means nothing logged.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The campaign calendar is a fixed 12 weeks, numbered 1..=12.
pub const CALENDAR_WEEKS: u32 = 12;

/// Stock script text a new campaign starts with.
pub const DEFAULT_SCRIPT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
     Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

/// Outreach channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    DoorKnocking,
    DirectMail,
    PhoneBanking,
    DigitalAdvertising,
    Texting,
    EventsRallies,
    YardSigns,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::DoorKnocking,
        Channel::DirectMail,
        Channel::PhoneBanking,
        Channel::DigitalAdvertising,
        Channel::Texting,
        Channel::EventsRallies,
        Channel::YardSigns,
    ];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Channel::DoorKnocking => "Door Knocking",
            Channel::DirectMail => "Direct Mail",
            Channel::PhoneBanking => "Phone Banking",
            Channel::DigitalAdvertising => "Digital Advertising",
            Channel::Texting => "Texting",
            Channel::EventsRallies => "Events & Rallies",
            Channel::YardSigns => "Yard Signs",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "door-knocking" | "door knocking" => Ok(Channel::DoorKnocking),
            "direct-mail" | "direct mail" => Ok(Channel::DirectMail),
            "phone-banking" | "phone banking" => Ok(Channel::PhoneBanking),
            "digital-advertising" | "digital advertising" => Ok(Channel::DigitalAdvertising),
            "texting" => Ok(Channel::Texting),
            "events-rallies" | "events & rallies" => Ok(Channel::EventsRallies),
            "yard-signs" | "yard signs" => Ok(Channel::YardSigns),
            other => Err(format!("unknown channel: {}", other)),
        }
    }
}

/// The planner board groups the calendar into three phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Awareness,
    Contact,
    GetOutTheVote,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Awareness, Phase::Contact, Phase::GetOutTheVote];

    /// The phase a calendar week belongs to. `None` outside 1..=12.
    pub fn for_week(week: u32) -> Option<Phase> {
        match week {
            1..=4 => Some(Phase::Awareness),
            5..=8 => Some(Phase::Contact),
            9..=12 => Some(Phase::GetOutTheVote),
            _ => None,
        }
    }

    /// The calendar weeks making up this phase.
    pub fn weeks(&self) -> std::ops::RangeInclusive<u32> {
        match self {
            Phase::Awareness => 1..=4,
            Phase::Contact => 5..=8,
            Phase::GetOutTheVote => 9..=12,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Awareness => "Awareness",
            Phase::Contact => "Contact",
            Phase::GetOutTheVote => "Get Out The Vote",
        };
        write!(f, "{}", label)
    }
}

/// A scheduled outreach campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachCampaign {
    /// Generated identity.
    pub id: i64,

    pub name: String,

    pub channel: Channel,

    /// Scheduled calendar weeks: ascending, no duplicates, never empty
    /// once persisted.
    pub weeks: Vec<u32>,

    /// The target voter segment.
    pub voter_segment_id: i64,

    /// Outreach script, editable independently of the rest of the record.
    pub script: String,

    /// Contacts logged per week. Sparse: absent week = 0 logged.
    #[serde(default)]
    pub actual_contacts: BTreeMap<u32, i64>,

    /// Per-week payment flags. Meaningful only for Texting campaigns.
    #[serde(default)]
    pub paid_weeks: BTreeMap<u32, bool>,
}

impl OutreachCampaign {
    /// Contacts logged for a week (0 when nothing is logged).
    pub fn contacts_for_week(&self, week: u32) -> i64 {
        self.actual_contacts.get(&week).copied().unwrap_or(0)
    }

    /// Whether the campaign is scheduled for a calendar week.
    pub fn is_scheduled_for(&self, week: u32) -> bool {
        self.weeks.contains(&week)
    }

    /// Sum of all logged contacts across every week.
    pub fn total_contacts(&self) -> i64 {
        self.actual_contacts.values().sum()
    }
}

/// The caller-supplied fields of a create/update command. Identity and the
/// logged contact/payment maps are managed by the store; an update draft
/// may supply replacement maps explicitly, otherwise the stored ones are
/// preserved.
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    pub name: String,
    pub channel: Channel,
    pub weeks: Vec<u32>,
    pub script: String,
    pub actual_contacts: Option<BTreeMap<u32, i64>>,
    pub paid_weeks: Option<BTreeMap<u32, bool>>,
}

impl CampaignDraft {
    pub fn new(name: impl Into<String>, channel: Channel, weeks: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            channel,
            weeks,
            script: DEFAULT_SCRIPT.to_string(),
            actual_contacts: None,
            paid_weeks: None,
        }
    }
}

/// Toggle a week in a schedule: insert it in ascending position if absent,
/// remove it if present. The schedule never holds duplicates.
pub fn toggle_week(weeks: &mut Vec<u32>, week: u32) {
    match weeks.binary_search(&week) {
        Ok(pos) => {
            weeks.remove(pos);
        }
        Err(pos) => {
            weeks.insert(pos, week);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_labels_round_trip_through_from_str() {
        for channel in Channel::ALL {
            let parsed: Channel = channel.to_string().parse().unwrap();
            assert_eq!(parsed, channel);
        }
        assert!("carrier-pigeon".parse::<Channel>().is_err());
    }

    #[test]
    fn channel_slugs_parse() {
        assert_eq!("door-knocking".parse::<Channel>(), Ok(Channel::DoorKnocking));
        assert_eq!("texting".parse::<Channel>(), Ok(Channel::Texting));
        assert_eq!("events-rallies".parse::<Channel>(), Ok(Channel::EventsRallies));
    }

    #[test]
    fn phases_cover_the_calendar() {
        for week in 1..=CALENDAR_WEEKS {
            let phase = Phase::for_week(week).unwrap();
            assert!(phase.weeks().contains(&week));
        }
        assert!(Phase::for_week(0).is_none());
        assert!(Phase::for_week(13).is_none());
    }

    #[test]
    fn toggle_week_keeps_weeks_sorted_and_unique() {
        let mut weeks = Vec::new();
        for w in [7, 3, 7, 10, 3, 1, 10, 10] {
            toggle_week(&mut weeks, w);
        }
        // 7 toggled twice (gone), 3 twice (gone), 10 three times (present).
        assert_eq!(weeks, vec![1, 10]);

        toggle_week(&mut weeks, 5);
        toggle_week(&mut weeks, 2);
        assert_eq!(weeks, vec![1, 2, 5, 10]);

        let mut sorted = weeks.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(weeks, sorted);
    }

    #[test]
    fn contacts_default_to_zero_for_unlogged_weeks() {
        let campaign = OutreachCampaign {
            id: 1,
            name: "Canvass the north side".to_string(),
            channel: Channel::DoorKnocking,
            weeks: vec![1, 2],
            voter_segment_id: 0,
            script: DEFAULT_SCRIPT.to_string(),
            actual_contacts: BTreeMap::from([(2, 40)]),
            paid_weeks: BTreeMap::new(),
        };

        assert_eq!(campaign.contacts_for_week(1), 0);
        assert_eq!(campaign.contacts_for_week(2), 40);
        assert_eq!(campaign.total_contacts(), 40);
    }

    #[test]
    fn sparse_maps_default_when_absent_from_json() {
        let json = r#"{
            "id": 5,
            "name": "Mailer",
            "channel": "direct_mail",
            "weeks": [4, 5],
            "voter_segment_id": 0,
            "script": "..."
        }"#;
        let campaign: OutreachCampaign = serde_json::from_str(json).unwrap();
        assert!(campaign.actual_contacts.is_empty());
        assert!(campaign.paid_weeks.is_empty());
    }
}
