//! CSV roster import and export.
//!
//! Import is header-mapped and forgiving: rows with a missing name or
//! unparseable coordinates are reported as skips with a line number instead
//! of failing the whole file.

use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::domain::{SupportLevel, Voter, VoterSubmission};
use crate::geo::Point;

pub(crate) const EXPORT_HEADERS: [&str; 9] = [
    "Voter ID",
    "Full Name",
    "Phone",
    "Email",
    "Address",
    "Latitude",
    "Longitude",
    "Support",
    "Referral Source",
];

/// One roster line: either an intake payload or the reason it was skipped.
#[derive(Debug)]
pub(crate) struct RosterLine {
    pub(crate) line: u64,
    pub(crate) outcome: Result<VoterSubmission, String>,
}

pub(crate) fn parse_roster<R: Read>(reader: R) -> Result<Vec<RosterLine>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut lines = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        // The header occupies line 1.
        let line = (index + 2) as u64;
        let row = record?;
        lines.push(RosterLine {
            line,
            outcome: row.into_submission(),
        });
    }

    Ok(lines)
}

pub fn write_roster(voters: &[Voter]) -> Result<String, RosterError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for voter in voters {
        let lat = voter
            .location
            .map(|point| point.lat.to_string())
            .unwrap_or_default();
        let lng = voter
            .location
            .map(|point| point.lng.to_string())
            .unwrap_or_default();
        writer.write_record([
            voter.id.0.as_str(),
            voter.full_name.as_str(),
            voter.phone.as_deref().unwrap_or(""),
            voter.email.as_deref().unwrap_or(""),
            voter.address.as_deref().unwrap_or(""),
            lat.as_str(),
            lng.as_str(),
            voter.support.label(),
            voter.referral_source.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| RosterError::Buffer(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| RosterError::Buffer(err.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster buffer error: {0}")]
    Buffer(String),
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Full Name", default)]
    full_name: String,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(rename = "Address", default, deserialize_with = "empty_string_as_none")]
    address: Option<String>,
    #[serde(rename = "Latitude", default, deserialize_with = "empty_string_as_none")]
    latitude: Option<String>,
    #[serde(rename = "Longitude", default, deserialize_with = "empty_string_as_none")]
    longitude: Option<String>,
    #[serde(rename = "Support", default, deserialize_with = "empty_string_as_none")]
    support: Option<String>,
    #[serde(
        rename = "Referral Source",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    referral_source: Option<String>,
}

impl RosterRow {
    fn into_submission(self) -> Result<VoterSubmission, String> {
        if self.full_name.trim().is_empty() {
            return Err("missing full name".to_string());
        }

        let location = match (self.latitude.as_deref(), self.longitude.as_deref()) {
            (Some(lat), Some(lng)) => {
                let lat = lat
                    .parse::<f64>()
                    .map_err(|_| format!("invalid latitude '{lat}'"))?;
                let lng = lng
                    .parse::<f64>()
                    .map_err(|_| format!("invalid longitude '{lng}'"))?;
                Some(Point::new(lng, lat))
            }
            (None, None) => None,
            _ => return Err("latitude and longitude must be supplied together".to_string()),
        };

        let support = self
            .support
            .as_deref()
            .map(SupportLevel::from_loose_label)
            .unwrap_or(SupportLevel::Unknown);

        Ok(VoterSubmission {
            full_name: self.full_name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            location,
            support,
            referral_source: self.referral_source,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
