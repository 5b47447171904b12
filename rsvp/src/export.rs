use serde::Serialize;

use crate::error::Result;
use crate::model::GuestResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExportRow<'a> {
    name: &'a str,
    email: &'a str,
    companion_adults: i32,
    companion_children: i32,
    note: &'a str,
    attending: &'a str,
}

impl<'a> From<&'a GuestResponse> for ExportRow<'a> {
    fn from(record: &'a GuestResponse) -> Self {
        Self {
            name: &record.name,
            email: &record.email,
            companion_adults: record.companion_adults,
            companion_children: record.companion_children,
            note: record.note.as_deref().unwrap_or(""),
            attending: if record.attending { "Yes" } else { "No" },
        }
    }
}

/// Serialize records as UTF-8 CSV with the fixed header row
/// `Name,Email,CompanionAdults,CompanionChildren,Note,Attending`.
pub fn to_csv(records: &[GuestResponse]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut bytes);
        for record in records {
            writer.serialize(ExportRow::from(record))?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(bytes)
}
