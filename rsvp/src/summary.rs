use crate::model::GuestResponse;

/// Printable summary of every attending response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestSummary {
    /// One line per attending guest, in input order
    pub lines: Vec<String>,
    /// Number of people expected, respondents included
    pub total_headcount: u32,
}

/// Derive the confirmed-guest listing and total head-count from the full
/// record set. Pure: recomputed after every mutation rather than patched
/// incrementally, so edited or cleared records can never leave stale counts.
///
/// A respondent who reported zero companion adults still counts as one
/// person: the effective adult count is `max(companion_adults, 1)`.
pub fn summarize<'a, I>(records: I) -> GuestSummary
where
    I: IntoIterator<Item = &'a GuestResponse>,
{
    let mut lines = Vec::new();
    let mut total_headcount = 0u32;

    for record in records {
        if !record.attending {
            continue;
        }

        let companion_children = record.companion_children.max(0) as u32;
        let adjusted_adults = if record.companion_adults > 0 {
            record.companion_adults as u32
        } else {
            1
        };
        let extra_adults = adjusted_adults - 1;

        let mut companions = Vec::new();
        if extra_adults > 0 {
            companions.push(format!("{} adult companion(s)", extra_adults));
        }
        if companion_children > 0 {
            companions.push(format!("{} child companion(s)", companion_children));
        }

        let line = if companions.is_empty() {
            format!("💌 {}", record.name)
        } else {
            format!("💌 {}, with {}", record.name, companions.join(" and "))
        };
        lines.push(line);

        total_headcount += adjusted_adults + companion_children;
    }

    GuestSummary {
        lines,
        total_headcount,
    }
}
