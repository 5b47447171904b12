use crate::error::{Error, Result};

/// Number of additional companions (adults or children) reported
/// alongside a response. Always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanionCount(i32);

impl CompanionCount {
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for CompanionCount {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(Error::ParsingError(
                "Companion count cannot be negative".into(),
            ));
        }
        let value = i32::try_from(value)
            .map_err(|_| Error::ParsingError("Companion count too large".into()))?;
        Ok(Self(value))
    }
}
