pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Parsing errors
    #[error("{0}")]
    ParsingError(String),
    // Store errors
    #[error("A response is already stored for this email address")]
    DuplicateEmail,
    #[error("No response is stored for this email address")]
    UnknownEmail,
    // Email client errors
    #[error("Failed to send email: {0}")]
    SendEmailError(reqwest::Error),
    // Payment gateway errors
    #[error("Payment gateway request failed: {0}")]
    PaymentError(reqwest::Error),
    // Export errors
    #[error("Failed to serialize export: {0}")]
    ExportError(#[from] csv::Error),
    // Database errors
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}
