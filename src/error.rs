use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("OPENAI_API_KEY is not set. Export it or add it to your environment before running flightwx.")]
    MissingApiKey,

    #[error("Access denied: provide valid credentials to continue.")]
    AccessDenied,

    #[error("Fill in all required fields before querying (missing: {})", .missing.join(", "))]
    IncompleteForm { missing: Vec<&'static str> },

    #[error("Invalid time \"{input}\" (expected HH:MM or HHMM)")]
    InvalidTime { input: String },

    #[error("Invalid quarter \"{input}\" (expected Q1, Q2, Q3 or Q4)")]
    InvalidQuarter { input: String },

    #[error("Invalid mode \"{input}\" (expected raw or conservative)")]
    InvalidMode { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("No result to export yet. Run a query first.")]
    NothingToExport,

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub(crate) enum ExportError {
    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    #[error("Spreadsheet encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl From<printpdf::Error> for ExportError {
    fn from(err: printpdf::Error) -> Self {
        ExportError::Pdf(err.to_string())
    }
}
