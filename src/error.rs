use thiserror::Error;

/// Everything that can go wrong between this process and the remote
/// spreadsheet service.
///
/// All internal code propagates these with `?`. The public entry points
/// decide what leaks out: the load path swallows every variant and degrades
/// to an empty table, the save path swallows only the session-establishment
/// variants and lets write failures through.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("no service account credential is configured")]
    MissingCredential,

    #[error("service account credential is malformed: {0}")]
    BadCredential(String),

    #[error("failed to sign token request: {0}")]
    Signing(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("spreadsheet {0:?} not found")]
    SpreadsheetNotFound(String),

    #[error("unexpected api response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
