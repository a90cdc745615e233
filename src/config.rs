use lazy_static::lazy_static;
use std::env;
use std::fs;

/// Title of the remote spreadsheet holding the inventory. The application is
/// bound to this one document; the first sheet inside it is the store.
pub const SPREADSHEET_TITLE: &str = "loja_dados";

/// Authorization scopes requested for every session, unconditionally:
/// the spreadsheets feed plus drive access (needed to look the document up
/// by title).
pub const SCOPES: [&str; 2] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

/// Process-wide secrets surface.
///
/// The service-account credential is a JSON document issued by the identity
/// provider. It is passed through verbatim; only `credentials` looks inside
/// it. Two sources are checked, in order:
///
/// * `ESTOQUE_SERVICE_ACCOUNT` - the JSON itself, inline
/// * `ESTOQUE_SERVICE_ACCOUNT_FILE` - path to the key file
pub struct Config {
    pub service_account_json: Option<String>,
}

impl Config {
    fn from_env() -> Self {
        let service_account_json = match env::var("ESTOQUE_SERVICE_ACCOUNT") {
            Ok(json) if !json.trim().is_empty() => Some(json),
            _ => env::var("ESTOQUE_SERVICE_ACCOUNT_FILE")
                .ok()
                .and_then(|path| fs::read_to_string(path).ok()),
        };

        Config {
            service_account_json,
        }
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

/// The raw service-account JSON, if the process has one configured.
pub fn service_account_json() -> Option<&'static str> {
    CONFIG.service_account_json.as_deref()
}
