use serde_json::Value;

use crate::config::{self, SPREADSHEET_TITLE};
use crate::credentials::ServiceAccount;
use crate::error::{Result, SheetError};

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// An authenticated handle to the first sheet of the inventory spreadsheet.
///
/// Sessions are created per operation and dropped when the operation
/// returns; nothing is pooled or reused across load/save calls. There is no
/// release step - the bearer token simply expires.
pub struct SheetSession {
    client: reqwest::Client,
    token: String,
    spreadsheet_id: String,
    sheet_title: String,
}

impl SheetSession {
    /// Establish a session: read the configured credential, exchange it for
    /// a token, resolve the spreadsheet by title through the Drive API and
    /// pick up the title of its first sheet.
    pub async fn connect() -> Result<SheetSession> {
        let json = config::service_account_json().ok_or(SheetError::MissingCredential)?;
        let account = ServiceAccount::try_from_json(json)?;

        let client = reqwest::Client::new();
        let token = account.fetch_access_token(&client).await?.access_token;

        let spreadsheet_id = lookup_spreadsheet_id(&client, &token, SPREADSHEET_TITLE).await?;
        let sheet_title = first_sheet_title(&client, &token, &spreadsheet_id).await?;

        Ok(SheetSession {
            client,
            token,
            spreadsheet_id,
            sheet_title,
        })
    }

    /// Fetch the whole sheet as a 2-D grid of cells, header row first.
    /// An empty sheet comes back as an empty grid.
    pub async fn fetch_grid(&self) -> Result<Vec<Vec<Value>>> {
        let url = format!(
            "{}/{}/values/{}",
            SHEETS_BASE_URL, self.spreadsheet_id, self.sheet_title
        );
        let body = self
            .request(self.client.get(&url).query(&[(
                "valueRenderOption",
                "UNFORMATTED_VALUE",
            )]))
            .await?;

        match body.get("values") {
            Some(Value::Array(rows)) => rows
                .iter()
                .map(|row| match row {
                    Value::Array(cells) => Ok(cells.clone()),
                    other => Err(SheetError::MalformedResponse(format!(
                        "expected a row of cells, got {}",
                        other
                    ))),
                })
                .collect(),
            // The API omits "values" entirely for a blank sheet.
            None => Ok(Vec::new()),
            Some(other) => Err(SheetError::MalformedResponse(format!(
                "expected \"values\" to be an array, got {}",
                other
            ))),
        }
    }

    /// Erase all content in the sheet.
    pub async fn clear(&self) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}:clear",
            SHEETS_BASE_URL, self.spreadsheet_id, self.sheet_title
        );
        self.request(self.client.post(&url).json(&serde_json::json!({})))
            .await?;
        Ok(())
    }

    /// Write `grid` starting at A1 with raw (unparsed) input. Callers put
    /// the header row first; cells go over the wire as-is.
    pub async fn overwrite(&self, grid: &[Vec<Value>]) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}!A1",
            SHEETS_BASE_URL, self.spreadsheet_id, self.sheet_title
        );
        self.request(
            self.client
                .put(&url)
                .query(&[("valueInputOption", "RAW")])
                .json(&serde_json::json!({ "values": grid })),
        )
        .await?;
        Ok(())
    }

    async fn request(&self, builder: reqwest::RequestBuilder) -> Result<Value> {
        let resp = builder.bearer_auth(&self.token).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetError::Api { status, body });
        }

        Ok(resp.json::<Value>().await?)
    }
}

/// Resolve a spreadsheet id from its document title. The title is not
/// addressable through the Sheets API itself, hence the Drive lookup (and
/// the drive scope).
async fn lookup_spreadsheet_id(
    client: &reqwest::Client,
    token: &str,
    title: &str,
) -> Result<String> {
    let query = format!(
        "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false",
        title
    );
    let resp = client
        .get(DRIVE_FILES_URL)
        .query(&[("q", query.as_str()), ("fields", "files(id,name)")])
        .bearer_auth(token)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(SheetError::Api { status, body });
    }

    let body: Value = resp.json().await?;
    body.get("files")
        .and_then(|files| files.get(0))
        .and_then(|file| file.get("id"))
        .and_then(|id| id.as_str())
        .map(|id| id.to_string())
        .ok_or_else(|| SheetError::SpreadsheetNotFound(title.to_string()))
}

/// The title of the document's first sheet, needed to address ranges.
async fn first_sheet_title(
    client: &reqwest::Client,
    token: &str,
    spreadsheet_id: &str,
) -> Result<String> {
    let url = format!("{}/{}", SHEETS_BASE_URL, spreadsheet_id);
    let resp = client
        .get(&url)
        .query(&[("fields", "sheets(properties(title,index))")])
        .bearer_auth(token)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(SheetError::Api { status, body });
    }

    let body: Value = resp.json().await?;
    body.get("sheets")
        .and_then(|sheets| sheets.get(0))
        .and_then(|sheet| sheet.pointer("/properties/title"))
        .and_then(|title| title.as_str())
        .map(|title| title.to_string())
        .ok_or_else(|| SheetError::MalformedResponse("spreadsheet has no sheets".to_string()))
}
