use serde::Serialize;
use serde_json::Value;

/// Fixed-message reply from the not-yet-persisted object endpoints.
#[derive(Debug, Serialize)]
pub struct StubMessage {
    pub message: String,
}

/// Echo returned by `POST /objects` until real persistence lands.
#[derive(Debug, Serialize)]
pub struct CreatedObjectEcho {
    pub message: String,
    #[serde(rename = "Объект")]
    pub object: Value,
}
