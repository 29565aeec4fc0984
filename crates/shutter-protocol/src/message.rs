use serde::{Deserialize, Serialize};
use shutter_types::Photo;

/// Stable fault code vocabulary. Codes are part of the wire contract;
/// messages are free-form.
pub mod fault_codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const DATA_LOSS: &str = "DATA_LOSS";
    pub const FAILED_PRECONDITION: &str = "FAILED_PRECONDITION";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Structured fault payload returned for any failed call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub code: String,
    pub message: String,
}

impl Fault {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub display_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatePhotoRequest {
    pub display_name: String,
}

/// Query parameters of a listing call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListPhotosQuery {
    pub order_by: Option<String>,
    pub page_token: Option<String>,
}

/// One page of a listing. A missing `next_page_token` signals the end of
/// the collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPhotosResponse {
    pub photos: Vec<Photo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Body of a photo-echo stream request: names to look up, in order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamPhotosRequest {
    pub names: Vec<String>,
}

/// One event on the photo-echo stream: a resolved photo or a per-name
/// fault. Serialized as newline-delimited JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoEvent {
    Photo(Photo),
    Fault(Fault),
}
