pub mod dispatch;
pub mod phone;
pub mod schema;

pub use dispatch::Dispatcher;
pub use phone::{is_valid_mobile, mask_phone};
pub use schema::{decode_payload, FieldError, SendSmsPayload};

use serde_json::json;
use sms_core::{ApiResponse, HttpStatus};
use tracing::{debug, warn};

pub const ACCEPTED_MESSAGE: &str = "request accepted";
pub const INVALID_MOBILE_MESSAGE: &str = "invalid mobile number";

/// Why a send request was turned away before dispatch.
#[derive(Debug)]
enum RequestError {
    Schema(Vec<FieldError>),
    InvalidMobile(String),
}

/// Framework-agnostic processor that handles the core request logic
#[derive(Clone)]
pub struct SendProcessor {
    dispatcher: Dispatcher,
}

impl SendProcessor {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Validate a `POST /send-sms` body, schedule the send and acknowledge.
    ///
    /// Returns as soon as the dispatch task is spawned; the gateway outcome never
    /// reaches the response.
    pub fn process_send(&self, body: &[u8]) -> ApiResponse {
        match self.process_send_internal(body) {
            Ok(()) => ApiResponse::accepted(ACCEPTED_MESSAGE),
            Err(e) => self.error_to_response(e),
        }
    }

    fn process_send_internal(&self, body: &[u8]) -> Result<(), RequestError> {
        let payload = decode_payload(body).map_err(RequestError::Schema)?;

        if !is_valid_mobile(&payload.phone) {
            return Err(RequestError::InvalidMobile(payload.phone));
        }

        debug!(
            phone = %mask_phone(&payload.phone),
            chars = payload.message.chars().count(),
            "scheduling SMS dispatch"
        );
        // Dropping the handle detaches the task.
        drop(self.dispatcher.dispatch(payload.phone, payload.message));
        Ok(())
    }

    fn error_to_response(&self, error: RequestError) -> ApiResponse {
        match error {
            RequestError::Schema(errors) => {
                warn!(errors = errors.len(), "rejected malformed send request");
                ApiResponse::json(
                    HttpStatus::UnprocessableEntity,
                    &json!({ "detail": errors }),
                )
            }
            RequestError::InvalidMobile(phone) => {
                warn!(phone = %mask_phone(&phone), "rejected invalid mobile number");
                ApiResponse::error(HttpStatus::BadRequest, INVALID_MOBILE_MESSAGE)
            }
        }
    }
}

/// Helper trait for framework adapters to convert responses
pub trait ResponseConverter {
    type ResponseType;

    fn from_api_response(response: ApiResponse) -> Self::ResponseType;
}
