pub mod error;
pub mod response;
pub mod validated_json;

pub use error::{domain_error_response, ApiError};
pub use response::{ApiResponse, CreatedResponse};
pub use validated_json::ValidatedJson;
