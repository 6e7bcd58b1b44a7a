pub mod dispatcher;
pub mod payload;

pub use dispatcher::{CallbackDispatcher, DeliveryContext};
pub use payload::{AckResponse, CallbackPayload, ResponseMessage, ResponseType};
