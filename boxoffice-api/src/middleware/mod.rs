pub mod gatekeeper;

pub use gatekeeper::{gatekeeper, handle_panic, REQUEST_ID_HEADER, RESPONSE_TIME_HEADER};
