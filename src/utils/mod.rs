pub mod clock;
pub mod request_id;

pub use clock::{Clock, SystemClock};
pub use request_id::{RandomRequestIdGenerator, RequestIdGenerator};
