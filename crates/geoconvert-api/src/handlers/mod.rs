mod batch;
mod convert;
mod health;

pub use batch::{handle_batch, handle_preview};
pub use convert::{to_decimal, to_utm};
pub use health::health_check;
