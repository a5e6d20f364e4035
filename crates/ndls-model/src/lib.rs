pub mod record;
pub mod status;

pub use record::{Replacement, StandardRecord};
pub use status::StandardStatus;
