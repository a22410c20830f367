pub mod intent;
pub mod invoice;

pub use intent::*;
pub use invoice::*;
