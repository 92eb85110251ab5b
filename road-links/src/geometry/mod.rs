mod segment;
pub use segment::*;
mod angle;
pub use angle::*;
