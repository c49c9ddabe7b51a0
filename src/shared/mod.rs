pub mod geo;
pub mod id;
pub mod time;

pub use geo::*;
pub use id::*;
pub use time::*;
