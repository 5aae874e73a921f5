pub mod entities;
pub mod error;
pub mod scales;
pub mod stats;
mod util;

pub use entities::*;
pub use error::{Error, Result};
pub use scales::*;
pub use stats::*;
pub use util::*;
