pub mod config;
pub mod error;
pub mod jurisdiction;
pub mod status;
pub mod work;

pub use error::*;
pub use jurisdiction::*;
pub use status::*;
pub use work::*;
