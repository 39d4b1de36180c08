pub mod versions;
pub use versions::*;

pub mod patch;
pub use patch::*;

pub mod prepare;
pub use prepare::*;

pub mod clean;
pub use clean::*;

pub mod common;
