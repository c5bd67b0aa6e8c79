pub mod aggregate;
pub mod error;
pub mod ids;
pub mod io;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod seed;
pub mod transform;
pub mod validate;

pub use error::{Result, ToolError};
