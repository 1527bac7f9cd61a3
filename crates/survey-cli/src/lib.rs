//! Library side of the `survey` inspection tool.

pub mod load;
pub mod logging;
pub mod render;
