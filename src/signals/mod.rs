//! Universe selection and signal detection.

pub mod detector;
pub mod engine;
pub mod merger;
pub mod universe;

pub use detector::*;
pub use engine::*;
pub use merger::*;
pub use universe::*;
