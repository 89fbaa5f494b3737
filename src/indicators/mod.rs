pub mod frame;
pub mod window;

pub mod momentum;
pub mod trend;

pub use frame::*;
pub use window::*;
