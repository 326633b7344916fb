pub use category_count::CategoryCount;
pub use diff::Diff;
pub use ewm::{Alpha, ExponentialMovingStats};
pub use passthrough::Passthrough;
pub use window::{SlidingWindow, WindowLen, WindowedAverage, WindowedSum};

mod category_count;
mod diff;
mod ewm;
mod passthrough;
mod window;
