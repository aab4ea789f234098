//! Data module - CSV loading and processing

mod loader;
mod processor;
mod records;

pub use loader::LoaderError;
pub use processor::DataProcessor;
pub use records::{DailyAverage, LikeObservation, PostTypeAverage};
