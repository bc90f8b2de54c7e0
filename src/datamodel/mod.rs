pub mod dimension;
pub mod lograph_datetime;
pub mod sample;
pub mod series;
pub mod unit;

pub use dimension::Dimension;
pub use lograph_datetime::{LographDateTime, LographDateTimeExt};
pub use sample::Sample;
pub use series::Series;
pub use unit::Unit;
