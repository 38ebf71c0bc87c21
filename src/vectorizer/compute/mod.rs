pub mod compare;
pub mod normalize;

pub use compare::{Compare, DefaultCompare};
pub use normalize::{column_sum_sqrt, NormalizationRow};
