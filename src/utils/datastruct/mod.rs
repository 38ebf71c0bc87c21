pub mod matrix;
pub mod vector;

pub use matrix::TermDocMatrix;
pub use vector::IDFVector;
