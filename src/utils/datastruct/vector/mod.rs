pub mod idf;

pub use idf::IDFVector;
