mod strip;

pub use strip::*;
