//! Straightforward serialization of PDF values.
//!
//! No effort is made to minimize the output, values are written with single
//! spaces as delimiters.

pub(crate) mod object;
pub(crate) mod section;

pub use object::indirect::Indirect;

pub struct SimpleEncoder;
