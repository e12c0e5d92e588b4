//! String utilities: delimiter splitting, trimming, and number parsing
//!
//! Every function works on `&str`; splitting and trimming also have slice
//! forms that work for any element type.

pub mod number;
pub mod split;
pub mod trim;

pub use number::{
    string_to_number, string_to_number_assume_negative, string_to_number_multibase,
    string_to_number_radix, Magnitude, ParsedNumber,
};
pub use split::{for_split, for_split_slice, SplitSignal};
pub use trim::{trim, trim_slice};
