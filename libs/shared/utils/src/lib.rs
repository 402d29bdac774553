pub mod image;
pub mod rules;
pub mod test_utils;
