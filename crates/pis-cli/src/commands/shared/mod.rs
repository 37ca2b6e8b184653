pub mod limit;
pub mod mutation;
pub mod parse;
