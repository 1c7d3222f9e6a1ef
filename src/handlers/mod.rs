pub mod meta;
pub mod search;
