pub mod parser;

pub use parser::{parse_relations, parse_state};
