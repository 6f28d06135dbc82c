//! Core types for the word map: raw worksheet rows and the nodes built from them

mod node;
mod row;

pub use node::{Node, NodesResponse};
pub use row::Row;
