//! Example problems implementing the model traits

mod graph_layout;
mod nqueens;

pub use graph_layout::{GraphLayout, LayoutWeights};
pub use nqueens::NQueens;
