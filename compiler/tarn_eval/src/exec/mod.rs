//! Statement execution helpers the `Interpreter` delegates to.
//!
//! - `foreach`: the loop statement, driven through `LoopDriver`

pub mod foreach;
