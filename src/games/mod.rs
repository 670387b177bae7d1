//! Small games used to drive the search engine from the command line,
//! the benchmarks and the tests.

mod multiplier_tree;
mod nim;

pub use multiplier_tree::MultiplierNode;
pub use nim::NimNode;
