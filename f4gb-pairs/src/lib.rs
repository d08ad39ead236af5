//! Critical pair bookkeeping and selection: the step that turns
//! a queue of `(gen1, gen2)` S-pairs into the reducer and to-be-reduced rows
//! a matrix step is built from.

pub mod pair;
pub mod select;

pub use pair::Pair;
pub use select::select_pairs;
