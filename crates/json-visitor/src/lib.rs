// Depth-first traversal of decoded JSON trees
// This crate walks one tree, or two trees side by side for structural comparison

mod pair_visit;
mod path;
mod undefined;
mod visit;

pub use pair_visit::{pair_visit, pair_visit_with_path};
pub use path::Path;
pub use undefined::{Slot, Undefined};
pub use visit::{visit, visit_with_path};
