mod yens;

pub use yens::{run, DEFAULT_K};
