mod fallback;
mod parsing;
mod source;

#[cfg(test)]
pub use fallback::seal;
pub use parsing::OrbitalElementSet;
pub use source::{ElementSource, CELESTRAK_GP_URL};
