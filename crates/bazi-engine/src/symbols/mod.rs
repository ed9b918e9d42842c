pub mod branches;
pub mod elements;
pub mod sexagenary;
pub mod stems;

pub use branches::{Branch, BRANCHES, BRANCH_COUNT};
pub use elements::{Element, ElementRelation, ELEMENT_ORDER};
pub use sexagenary::{Sexagenary, CYCLE_LENGTH};
pub use stems::{Polarity, Stem, STEMS, STEM_COUNT};
