pub mod engine;
pub mod outcome;

pub use engine::{classify_packaging, packaging_set};
pub use outcome::{Classification, PackagingEvidence, PackagingSet, Strategy};
