mod extractor;

pub use extractor::{resolve_type_name, TargetExtractor};
