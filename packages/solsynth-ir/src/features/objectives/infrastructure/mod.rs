mod extractor;

pub use extractor::ObjectiveExtractor;
