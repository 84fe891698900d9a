mod extractor;

pub use extractor::DependencyExtractor;
