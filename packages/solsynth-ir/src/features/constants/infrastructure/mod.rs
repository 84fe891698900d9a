mod extractor;

pub use extractor::ConstantExtractor;
