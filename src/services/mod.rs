pub mod header_parser;
pub mod reconciliation;
pub mod section_splitter;
pub mod text_normalizer;

pub use header_parser::{HeaderParse, HeaderParser, SearchScope};
pub use reconciliation::{reconcile, Reconciled, Relocation};
pub use section_splitter::{SectionSplitter, SplitResult};
pub use text_normalizer::normalize_text;
