pub mod loaders;
pub mod outcome;
pub mod record;

pub use loaders::{load_pages, split_page_breaks};
pub use outcome::{KeyResolution, Lookup};
pub use record::{IdentityKey, PageParse, SectionKind, Sections, StudentRecord};
