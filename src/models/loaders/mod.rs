pub mod page_loader;

pub use page_loader::{load_pages, parse_toml_pages, split_page_breaks};
