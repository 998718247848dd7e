pub mod extract;
pub mod flatten;
pub mod reader;
pub mod roster;

pub use extract::{json_path, resolve, Extraction};
pub use flatten::flatten;
pub use reader::read_json_file;
pub use roster::load_identifier_list;
