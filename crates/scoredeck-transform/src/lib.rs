pub mod coerce;
pub mod normalize;
pub mod project;
pub mod table_builder;

pub use coerce::coerce;
pub use project::project;
pub use table_builder::build_table;
