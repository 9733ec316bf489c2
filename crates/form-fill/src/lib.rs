pub mod compose;
pub mod constants;
pub mod fallback;
mod format;
mod generate;
mod mapping;
mod options;
mod output;
mod record;
pub mod render;
pub mod resolve;
pub mod schema;
mod types;
mod validation;

pub use compose::{DocumentSource, FillOutcome, OutputDocument, fill_template, fill_template_bytes};
pub use fallback::{render_from_scratch, render_from_scratch_async};
pub use format::wrap_line;
pub use generate::*;
pub use mapping::*;
pub use options::*;
pub use output::OutputStore;
pub use record::*;
pub use schema::{FieldSpec, FormSchema, Origin, RenderMode, SchemaFile, SchemaRegistry, StandardFont};
pub use types::*;
pub use validation::missing_required_fields;
