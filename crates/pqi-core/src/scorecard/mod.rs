//! Scorecard: data model, builder and renderers (HTML, Markdown, terminal).

pub(crate) mod model;
pub(crate) mod render;
pub(crate) mod source;

pub use model::{MeasuredReport, MergeVerdict, Scorecard};
pub use source::build_scorecard;
