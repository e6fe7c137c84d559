pub mod formatter;

pub use formatter::{render_json, render_text, OutputFormat};
