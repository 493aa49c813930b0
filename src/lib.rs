//! Renders 100mm × 100mm TEMU logistics labels as PDF, and pulls the label fields
//! out of logistics text pasted from a merchant back-office.
//!
//! ```no_run
//! use temu_label::{extract_fields, FontDir, LabelData, LabelRenderer, OutputPolicy};
//!
//! let mut data = LabelData::with_defaults("建闽店", 1);
//! data.apply(extract_fields("快递东骏物流,13912345678\n货号:8559\n发货数量：12\n收货仓库: 三水仓"));
//!
//! let renderer = LabelRenderer::new(FontDir::new("fonts"), OutputPolicy::new("labels"));
//! let label = renderer.render(data).expect("label is written");
//! println!("{}", label.path.display());
//! ```

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod extract;
pub use extract::*;

mod font;
pub use font::*;

/// Sources of the CJK font family labels are typeset in
pub mod fonts;
pub use fonts::{FontBytes, FontDir, FontSource};

mod info;
pub use info::*;

mod label;
pub use label::*;

/// Output directory and file naming for rendered labels
pub mod output;
pub use output::OutputPolicy;

mod page;
pub use page::*;

/// Print spooler strategies
pub mod print;

mod rect;
pub use rect::*;

pub(crate) mod refs;

/// The label template and its renderer
pub mod render;
pub use render::{LabelRenderer, RenderWarning, RenderedLabel};

mod timestamp;
pub use timestamp::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
