#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/testdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # Example
//!
//! ```rust,ignore
//! use std::path::Path;
//! use testdata_doc::{FontSource, PdfRenderer, deal_memo, write_document};
//!
//! let renderer = PdfRenderer::new(FontSource::discover()?);
//! let bytes = write_document(
//!     &renderer,
//!     &deal_memo(),
//!     Path::new("test-data/sample-deal-memo.pdf"),
//! )?;
//! println!("{bytes} bytes");
//! ```

mod block;
pub use block::{Block, Document, INCH};

mod error;
pub use error::DocError;

mod font;
pub use font::{FAMILIES, FontSource, SEARCH_DIRS};

mod memo;
pub use memo::deal_memo;

mod render;
pub use render::{BULLET, PdfRenderer, Renderer, page_count, write_document};

mod style;
pub use style::{Align, PageGeometry, Rgb, Style, Stylesheet};
