//! Pipeline that publishes the ANS "Rol de Procedimentos" Annex I as a
//! zipped CSV: fetch the listing page, resolve the annex PDF link, download
//! it, extract its tables, normalize them and write the archive.

pub mod cleanup;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod source_scraper;

pub use config::{Config, Legend};
pub use error::PipelineError;
pub use http::{BlockingClient, HttpError, HttpSource};
pub use pipeline::run;
