#![cfg_attr(docsrs, feature(doc_cfg))]
//! Reconstruction job helpers built on the hm parameter model.
//!
//! Re-exports the model and XML crates and adds what is needed to prepare
//! filtered back-projection jobs from a settings file: overriding folders and
//! calibration files, splitting a slice range into cluster tasks and sweeping
//! the centre of rotation.
//!
//! ```rust,no_run
//! use hm_recon::{plan_chunks, JobOverrides, ReconError, ReconSettings};
//!
//! # fn run() -> Result<(), ReconError> {
//! let mut settings = ReconSettings::load("settings.xml")?;
//! JobOverrides::new()
//!     .sinogram_folder("/dls/i12/data/processing/sino")
//!     .centre(1283.5)
//!     .apply(&mut settings)?;
//! for chunk in plan_chunks(0, 2160, 16)? {
//!     println!("{chunk}");
//! }
//! # Ok(())
//! # }
//! ```

pub use hm_model as model;
pub use hm_xml as xml;

pub mod centre;
pub mod chunks;
pub mod overrides;
pub mod paths;
pub mod settings;

use std::io;
use std::path::PathBuf;

use hm_model::ModelError;
use thiserror::Error;

pub use centre::{centre_label, centre_sweep, write_sweep, CentreTrial};
pub use chunks::{plan_chunks, Chunk, ChunkPlan};
pub use hm_model::{HmDocument, WriteOptions};
pub use overrides::JobOverrides;
pub use settings::ReconSettings;

/// Error type produced by the job helpers.
#[derive(Debug, Error)]
pub enum ReconError {
    /// The parameter document could not be read, written or edited.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Filesystem access failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Slice range and chunk count do not produce a usable plan.
    #[error("cannot split slices {first}..{last} into {chunks} chunks")]
    InvalidChunkPlan { first: i32, last: i32, chunks: u32 },
    /// Centre sweep parameters are out of range.
    #[error("invalid centre sweep: {0}")]
    InvalidSweep(String),
}

impl ReconError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReconError::Io {
            path: path.into(),
            source,
        }
    }
}
