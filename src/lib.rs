//! HM reconstruction parameters.
//!
//! Aggregates the workspace crates: [`xml`] (element tree), [`model`] (typed
//! `hm.xsd` records) and the job helpers of `hm-recon`, re-exported at the
//! top level.

pub use hm_recon::*;
