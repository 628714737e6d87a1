//! Result store: accumulated hits, page merging and dismissal.
//!
//! Everything here is a pure function over owned values so each transition
//! can be tested without a plugin runtime.
//!
//! # Modules
//!
//! - `results`: [`ResultState`] and the page [`merge`] policy
//! - `dismiss`: removal of hits by identifier

pub mod dismiss;
pub mod results;

pub use dismiss::dismiss;
pub use results::{merge, ResultState};
