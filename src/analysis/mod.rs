//! Analysis orchestration: the crate's entry point.
//!
//! ```text
//! analyze(company)
//!   └─ CacheStore::get ── hit ──────────────────────────────► (result, HIT)
//!        └─ miss ─► SearchClient ─► ResultNormalizer ─► ScoringEngine
//!                     └─ CacheStore::put ───────────────────► (result, MISS)
//! ```
//!
//! Only fully normalized and scored results enter the cache.

pub mod analyzer;
pub mod error;
pub mod types;


pub use analyzer::{AnalyzerConfig, EsgAnalyzer};
pub use error::{AnalysisError, AnalysisResult};
pub use types::{Analysis, CompanyResult, UserContext};
