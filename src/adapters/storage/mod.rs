//! Storage Adapters
//!
//! In-memory implementations of the storage ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryDecisionRepository** - Decisions in a map
//! - **InMemoryAnalysisRepository** - One analysis snapshot per decision
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryAnalysisRepository, InMemoryDecisionRepository};
//!
//! let decisions = Arc::new(InMemoryDecisionRepository::new());
//! let analyses = Arc::new(InMemoryAnalysisRepository::new());
//! ```

mod in_memory_analysis_repository;
mod in_memory_decision_repository;

pub use in_memory_analysis_repository::InMemoryAnalysisRepository;
pub use in_memory_decision_repository::InMemoryDecisionRepository;
