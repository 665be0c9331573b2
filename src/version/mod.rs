//! Version management layer for module version reconciliation
//!
//! This module provides the core functionality for parsing and comparing
//! versions and for fetching published versions from remote registries.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Semver    │◀────│   Channel   │
//! │  (fetch)    │     │  (compare)  │     │  (select)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       ▲
//!        ▼                                       │
//! ┌─────────────┐                         ┌─────────────┐
//! │ Registries  │                         │ReleaseIndex │
//! │(search,crates)                        │  (fetch)    │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`semver`]: `SemanticVersion` with best-effort fallback and max selection
//! - [`channel`]: Release channel selection policy (current > lts)
//! - [`registry`]: Traits for fetching packages and the runtime release index
//! - [`registries`]: Concrete registry implementations
//! - [`error`]: Error types for registry operations
//! - [`types`]: Registry response records like `RegistryPackage`

pub mod channel;
pub mod error;
pub mod registries;
pub mod registry;
pub mod semver;
pub mod types;
