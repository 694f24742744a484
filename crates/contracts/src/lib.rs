//! Wire contracts shared by the catalog admin frontend.
//!
//! - `domain`: one module per catalog aggregate plus the common envelope,
//!   change-detection and process-type plumbing
//! - `shared`: pure helpers (identifier derivation)
//! - `system`: authentication DTOs

pub mod domain;
pub mod shared;
pub mod system;
