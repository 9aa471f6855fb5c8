//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and status mapping.

pub mod drawings;
pub mod layers;
pub mod markups;
pub mod pins;
pub mod storage;
