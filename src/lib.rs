//! A headless, single-threaded traffic simulation core: parametric lane
//! geometry, a spatially indexed vehicle store, and a priority/wait-aware
//! discrete-time stepper over a directed network of lanes and composite
//! junctions.
//!
//! Rendering, interactive network construction, and the top-level event
//! loop are external collaborators; this crate only exposes the
//! programmatic surface they drive: build a [`network::Network`], seed a
//! [`store::VehicleStore`], and call [`stepper::Stepper::step`] at whatever
//! cadence the caller chooses.

#![warn(clippy::pedantic, clippy::cargo)]
#![allow(clippy::cargo_common_metadata)]
#![allow(
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::expect_used,
    clippy::float_arithmetic,
    clippy::missing_docs_in_private_items,
    clippy::missing_inline_in_public_items,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod error;
pub mod geometry;
pub mod junction;
pub mod network;
pub mod priority;
pub mod store;
pub mod stepper;
