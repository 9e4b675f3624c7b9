//! Crate-wide error types. Hand-rolled `Display`/`Error` impls, matching
//! the rest of the crate's dependency-light style.

use std::fmt;

use crate::store::VehicleId;

/// Errors raised by [`crate::network::Network`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// `add_junction` was given a label already in use.
    DuplicateLabel(String),
    /// A junction or lane label does not exist in the network.
    UnknownLabel {
        junction: String,
        lane: Option<String>,
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLabel(label) => {
                write!(f, "junction label '{label}' is already in use")
            }
            Self::UnknownLabel {
                junction,
                lane: None,
            } => write!(f, "no junction labeled '{junction}'"),
            Self::UnknownLabel {
                junction,
                lane: Some(lane),
            } => write!(f, "junction '{junction}' has no lane '{lane}'"),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Errors raised by [`crate::store::VehicleStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    UnknownVehicle(VehicleId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVehicle(id) => write!(f, "no vehicle with id {id:?}"),
        }
    }
}

impl std::error::Error for StoreError {}
