//! # PARALLAX Placement
//!
//! Scatters spherical markers inside a box so that no two of them overlap
//! as seen through a camera. Overlap is judged on the projected 2D
//! footprint, so markers far apart in depth still conflict when they line
//! up on screen.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: The same seed and inputs reproduce the same set
//! 2. **Injected collaborators**: Camera, domain and marker container are
//!    arguments, never global state
//! 3. **Bounded**: A global attempt budget caps conflict resolution
//! 4. **Soft failure**: Running out of budget returns a partial set
//!
//! ## Core Components
//!
//! - `Camera`: world pose + projection, produces `Footprint`s
//! - `overlaps`: 2D circle intersection of two projected markers
//! - `Domain`: the placement box and its uniform sampler
//! - `PlacementEngine`: the sample / test / nudge / commit loop
//! - `MarkerSink`: the container markers are created in and removed from
//!
//! ## Example
//!
//! ```rust,ignore
//! use parallax_placement::{Camera, Domain, PlacementConfig, PlacementEngine, Projection, ScatterSeed};
//! use parallax_shared::Vec3;
//!
//! let projection = Projection::perspective(1.0, 1.0, 0.1, 100.0)?;
//! let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, projection)?;
//! let domain = Domain::new(Vec3::ZERO, Vec3::ONE)?;
//! let engine = PlacementEngine::new(camera, domain, PlacementConfig::default())?;
//!
//! let report = engine.place(&mut ScatterSeed::new(42).rng());
//! println!("placed {} markers ({:?})", report.markers.len(), report.status);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod camera;
pub mod config;
pub mod domain;
pub mod error;
pub mod marker;
pub mod overlap;
pub mod placement;
pub mod seed;

pub use camera::{Camera, Projection, ProjectionError};
pub use config::{CameraConfig, DomainConfig, ScatterConfig};
pub use domain::Domain;
pub use error::{ScatterError, ScatterResult};
pub use marker::{Marker, MarkerCollection, MarkerId, MarkerSink};
pub use overlap::{overlaps, Footprint};
pub use placement::{
    ExhaustionPolicy, PlacementConfig, PlacementEngine, PlacementReport, PlacementStats,
    PlacementStatus,
};
pub use seed::ScatterSeed;
