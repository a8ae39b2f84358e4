//! # billiards
//!
//! `billiards` simulates a ball bouncing with unit diagonal velocity inside an
//! axis-aligned box of integer side lengths, in 2 or 3 dimensions. It is meant to
//! be used in Rust as well as compiled to WebAssembly (WASM) for a renderer.
//!
//! ## Features
//!
//! - **Trajectories**: The discrete walk over one full period of `2 * lcm(sides)` steps.
//! - **Classification**: Corner and bounce predicates, face contacts and face projections.
//! - **Multiplicities**: Visit counts per lattice point, corrected for retracing orbits.
//! - **Edges**: Which coordinates are visited on each of the twelve edges of a 3D box.
//! - **Statistics**: Parallel multiplicity histograms over all start points and box shapes.
//!
//! ## Example
//!
//! See the `demos/` directory for printing trajectories and statistics.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Billiard`] struct, a validated box and start point.

mod bounds;
mod classify;
mod config;
mod edges;
mod error;
mod multiplicity;
mod path;
mod projection;
mod report;
mod retrace;
mod stats;
pub mod wasm;

pub use bounds::Billiard;
pub use bounds::BoxSizes;
pub use bounds::Direction;
pub use bounds::Face;
pub use bounds::LatticePoints;
pub use bounds::MAX_PERIOD;
pub use bounds::Point;
pub use bounds::box_side;
pub use bounds::BOX_ID_LEFT;
pub use bounds::BOX_ID_RIGHT;
pub use bounds::BOX_ID_FRONT;
pub use bounds::BOX_ID_BACK;
pub use bounds::BOX_ID_BOTTOM;
pub use bounds::BOX_ID_TOP;
pub use classify::contact_faces;
pub use classify::is_bouncing;
pub use classify::is_corner;
pub use config::BilliardConfig;
pub use config::PictureMode;
pub use config::StatsConfig;
pub use edges::EdgeEntry;
pub use edges::EdgeId;
pub use edges::EdgeReport;
pub use edges::EdgeTrace;
pub use edges::edge_report;
pub use edges::edges_on_axis;
pub use edges::other_axes;
pub use error::BilliardError;
pub use error::Result;
pub use multiplicity::MultiplicityEntry;
pub use multiplicity::MultiplicityMap;
pub use multiplicity::get_multiplicities;
pub use path::Path;
pub use path::gcd;
pub use path::generate;
pub use path::lcm;
pub use path::lcm_all;
pub use projection::face_billiard;
pub use projection::face_bounce_points;
pub use projection::net;
pub use report::HistogramReport;
pub use report::HistogramScope;
pub use report::MultiplicityReport;
pub use retrace::is_double;
pub use retrace::turning_times;
pub use stats::CancelToken;
pub use stats::HISTOGRAM_BUCKETS;
pub use stats::MultiplicityHistogram;
pub use stats::StatsAggregator;
pub use stats::accumulate;
pub use stats::shape_count;
pub use stats::single;
pub use stats::sweep;
