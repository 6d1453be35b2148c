//! fancy_barchart
//!
//! Grouped, stacked, horizontal bar charts where every category keeps its
//! color pair and every bar name keeps its shading style, across groups and
//! across renders. Pairs with the `fancy-barchart` CLI.
//!
//! ### Features
//! - Nested `group → bar → category → values` datasets, in insertion order
//! - Color pairs from a colormap (`tab20` by default) or blended toward a target
//! - Hatch (alternating) and gradient (interpolated) segment shading
//! - Backend-agnostic drawing instructions, plus SVG/PNG output via plotters
//!
//! ### Example
//! ```no_run
//! use fancy_barchart::{ChartOptions, Dataset};
//!
//! let data = Dataset::new()
//!     .with_values("group 1", "bar 1", "cat 1", [2.0, 3.0, 1.0])
//!     .with_values("group 1", "bar 1", "cat 2", [5.0, 3.0])
//!     .with_values("group 1", "bar 2", "cat 1", [4.0]);
//! let plan = fancy_barchart::viz::render_chart(&data, "chart.svg", 1000, 600, &ChartOptions::default())?;
//! println!("{} segments", plan.layout.segment_count());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod assemble;
pub mod chart;
pub mod color;
pub mod error;
pub mod layout;
pub mod mixing;
pub mod models;
pub mod palettes;
pub mod registry;
pub mod shade;
pub mod storage;
pub mod viz;

pub use assemble::{ChartAssembler, DrawCommand, RecordingBackend, RenderBackend};
pub use chart::{ChartOptions, Plan, draw, instructions, plan, plan_with};
pub use color::{ColorPair, Rgb, Target};
pub use error::{ChartError, Result};
pub use layout::{ChartLayout, StackLayout};
pub use models::Dataset;
pub use registry::{ColorRegistry, ColorSource, PoolPolicy, StyleRegistry};
pub use shade::Style;
