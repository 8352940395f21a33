pub mod bands;
pub mod config;
pub mod consts;
pub mod contour;
pub mod error;
pub mod estimator;
pub mod filter;
pub mod filters;
pub mod frame;
pub mod locator;
pub mod preprocess;
pub mod segment;
pub mod target;
pub mod watershed;

pub use config::LocatorConfig;
pub use error::{Result, ReticleError};
pub use filter::TargetShape;
pub use locator::{Deviation, FindOutcome, Locator};
