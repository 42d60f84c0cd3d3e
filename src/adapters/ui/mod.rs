//! Console UI. Startup banner only; the authoring UI is a separate web client.

pub mod banner;

pub use banner::{BannerInfo, print_welcome};
