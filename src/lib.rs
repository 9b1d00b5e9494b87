//! solar-page: headless interactivity core for a solar-energy landing page.
//!
//! Four independent widgets attach to a host document: smooth-scroll
//! navigation, a slide carousel with swipe and auto-advance, a one-shot
//! energy-mix pie chart and a solar panel calculator. Hosts provide the
//! document, the repeating timer and the chart renderer through the traits in
//! [`host`] and [`render`].

pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{PageConfig, SolarPage};
pub use error::{PageError, PageResult};
