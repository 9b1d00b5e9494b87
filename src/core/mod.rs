pub mod energy_mix;
pub mod primitives;
pub mod selector;
pub mod types;

pub use energy_mix::{EnergyMix, EnergyShare};
pub use primitives::{decimal_to_f64, parse_leading_float};
pub use selector::Selector;
pub use types::Viewport;
