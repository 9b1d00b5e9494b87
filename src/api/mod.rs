mod calculator;
mod carousel;
mod energy_chart;
mod navigation;
mod page;
mod page_config;
mod pie_frame_builder;

pub use calculator::{
    CalculatorOutcome, DAYS_PER_MONTH, SolarCalculator, SolarInputs, panels_needed,
};
pub use carousel::{CarouselController, CarouselEvent, normalize_slide_index};
pub use energy_chart::{ChartKind, EnergyChart};
pub use navigation::NavigationHandler;
pub use page::{ChartSnapshot, EventOutcome, PageEvent, PageSnapshot, SolarPage, WidgetKind};
pub use page_config::{
    AnimationOptions, CalculatorConfig, CarouselConfig, ChartOptions, LegendOptions,
    LegendPosition, PAGE_CONFIG_JSON_SCHEMA_V1, PANELS_PLACEHOLDER, PageConfig,
    PageConfigJsonContractV1, PageSelectors, TitleOptions,
};
pub use pie_frame_builder::build_pie_frame;
