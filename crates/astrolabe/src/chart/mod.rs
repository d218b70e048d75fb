pub mod assembler;
pub mod data;
pub mod forecast;
pub mod horary;
pub mod input;
pub mod service;
pub mod synastry;
pub mod transit;

pub use assembler::{ChartAssembler, ChartSettings};
pub use data::{round2, AspectEntry, Chart, ChartSummary, HouseMap, NatalSummary};
pub use forecast::{daily_snapshots, DailySnapshot, WeeklyForecast, DAYS_PER_WEEK};
pub use horary::HoraryChart;
pub use input::{parse_date, parse_time, to_universal_time, BirthData, ValidationError};
pub use service::{ChartError, ChartService};
pub use synastry::{synastry_aspects, SynastryAnalytics, SynastryAspect, SynastryReport, SynastrySummary};
pub use transit::{transit_aspects, TransitAspect, TransitReport};
