use crate::chart::data::Chart;
use crate::chart::input::BirthData;
use serde::Serialize;

/// A chart cast for the moment a question is asked.
#[derive(Debug, Clone, Serialize)]
pub struct HoraryChart {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// "YYYY-MM-DD HH:MM" local time
    pub question_time: String,
    pub place: String,
    pub chart: Chart,
}

impl HoraryChart {
    pub fn new(question: &BirthData, chart: Chart) -> Self {
        Self {
            kind: "horary",
            question_time: format!("{} {}", question.date, question.time),
            place: question.place.clone(),
            chart,
        }
    }
}
