use hr_core::PlotSummary;

/// Progress of the star table through the fetch and build stages.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded(PlotSummary),
    Failed(String),
}

impl LoadStatus {
    /// One-line text for the status bar.
    pub fn label(&self) -> String {
        match self {
            LoadStatus::Idle => String::new(),
            LoadStatus::Loading => "Loading stars…".to_string(),
            LoadStatus::Loaded(s) if s.skipped == 0 => format!("{} stars", s.plotted),
            LoadStatus::Loaded(s) => format!("{} stars ({} rows skipped)", s.plotted, s.skipped),
            LoadStatus::Failed(reason) => format!("Star table unavailable: {reason}"),
        }
    }
}
