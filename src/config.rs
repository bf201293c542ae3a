use std::path::PathBuf;

/// Data file read at startup when no path is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

/// Dashboard settings.  Everything has a fixed default; the only runtime
/// override is an optional positional argument naming the data file.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Labelled marks under the payload sliders.  Display hint only.
    pub payload_ticks: Vec<f64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            window_title: "SpaceX Launch Records Dashboard".to_string(),
            window_size: [1200.0, 860.0],
            min_window_size: [700.0, 500.0],
            payload_ticks: vec![0.0, 2500.0, 5000.0, 7500.0, 10000.0],
        }
    }
}

impl DashboardConfig {
    /// Build the config from process arguments (program name excluded).
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().next() {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = DashboardConfig::default();
        assert_eq!(c.data_path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(c.payload_ticks, vec![0.0, 2500.0, 5000.0, 7500.0, 10000.0]);
    }

    #[test]
    fn test_positional_data_path() {
        let c = DashboardConfig::from_args(vec!["launches.parquet".to_string()]);
        assert_eq!(c.data_path, PathBuf::from("launches.parquet"));
        assert_eq!(DashboardConfig::from_args(Vec::new()), DashboardConfig::default());
    }
}
