//! Star table loading: CSV parsing, row validation and plotting.

use std::sync::Arc;
use nalgebra::Point3;
use serde::Deserialize;
use crate::axis::AxisConfig;
use crate::color::{color_for, Rgb};
use crate::context::SceneContext;
use crate::error::{LoadError, RowRejection};

const TEMPERATURE: &str = "temperature";
const LUMINOSITY: &str = "luminosity";

/// One untyped table row. Cells are kept as text until validation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawStarRow {
    /// Hipparcos catalog number.
    pub hip: Option<String>,
    pub temperature: Option<String>,
    pub luminosity: Option<String>,
}

/// A validated star.
#[derive(Clone, Debug, PartialEq)]
pub struct StarRecord {
    pub identifier: Option<String>,
    /// Surface temperature, K.
    pub temperature: f64,
    /// Luminosity, L☉.
    pub luminosity: f64,
}

impl StarRecord {
    /// Key/value pairs shown in the info panel.
    /// Keys of [`StarRecord::info_fields`], in display order.
    pub const INFO_KEYS: [&'static str; 3] = ["Star", "Luminosity", "Temperature"];

    pub fn info_fields(&self) -> [(&'static str, String); 3] {
        let star = match &self.identifier {
            Some(id) => format!("HIP{id}"),
            None => "unknown".to_string(),
        };
        let [star_key, luminosity_key, temperature_key] = Self::INFO_KEYS;
        [
            (star_key, star),
            (luminosity_key, format!("{:.4} L_Sun", self.luminosity)),
            // round() is half-away-from-zero; `{:.0}` alone would round half to even
            (temperature_key, format!("{:.0} K", self.temperature.round())),
        ]
    }
}

/// A star placed in the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotPoint {
    pub position: Point3<f64>,
    pub color: Rgb,
    /// Sphere radius in plot units.
    pub radius: f64,
    pub record: Arc<StarRecord>,
}

impl PlotPoint {
    pub fn from_record(record: StarRecord, axis: &AxisConfig) -> Self {
        let p = axis.position_for(record.temperature, record.luminosity);
        Self {
            position: Point3::new(p.x, p.y, 0.0),
            color: color_for(record.temperature),
            radius: axis.size_scale,
            record: Arc::new(record),
        }
    }
}

/// Counts from one build stage run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlotSummary {
    pub plotted: usize,
    pub skipped: usize,
}

/// Parse CSV text with a header row into raw rows.
///
/// Short rows are allowed; their missing cells read as absent. Unknown
/// columns are ignored.
pub fn parse_table(text: &str) -> Result<Vec<RawStarRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    for column in [TEMPERATURE, LUMINOSITY] {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let rows = reader
        .deserialize::<RawStarRow>()
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("Parsed {} star rows", rows.len());
    Ok(rows)
}

fn parse_number(field: &'static str, cell: Option<&str>) -> Result<f64, RowRejection> {
    let raw = cell
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(RowRejection::MissingField(field))?;
    raw.parse::<f64>().map_err(|_| RowRejection::NotNumeric {
        field,
        value: raw.to_string(),
    })
}

/// Check a raw row and convert it to a [`StarRecord`].
pub fn validate_row(row: &RawStarRow, axis: &AxisConfig) -> Result<StarRecord, RowRejection> {
    let luminosity = parse_number(LUMINOSITY, row.luminosity.as_deref())?;
    let temperature = parse_number(TEMPERATURE, row.temperature.as_deref())?;

    if !axis.temperature_in_range(temperature) {
        return Err(RowRejection::OutOfRange { field: TEMPERATURE, value: temperature });
    }
    if !axis.luminosity_in_range(luminosity) {
        return Err(RowRejection::OutOfRange { field: LUMINOSITY, value: luminosity });
    }

    let identifier = row
        .hip
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(StarRecord { identifier, temperature, luminosity })
}

/// Lazily turns raw rows into plot points.
///
/// Each point is registered with the scene context as it is yielded. Rejected
/// rows are logged and skipped. Consumes its rows, so it cannot be restarted.
pub struct StarPlotter<'a, I> {
    rows: I,
    ctx: &'a mut SceneContext,
    skipped: usize,
}

impl<I> StarPlotter<'_, I> {
    /// Rows rejected so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<I: Iterator<Item = RawStarRow>> Iterator for StarPlotter<'_, I> {
    type Item = PlotPoint;

    fn next(&mut self) -> Option<PlotPoint> {
        for row in self.rows.by_ref() {
            match validate_row(&row, self.ctx.axis()) {
                Ok(record) => {
                    let point = PlotPoint::from_record(record, self.ctx.axis());
                    self.ctx.register(point.clone());
                    return Some(point);
                }
                Err(reason) => {
                    self.skipped += 1;
                    log::warn!(
                        "Skipping star {}: {reason}",
                        row.hip.as_deref().unwrap_or("?")
                    );
                }
            }
        }
        None
    }
}

/// Start plotting `rows` into `ctx`.
pub fn plot_stars<R>(rows: R, ctx: &mut SceneContext) -> StarPlotter<'_, R::IntoIter>
where
    R: IntoIterator<Item = RawStarRow>,
{
    StarPlotter {
        rows: rows.into_iter(),
        ctx,
        skipped: 0,
    }
}

/// Build stage: parse a whole table and plot every valid star.
///
/// A table that fails to parse plots nothing.
pub fn load_and_plot(text: &str, ctx: &mut SceneContext) -> Result<PlotSummary, LoadError> {
    let rows = parse_table(text)?;
    let mut plotter = plot_stars(rows, ctx);
    let plotted = plotter.by_ref().count();
    let summary = PlotSummary {
        plotted,
        skipped: plotter.skipped(),
    };
    log::info!("Plotted {} stars ({} skipped)", summary.plotted, summary.skipped);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(hip: &str, temperature: &str, luminosity: &str) -> RawStarRow {
        RawStarRow {
            hip: Some(hip.to_string()),
            temperature: Some(temperature.to_string()),
            luminosity: Some(luminosity.to_string()),
        }
    }

    #[test]
    fn test_rejects_non_numeric_luminosity() {
        let axis = AxisConfig::default();
        let err = validate_row(&row("1", "5000", "N/A"), &axis).unwrap_err();
        assert_eq!(
            err,
            RowRejection::NotNumeric { field: "luminosity", value: "N/A".to_string() }
        );
    }

    #[test]
    fn test_rejects_hot_star() {
        let axis = AxisConfig::default();
        let err = validate_row(&row("2", "15000", "1"), &axis).unwrap_err();
        assert_eq!(err, RowRejection::OutOfRange { field: "temperature", value: 15_000.0 });
    }

    #[test]
    fn test_rejects_missing_and_blank_cells() {
        let axis = AxisConfig::default();
        let missing = RawStarRow { hip: Some("3".into()), temperature: Some("5000".into()), luminosity: None };
        assert_eq!(validate_row(&missing, &axis), Err(RowRejection::MissingField("luminosity")));
        assert_eq!(
            validate_row(&row("3", "  ", "1"), &axis),
            Err(RowRejection::MissingField("temperature"))
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let axis = AxisConfig::default();
        assert!(matches!(
            validate_row(&row("4", "inf", "1"), &axis),
            Err(RowRejection::OutOfRange { field: "temperature", .. })
        ));
        assert!(validate_row(&row("4", "NaN", "1"), &axis).is_err());
    }

    #[test]
    fn test_accepts_sun() {
        let axis = AxisConfig::default();
        let star = validate_row(&row("0", " 5778 ", "1"), &axis).unwrap();
        assert_eq!(star.identifier.as_deref(), Some("0"));
        let point = PlotPoint::from_record(star, &axis);
        assert_relative_eq!(point.position.x, (14_000.0 - 5_778.0) * 0.055 - 300.0, epsilon = 1e-9);
        assert_relative_eq!(point.position.y, 50.0, epsilon = 1e-12);
        assert_eq!(point.position.z, 0.0);
        assert_eq!(point.color, color_for(5_778.0));
        assert_eq!(point.radius, 2.0);
    }

    #[test]
    fn test_plotter_registers_only_valid_rows() {
        let mut ctx = SceneContext::default();
        let rows = vec![
            row("1", "5000", "N/A"),
            row("2", "15000", "1"),
            row("3", "5778", "1"),
            row("4", "3000", "0.01"),
        ];
        let mut plotter = plot_stars(rows, &mut ctx);
        let first = plotter.next().unwrap();
        assert_eq!(first.record.identifier.as_deref(), Some("3"));
        let second = plotter.next().unwrap();
        assert_eq!(second.record.identifier.as_deref(), Some("4"));
        assert!(plotter.next().is_none());
        assert!(plotter.next().is_none());
        assert_eq!(plotter.skipped(), 2);
        assert_eq!(ctx.points().len(), 2);
    }

    #[test]
    fn test_plotter_is_lazy() {
        let mut ctx = SceneContext::default();
        let rows = vec![row("1", "5000", "1"), row("2", "6000", "1")];
        {
            let mut plotter = plot_stars(rows, &mut ctx);
            plotter.next();
        }
        // The second row was never pulled
        assert_eq!(ctx.points().len(), 1);
    }

    #[test]
    fn test_parse_table_with_ragged_rows_and_extra_columns() {
        let text = "hip,temperature,luminosity,vmag\n\
                    1,5778,1,4.83\n\
                    2,3500\n\
                    3, 9000 , 25.5 ,1.2\n";
        let rows = parse_table(text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].luminosity, None);
        assert_eq!(rows[2].temperature.as_deref(), Some("9000"));
    }

    #[test]
    fn test_parse_table_requires_columns() {
        let err = parse_table("hip,temp,luminosity\n1,5000,1\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("temperature")));
        assert!(matches!(parse_table(""), Err(LoadError::MissingColumn(_))));
    }

    #[test]
    fn test_load_and_plot_summary() {
        let text = "hip,temperature,luminosity\n\
                    1,5000,N/A\n\
                    2,15000,1\n\
                    3,5778,1\n\
                    4,,2\n\
                    5,12000,5000\n";
        let mut ctx = SceneContext::default();
        let summary = load_and_plot(text, &mut ctx).unwrap();
        assert_eq!(summary, PlotSummary { plotted: 2, skipped: 3 });
        assert_eq!(ctx.points().len(), 2);
    }

    #[test]
    fn test_load_failure_plots_nothing() {
        let mut ctx = SceneContext::default();
        assert!(load_and_plot("id,value\n1,2\n", &mut ctx).is_err());
        assert!(ctx.points().is_empty());
    }

    #[test]
    fn test_info_fields() {
        let star = StarRecord {
            identifier: Some("32349".to_string()),
            temperature: 9_940.5,
            luminosity: 25.4,
        };
        let fields = star.info_fields();
        assert_eq!(fields[0], ("Star", "HIP32349".to_string()));
        assert_eq!(fields[1], ("Luminosity", "25.4000 L_Sun".to_string()));
        assert_eq!(fields[2], ("Temperature", "9941 K".to_string()));

        let anonymous = StarRecord { identifier: None, ..star };
        assert_eq!(anonymous.info_fields()[0].1, "unknown");
    }

    #[test]
    fn test_info_keys_are_stable_across_records() {
        let sun = StarRecord { identifier: None, temperature: 5_778.0, luminosity: 1.0 };
        let vega = StarRecord {
            identifier: Some("91262".to_string()),
            temperature: 9_602.0,
            luminosity: 40.1,
        };
        for star in [&sun, &vega] {
            let keys: Vec<_> = star.info_fields().iter().map(|(k, _)| *k).collect();
            assert_eq!(keys, StarRecord::INFO_KEYS);
        }
        assert_ne!(sun.info_fields()[2].1, vega.info_fields()[2].1);
    }
}
