use plotters::prelude::*;
use std::path::PathBuf;
use crate::error::{Result, SweepError};
use crate::eval::RecallMapping;
use super::Reporter;

const X_LABEL: &str = "quantity of dataset returned by ranker";
const Y_LABEL: &str = "probability of true answer occurrence";

fn plot_err<E: std::fmt::Display>(e: E) -> SweepError {
    SweepError::Report(e.to_string())
}

/// Renders recall vs depth fraction as an SVG line plot
pub struct PlotReporter {
    path: PathBuf,
    size: (u32, u32),
    title: String,
}

impl PlotReporter {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size: (800, 600),
            title: title.into(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
}

impl Reporter for PlotReporter {
    fn report(&self, mapping: &RecallMapping) -> Result<()> {
        if mapping.is_empty() {
            return Err(SweepError::Report("nothing to plot".to_string()));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let (x, y) = mapping.series();
        let series: Vec<(f64, f64)> = x.into_iter().zip(y).collect();

        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..1f64, 0f64..1f64)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
            .map_err(plot_err)?;
        chart
            .draw_series(series.iter().map(|&point| Circle::new(point, 3, BLUE.filled())))
            .map_err(plot_err)?;

        root.present().map_err(plot_err)?;

        log::info!("Recall plot written to {}", self.path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "plot"
    }
}
