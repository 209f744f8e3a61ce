pub mod palette;

use crate::{config::StyleConfig, grid::TpsGrid};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::{error::Error, path::Path};
use thiserror::Error as ThisError;
use tracing::debug;

const MARGIN: u32 = 10;
const X_LABEL_AREA: u32 = 48;
const Y_LABEL_AREA: u32 = 64;
// gradient strip plus its tick labels and axis description
const LEGEND_WIDTH: u32 = 110;
const LEGEND_LABEL_AREA: u32 = 64;
const LEGEND_BANDS: usize = 128;

#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error("Failed to render heatmap: {message}")]
    Draw { message: String },
}

/// canvas size derived from the grid shape, so the image stays tight to its
/// content regardless of how many load levels or message sizes were measured
pub fn canvas_size(columns: usize, rows: usize, style: &StyleConfig) -> (u32, u32) {
    let width =
        2 * MARGIN + Y_LABEL_AREA + columns as u32 * style.cell_width + LEGEND_WIDTH;
    let height = 2 * MARGIN + X_LABEL_AREA + rows as u32 * style.cell_height;

    (width, height)
}

/// render the grid as an annotated heatmap png at `output`
pub fn render(grid: &TpsGrid, style: &StyleConfig, output: &Path) -> Result<(), RenderError> {
    draw(grid, style, output).map_err(|error| RenderError::Draw {
        message: error.to_string(),
    })
}

fn draw(grid: &TpsGrid, style: &StyleConfig, output: &Path) -> Result<(), Box<dyn Error>> {
    let columns = grid.loads.len();
    let rows = grid.lens.len();
    let (width, height) = canvas_size(columns, rows, style);
    let (min, max) = grid.value_range();

    let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (heat_area, legend_area) = root.split_horizontally(width - LEGEND_WIDTH);

    let mut chart = ChartBuilder::on(&heat_area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(
            (0..columns as i32).into_segmented(),
            (0..rows as i32).into_segmented(),
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Load (#threads)")
        .y_desc("Message size (B)")
        .x_labels(columns + 1)
        .y_labels(rows + 1)
        .x_label_formatter(&|segment| axis_label(segment, &grid.loads))
        .y_label_formatter(&|segment| axis_label(segment, &grid.lens))
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 14))
        .draw()?;

    // one filled rectangle per cell, 1px white margin as the cell separator;
    // row 0 (smallest length) sits at the bottom since y grows upwards
    chart.draw_series(grid.cells.iter().enumerate().flat_map(|(row, values)| {
        values.iter().enumerate().map(move |(column, &value)| {
            let color = palette::flare(palette::normalize(value, min, max));
            let mut cell = Rectangle::new(
                [
                    (
                        SegmentValue::Exact(column as i32),
                        SegmentValue::Exact(row as i32),
                    ),
                    (
                        SegmentValue::Exact(column as i32 + 1),
                        SegmentValue::Exact(row as i32 + 1),
                    ),
                ],
                color.filled(),
            );
            cell.set_margin(1, 1, 1, 1);

            cell
        })
    }))?;

    if style.annotate {
        chart.draw_series(grid.cells.iter().enumerate().flat_map(|(row, values)| {
            values.iter().enumerate().map(move |(column, &value)| {
                let normalized = palette::normalize(value, min, max);
                let mut text_style = TextStyle::from(("sans-serif", 15).into_font())
                    .pos(Pos::new(HPos::Center, VPos::Center));
                text_style.color = palette::annotation_color(normalized).to_backend_color();

                Text::new(
                    format!("{value:3.0} K"),
                    (
                        SegmentValue::CenterOf(column as i32),
                        SegmentValue::CenterOf(row as i32),
                    ),
                    text_style,
                )
            })
        }))?;
    }

    draw_legend(&legend_area, min, max)?;

    root.present()?;
    debug!(path = ?output, width, height, "Wrote heatmap");

    Ok(())
}

/// vertical gradient strip with its own value axis on the right
fn draw_legend(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    min: f64,
    max: f64,
) -> Result<(), Box<dyn Error>> {
    // keep the strip aligned with the heatmap's plotting area
    let (low, high) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };

    let mut legend = ChartBuilder::on(area)
        .margin_top(MARGIN)
        .margin_bottom(MARGIN + X_LABEL_AREA)
        .margin_left(MARGIN)
        .set_label_area_size(LabelAreaPosition::Right, LEGEND_LABEL_AREA)
        .build_cartesian_2d(0.0..1.0, low..high)?;

    legend
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_desc("Transactions per second")
        .y_label_formatter(&|value| format!("{} K", *value as i64))
        .axis_desc_style(("sans-serif", 16))
        .label_style(("sans-serif", 13))
        .draw()?;

    let span = high - low;
    legend.draw_series((0..LEGEND_BANDS).map(|band| {
        let from = band as f64 / LEGEND_BANDS as f64;
        let to = (band + 1) as f64 / LEGEND_BANDS as f64;

        Rectangle::new(
            [(0.0, low + from * span), (1.0, low + to * span)],
            palette::flare(from).filled(),
        )
    }))?;

    Ok(())
}

/// tick labels are the sorted axis values, drawn at the segment centers
fn axis_label(segment: &SegmentValue<i32>, values: &[i64]) -> String {
    match segment {
        SegmentValue::CenterOf(index) if (0..values.len() as i32).contains(index) => {
            values[*index as usize].to_string()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod render_test;
