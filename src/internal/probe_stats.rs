#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::indexing_slicing)]

use elastic_map::{ElasticConfig, ElasticMap, ElasticMapError};
use plotters::prelude::*;
use rand::Rng;
use std::error::Error;

// Fixed slot count; growth is disabled so every run probes the same table size
const TABLE_SIZE: usize = 1 << 14;
// Load factors from 0.1 to 0.95
const NUM_LOAD_FACTORS: usize = 10;
// Attempts per level to compare
const PROBE_LIMITS: [usize; 3] = [1, 5, 15];

/// Measurements for one probe limit, one point per load factor
struct Series {
    probe_limit: usize,
    average_probes: Vec<(f64, f64)>,
    worst_probes: Vec<(f64, f64)>,
    failure_rate: Vec<(f64, f64)>,
}

/// Outcome of filling one table
struct FillResult {
    average_probes: f64,
    worst_probes: usize,
    failure_rate: f64,
}

// Inserts `keys` into a fresh table and measures lookup probe lengths of the keys that landed
fn fill_table(keys: &[u64], probe_limit: usize) -> Result<FillResult, ElasticMapError> {
    let config = ElasticConfig::new()
        .with_capacity(TABLE_SIZE)
        .with_load_factor(1.0)
        .with_probe_limit(probe_limit);
    let mut map = ElasticMap::try_with_config(config)?;

    let mut failures = 0_usize;
    for &key in keys {
        match map.insert(key, ()) {
            Ok(_) => {}
            Err(ElasticMapError::InsertionCapacityExceeded { .. }) => failures += 1,
            Err(err) => return Err(err),
        }
    }

    let probes: Vec<usize> = keys.iter().filter_map(|key| map.probe_length(key)).collect();
    let average_probes = if probes.is_empty() {
        0.0
    } else {
        probes.iter().sum::<usize>() as f64 / probes.len() as f64
    };

    Ok(FillResult {
        average_probes,
        worst_probes: probes.iter().copied().max().unwrap_or(0),
        failure_rate: failures as f64 / keys.len().max(1) as f64,
    })
}

// Draws one line per probe limit against the load factor
fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    lines: &[(String, &[(f64, f64)])],
) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];

    let max_y = lines
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(_, y)| y))
        .fold(0.0_f64, f64::max)
        .max(1.0) *
        1.1; // Add 10% margin

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (idx, (label, points)) in lines.iter().enumerate() {
        let color = &colors[idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(points.iter().map(|&point| Circle::new(point, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    println!("Table size: {TABLE_SIZE}");
    println!("Load factors: {load_factors:?}");

    // Same keys for every probe limit so the runs are comparable
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..TABLE_SIZE).map(|_| rng.random()).collect();

    let mut all_series = Vec::with_capacity(PROBE_LIMITS.len());
    for probe_limit in PROBE_LIMITS {
        let mut series = Series {
            probe_limit,
            average_probes: Vec::with_capacity(NUM_LOAD_FACTORS),
            worst_probes: Vec::with_capacity(NUM_LOAD_FACTORS),
            failure_rate: Vec::with_capacity(NUM_LOAD_FACTORS),
        };

        for &load in &load_factors {
            let n_keys = (TABLE_SIZE as f64 * load) as usize;
            let result = fill_table(&keys[..n_keys], probe_limit)?;

            println!(
                "  probe limit {probe_limit}, load {load:.2}: avg probes = {:.2}, worst = {}, failed inserts = {:.2}%",
                result.average_probes,
                result.worst_probes,
                result.failure_rate * 100.0
            );

            series.average_probes.push((load, result.average_probes));
            series.worst_probes.push((load, result.worst_probes as f64));
            series.failure_rate.push((load, result.failure_rate * 100.0));
        }

        all_series.push(series);
    }

    let label = |series: &Series| format!("probe limit {}", series.probe_limit);

    let lines: Vec<(String, &[(f64, f64)])> =
        all_series.iter().map(|s| (label(s), s.average_probes.as_slice())).collect();
    draw_chart(
        "average_probe_length.png",
        "Elastic Probing: Average Lookup Probe Length",
        "Average Probes per Lookup",
        &lines,
    )?;

    let lines: Vec<(String, &[(f64, f64)])> =
        all_series.iter().map(|s| (label(s), s.worst_probes.as_slice())).collect();
    draw_chart(
        "worst_case_probes.png",
        "Elastic Probing: Worst-Case Lookup Probe Length",
        "Worst-Case Probes",
        &lines,
    )?;

    let lines: Vec<(String, &[(f64, f64)])> =
        all_series.iter().map(|s| (label(s), s.failure_rate.as_slice())).collect();
    draw_chart(
        "failed_inserts.png",
        "Elastic Probing: Inserts Rejected with Capacity Exceeded",
        "Failed Inserts (%)",
        &lines,
    )?;

    println!(
        "Generated plot images: average_probe_length.png, worst_case_probes.png, failed_inserts.png"
    );

    Ok(())
}
