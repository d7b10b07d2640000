use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::monte_carlo::SimulationResult;

/// Serialize one simulation result into a single-sheet workbook laid out as
/// `Metric | Value` rows, the same shape the rendering side shows on screen.
pub fn write_result_workbook(
    path: &Path,
    home_name: &str,
    away_name: &str,
    result: &SimulationResult,
) -> Result<()> {
    let (mode_home, mode_away) = result.mode_scoreline;
    let rows = vec![
        vec!["Metric".to_string(), "Value".to_string()],
        vec!["Home team".to_string(), home_name.to_string()],
        vec!["Away team".to_string(), away_name.to_string()],
        vec![
            "Home win probability (%)".to_string(),
            format!("{:.2}", result.p_home),
        ],
        vec![
            "Draw probability (%)".to_string(),
            format!("{:.2}", result.p_draw),
        ],
        vec![
            "Away win probability (%)".to_string(),
            format!("{:.2}", result.p_away),
        ],
        vec![
            "Mean home goals".to_string(),
            format!("{:.2}", result.mean_home_goals),
        ],
        vec![
            "Mean away goals".to_string(),
            format!("{:.2}", result.mean_away_goals),
        ],
        vec![
            "Most likely scoreline".to_string(),
            format!("{mode_home} - {mode_away}"),
        ],
        vec![
            "Generated (UTC)".to_string(),
            Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    ];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Simulation")?;
    write_rows(sheet, &rows)?;

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
