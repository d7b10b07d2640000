use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::StringRecord;
use serde::Deserialize;

/// The three historical metrics every team profile must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Possession,
    Shots,
    Efficiency,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Possession, Metric::Shots, Metric::Efficiency];

    pub fn column(self) -> &'static str {
        match self {
            Metric::Possession => "possession",
            Metric::Shots => "shots",
            Metric::Efficiency => "efficiency",
        }
    }
}

/// One team's display name plus its per-match metric history, in match order.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamProfile {
    pub name: String,
    pub possession: Vec<f64>,
    pub shots: Vec<f64>,
    pub efficiency: Vec<f64>,
}

impl TeamProfile {
    pub fn metric(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Possession => &self.possession,
            Metric::Shots => &self.shots,
            Metric::Efficiency => &self.efficiency,
        }
    }

    pub fn matches(&self) -> usize {
        self.possession.len()
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    team: String,
    possession: f64,
    shots: f64,
    efficiency: f64,
}

const NAME_COLUMN: &str = "team";

/// Load a team profile from a CSV file with one row per historical match.
///
/// Required columns: `team, possession, shots, efficiency` (header matching
/// is case- and whitespace-insensitive). A missing column fails here with
/// the column named, rather than being guessed at downstream. The display
/// name comes from the first data row.
pub fn load_team_profile(path: &Path) -> Result<TeamProfile> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open profile csv {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("read header row of {}", path.display()))?;
    let normalized: StringRecord = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    for required in
        std::iter::once(NAME_COLUMN).chain(Metric::ALL.iter().map(|m| m.column()))
    {
        if !normalized.iter().any(|h| h == required) {
            bail!(
                "profile {} is missing required column `{required}`",
                path.display()
            );
        }
    }
    reader.set_headers(normalized);

    let mut profile = TeamProfile {
        name: String::new(),
        possession: Vec::new(),
        shots: Vec::new(),
        efficiency: Vec::new(),
    };

    for (idx, record) in reader.deserialize::<ProfileRow>().enumerate() {
        let row = record.with_context(|| {
            format!("parse data row {} of {}", idx + 1, path.display())
        })?;
        if profile.name.is_empty() {
            profile.name = row.team.trim().to_string();
        }
        profile.possession.push(row.possession);
        profile.shots.push(row.shots);
        profile.efficiency.push(row.efficiency);
    }

    if profile.matches() == 0 {
        bail!("profile {} has no data rows", path.display());
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_accessor_matches_fields() {
        let profile = TeamProfile {
            name: "T".to_string(),
            possession: vec![55.0],
            shots: vec![12.0],
            efficiency: vec![30.0],
        };
        assert_eq!(profile.metric(Metric::Possession), &[55.0]);
        assert_eq!(profile.metric(Metric::Shots), &[12.0]);
        assert_eq!(profile.metric(Metric::Efficiency), &[30.0]);
    }

    #[test]
    fn column_names_cover_all_metrics() {
        let names: Vec<&str> = Metric::ALL.iter().map(|m| m.column()).collect();
        assert_eq!(names, vec!["possession", "shots", "efficiency"]);
    }
}
