use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, Poisson, StandardNormal};

use crate::profile::{Metric, TeamProfile};

/// Synthetic sample size per metric, shared by both teams in one simulation.
pub const RESAMPLE_SIZE: usize = 20;
pub const DEFAULT_TRIALS: usize = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputError {
    /// A metric series was empty, so mean/std are undefined.
    EmptyObservations,
    /// The requested trial count was zero.
    NonPositiveTrials,
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInputError::EmptyObservations => {
                write!(f, "metric series is empty, mean/std are undefined")
            }
            InvalidInputError::NonPositiveTrials => {
                write!(f, "trial count must be positive")
            }
        }
    }
}

impl std::error::Error for InvalidInputError {}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub p_home: f64,
    pub p_draw: f64,
    pub p_away: f64,
    pub mode_scoreline: (u32, u32),
    pub mean_home_goals: f64,
    pub mean_away_goals: f64,
}

/// Draw `n` samples from a Gaussian fitted to the empirical mean and
/// population std of `observations`.
///
/// This approximates "plausible performance on the day" instead of reusing
/// the raw historical mean directly. A constant series degenerates to a
/// point mass at that constant.
pub fn resample_history<R: Rng + ?Sized>(
    rng: &mut R,
    observations: &[f64],
    n: usize,
) -> Result<Vec<f64>, InvalidInputError> {
    if observations.is_empty() {
        return Err(InvalidInputError::EmptyObservations);
    }

    let mean = mean(observations);
    let std = population_std(observations, mean);

    Ok((0..n)
        .map(|_| {
            let z: f64 = rng.sample(StandardNormal);
            mean + std * z
        })
        .collect())
}

/// Monte Carlo estimate of the outcome of `home` vs `away`.
///
/// Each team's expected-goals rate is derived from resampled possession,
/// shot volume and finishing efficiency, then `trials` independent Poisson
/// goal counts are drawn per team and aggregated.
pub fn simulate_match<R: Rng + ?Sized>(
    rng: &mut R,
    home: &TeamProfile,
    away: &TeamProfile,
    trials: usize,
) -> Result<SimulationResult, InvalidInputError> {
    if trials == 0 {
        return Err(InvalidInputError::NonPositiveTrials);
    }

    let xg_home = expected_goals_for(rng, home)?;
    let xg_away = expected_goals_for(rng, away)?;

    let goals_home = poisson_draws(rng, xg_home, trials);
    let goals_away = poisson_draws(rng, xg_away, trials);

    let mut home_wins = 0usize;
    let mut draws = 0usize;
    let mut away_wins = 0usize;
    for (&h, &a) in goals_home.iter().zip(&goals_away) {
        if h > a {
            home_wins += 1;
        } else if h < a {
            away_wins += 1;
        } else {
            draws += 1;
        }
    }

    let pairs: Vec<(u32, u32)> = goals_home
        .iter()
        .copied()
        .zip(goals_away.iter().copied())
        .collect();

    let pct = |count: usize| count as f64 / trials as f64 * 100.0;

    Ok(SimulationResult {
        p_home: pct(home_wins),
        p_draw: pct(draws),
        p_away: pct(away_wins),
        mode_scoreline: mode_scoreline(&pairs),
        mean_home_goals: mean_u32(&goals_home),
        mean_away_goals: mean_u32(&goals_away),
    })
}

fn expected_goals_for<R: Rng + ?Sized>(
    rng: &mut R,
    team: &TeamProfile,
) -> Result<f64, InvalidInputError> {
    let pos = resampled_mean(rng, team.metric(Metric::Possession))?;
    let shots = resampled_mean(rng, team.metric(Metric::Shots))?;
    let eff = resampled_mean(rng, team.metric(Metric::Efficiency))?;
    Ok(expected_goals(pos, shots, eff))
}

fn resampled_mean<R: Rng + ?Sized>(
    rng: &mut R,
    observations: &[f64],
) -> Result<f64, InvalidInputError> {
    let sample = resample_history(rng, observations, RESAMPLE_SIZE)?;
    Ok(mean(&sample))
}

/// Shots scaled by possession share, then by finishing efficiency.
///
/// Resampled means of a small non-negative history can still dip below
/// zero; the rate is floored at zero so the Poisson stage sees a valid
/// parameter (a zero rate is a point mass at 0 goals).
fn expected_goals(possession: f64, shots: f64, efficiency: f64) -> f64 {
    let shots_rate = shots * (possession / 100.0);
    (shots_rate * (efficiency / 100.0)).max(0.0)
}

fn poisson_draws<R: Rng + ?Sized>(rng: &mut R, lambda: f64, trials: usize) -> Vec<u32> {
    if lambda <= 0.0 {
        return vec![0; trials];
    }
    // Infallible: lambda is finite and strictly positive here.
    let dist = Poisson::new(lambda).expect("positive finite lambda");
    (0..trials).map(|_| dist.sample(rng) as u32).collect()
}

/// Most frequent scoreline. On a frequency tie the pair whose first
/// occurrence comes earliest in trial order wins, matching a stable
/// counting structure rather than any numeric ordering of the pairs.
fn mode_scoreline(pairs: &[(u32, u32)]) -> (u32, u32) {
    let mut counts: HashMap<(u32, u32), u32> = HashMap::new();
    for &pair in pairs {
        *counts.entry(pair).or_insert(0) += 1;
    }

    let mut best_pair = (0, 0);
    let mut best_count = 0u32;
    for &pair in pairs {
        let count = counts[&pair];
        if count > best_count {
            best_count = count;
            best_pair = pair;
        }
    }
    best_pair
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn mean_u32(values: &[u32]) -> f64 {
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
