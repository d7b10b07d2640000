use rand::SeedableRng;
use rand::rngs::StdRng;

use matchsim_terminal::monte_carlo::{self, InvalidInputError};
use matchsim_terminal::profile::TeamProfile;

fn home_profile() -> TeamProfile {
    TeamProfile {
        name: "Rovers".to_string(),
        possession: vec![55.0, 60.0, 58.0],
        shots: vec![12.0, 14.0, 13.0],
        efficiency: vec![30.0, 32.0, 31.0],
    }
}

fn away_profile() -> TeamProfile {
    TeamProfile {
        name: "Wanderers".to_string(),
        possession: vec![45.0, 40.0, 42.0],
        shots: vec![8.0, 9.0, 8.0],
        efficiency: vec![25.0, 24.0, 26.0],
    }
}

#[test]
fn probabilities_partition_the_trial_set() {
    let mut rng = StdRng::seed_from_u64(11);
    let result =
        monte_carlo::simulate_match(&mut rng, &home_profile(), &away_profile(), 30_000).unwrap();
    let sum = result.p_home + result.p_draw + result.p_away;
    assert!((sum - 100.0).abs() < 1e-6, "sum was {sum}");
}

#[test]
fn materially_stronger_profile_is_favored() {
    // Home xg is roughly 2.3 vs roughly 0.9 for away, so the ordering of
    // the aggregate outputs is stable even though the values are stochastic.
    let mut rng = StdRng::seed_from_u64(12);
    let result =
        monte_carlo::simulate_match(&mut rng, &home_profile(), &away_profile(), 30_000).unwrap();

    assert!(result.p_home > result.p_away);
    assert!(result.mean_home_goals > result.mean_away_goals);
    assert!(result.mean_home_goals >= 0.0);
    assert!(result.mean_away_goals >= 0.0);
}

#[test]
fn constant_history_pins_the_goal_mean() {
    // Zero-variance metric series resample to an exact point mass, so the
    // expected-goals rate is exactly 10 * 0.5 * 0.2 = 1.0 and the observed
    // goal mean should sit tight around it.
    let constant = TeamProfile {
        name: "Metronome".to_string(),
        possession: vec![50.0; 5],
        shots: vec![10.0; 5],
        efficiency: vec![20.0; 5],
    };
    let mut rng = StdRng::seed_from_u64(13);
    let result = monte_carlo::simulate_match(&mut rng, &constant, &constant, 30_000).unwrap();
    assert!((result.mean_home_goals - 1.0).abs() < 0.05);
    assert!((result.mean_away_goals - 1.0).abs() < 0.05);
}

#[test]
fn more_trials_reduce_probability_noise() {
    let home = home_profile();
    let away = away_profile();

    let spread = |trials: usize| {
        let samples: Vec<f64> = (0..30)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(1000 + seed);
                monte_carlo::simulate_match(&mut rng, &home, &away, trials)
                    .unwrap()
                    .p_home
            })
            .collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var =
            samples.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        var.sqrt()
    };

    // Monte Carlo error shrinks like 1/sqrt(trials); 100 -> 100k is a
    // factor of ~30 in expected spread, far beyond run-to-run wobble.
    assert!(spread(100) > spread(100_000));
}

#[test]
fn zero_trials_is_an_invalid_input() {
    let mut rng = StdRng::seed_from_u64(14);
    let err = monte_carlo::simulate_match(&mut rng, &home_profile(), &away_profile(), 0)
        .unwrap_err();
    assert_eq!(err, InvalidInputError::NonPositiveTrials);
}

#[test]
fn empty_metric_series_is_an_invalid_input() {
    let mut broken = home_profile();
    broken.shots.clear();

    let mut rng = StdRng::seed_from_u64(15);
    let err =
        monte_carlo::simulate_match(&mut rng, &broken, &away_profile(), 30_000).unwrap_err();
    assert_eq!(err, InvalidInputError::EmptyObservations);
}
