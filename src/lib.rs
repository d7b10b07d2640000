pub mod export;
pub mod monte_carlo;
pub mod profile;
pub mod state;
