pub mod bench;
pub mod compare;
pub mod example;
pub mod generate;
pub mod merge;
pub mod plot;
pub mod serve;
pub mod verify;

/// Seeded when the config carries a seed, otherwise from entropy.
pub fn rng_for(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    }
}
