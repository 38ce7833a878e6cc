use floracore::prelude::{Period, PERIODS};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

const DEMO_PLANTS: [&str; 8] = [
    "Rosa",
    "Lirio",
    "Clavel",
    "Jacaranda",
    "Ceibo",
    "Lavanda",
    "Girasol",
    "Azahar",
];

/// A synthetic form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSighting {
    pub plant: String,
    pub periods: Vec<Period>,
}

/// Deterministic pseudo-random sightings, 1-4 periods each.
pub fn demo_sightings(count: usize, seed: u64) -> Vec<DemoSighting> {
    let mut rng = StdRng::seed_from_u64(seed);
    let all_periods: Vec<Period> = Period::all().collect();

    (0..count)
        .map(|_| {
            let plant = DEMO_PLANTS
                .choose(&mut rng)
                .copied()
                .unwrap_or(DEMO_PLANTS[0])
                .to_string();
            let amount = rng.gen_range(1..=4).min(PERIODS);
            let mut periods: Vec<Period> = all_periods
                .choose_multiple(&mut rng, amount)
                .copied()
                .collect();
            periods.sort();
            DemoSighting { plant, periods }
        })
        .collect()
}
