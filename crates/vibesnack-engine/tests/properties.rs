//! Seeded property checks for the ranking engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vibesnack_core::{
    AcceptCounts, Activity, Catalog, Diet, Distribution, Mood, PriceTier, Snack, SnackId, Tag,
    UserContext,
};
use vibesnack_engine::{apply_boost, explain, RankingEngine, MAX_BOOST};

const ROUNDS: usize = 500;

fn random_context(rng: &mut StdRng) -> UserContext {
    UserContext {
        hour: rng.gen_range(0..=23),
        mood: Mood::ALL[rng.gen_range(0..Mood::ALL.len())],
        hunger: rng.gen_range(1..=5),
        diet: Diet::ALL[rng.gen_range(0..Diet::ALL.len())],
        activity: Activity::ALL[rng.gen_range(0..Activity::ALL.len())],
    }
}

/// Random distribution over the builtin ids plus a few unknown ids.
fn random_scores(rng: &mut StdRng) -> Distribution {
    let ids: Vec<SnackId> = (1..=14).filter(|_| rng.gen_bool(0.7)).collect();
    let raw: Vec<f64> = ids.iter().map(|_| rng.gen_range(0.0..1.0)).collect();
    let sum: f64 = raw.iter().sum::<f64>().max(f64::MIN_POSITIVE);
    ids.into_iter().zip(raw.into_iter().map(|p| p / sum)).collect()
}

fn random_history(rng: &mut StdRng) -> AcceptCounts {
    let mut history = AcceptCounts::new();
    for id in 1..=14 {
        if rng.gen_bool(0.4) {
            history.insert(id, rng.gen_range(0..50));
        }
    }
    history
}

#[test]
fn results_are_bounded_sorted_and_diet_compatible() {
    let mut rng = StdRng::seed_from_u64(7);
    let catalog = Catalog::builtin();
    let engine = RankingEngine::new(&catalog);

    for _ in 0..ROUNDS {
        let ctx = random_context(&mut rng);
        let scores = random_scores(&mut rng);
        let history = random_history(&mut rng);
        let k = rng.gen_range(1..=8);

        let result = engine
            .recommend(&ctx, &scores, &history, k)
            .expect("valid request");

        assert!(result.len() <= k);
        assert!(result
            .windows(2)
            .all(|w| w[0].probability >= w[1].probability));
        for entry in &result {
            let snack = catalog.get(entry.id).expect("only catalog snacks");
            assert!(snack.suits(ctx.diet));
            match ctx.diet {
                Diet::Veg => assert!(!entry.tags.contains(&Tag::NonVeg)),
                Diet::NonVeg => assert!(!entry.tags.contains(&Tag::Veg)),
            }
        }
    }
}

#[test]
fn identical_inputs_give_identical_output() {
    let mut rng = StdRng::seed_from_u64(11);
    let catalog = Catalog::builtin();
    let engine = RankingEngine::new(&catalog);

    for _ in 0..ROUNDS {
        let ctx = random_context(&mut rng);
        let scores = random_scores(&mut rng);
        let history = random_history(&mut rng);
        let first = engine.recommend(&ctx, &scores, &history, 5).expect("first");
        let second = engine.recommend(&ctx, &scores, &history, 5).expect("second");
        assert_eq!(first, second);
    }
}

#[test]
fn boost_stays_within_bounds() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..ROUNDS {
        let scores = random_scores(&mut rng);
        let history = random_history(&mut rng);
        for entry in apply_boost(&scores, &history) {
            let boost = entry.boosted - entry.raw;
            assert!(boost >= 0.0, "negative boost {boost}");
            assert!(boost <= MAX_BOOST + 1e-12, "boost {boost} above cap");
        }
    }
}

#[test]
fn raising_one_count_is_monotone_and_keeps_others_ordered() {
    let mut rng = StdRng::seed_from_u64(17);
    let catalog = Catalog::builtin();
    let engine = RankingEngine::new(&catalog);

    for _ in 0..ROUNDS {
        let scores = random_scores(&mut rng);
        let history = random_history(&mut rng);
        let Some(&target) = scores.keys().next() else {
            continue;
        };

        let mut raised = history.clone();
        *raised.entry(target).or_insert(0) += rng.gen_range(1..20);

        let before = apply_boost(&scores, &history);
        let after = apply_boost(&scores, &raised);
        let boosted = |entries: &[vibesnack_engine::ScoreEntry], id| {
            entries
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.boosted)
                .expect("id present")
        };
        assert!(boosted(&after, target) >= boosted(&before, target));

        let mut ranked_before = before.clone();
        let mut ranked_after = after.clone();
        engine.rank(&mut ranked_before);
        engine.rank(&mut ranked_after);
        // Raising one count grows the total, which shrinks the boost of every
        // other snack with history. Only snacks without history keep a fixed
        // score, so only their relative order is compared.
        let others = |entries: &[vibesnack_engine::ScoreEntry]| -> Vec<SnackId> {
            entries
                .iter()
                .map(|e| e.id)
                .filter(|&id| id != target && !history.contains_key(&id))
                .collect()
        };
        assert_eq!(others(&ranked_before), others(&ranked_after));
    }
}

#[test]
fn explanation_is_never_empty() {
    let mut rng = StdRng::seed_from_u64(19);
    let names = ["Greek Yogurt", "Apple Slices", "Cold Coffee", "Mystery Box"];
    for _ in 0..ROUNDS {
        let ctx = random_context(&mut rng);
        let tags: Vec<Tag> = [
            Tag::Veg,
            Tag::Spicy,
            Tag::Sweet,
            Tag::Savory,
            Tag::Healthy,
            Tag::Quick,
            Tag::Moderate,
        ]
        .into_iter()
        .filter(|_| rng.gen_bool(0.3))
        .collect();
        let price = [PriceTier::Low, PriceTier::Medium, PriceTier::High][rng.gen_range(0..3)];
        let snack = Snack {
            id: 1,
            name: names[rng.gen_range(0..names.len())].to_string(),
            tags,
            price,
            heavy: rng.gen_bool(0.5),
        };
        let text = explain(&ctx, &snack);
        assert!(!text.trim().is_empty());
        assert!(text.ends_with('.') || text.ends_with('!'));
    }
}
