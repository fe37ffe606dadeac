//! Seeded random cut sequences checked against a plain map model.

use candid::Principal;
use diamond_core::{
    Diamond,
    dto::cut::{DiamondCutArgs, FacetCut, FacetCutAction},
    ids::{Selector, ZERO_ADDRESS},
};
use diamond_testkit::{Fake, Harness, facet};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{RngCore, SeedableRng},
};
use std::collections::{BTreeMap, BTreeSet};

const STEPS: usize = 400;
const SELECTOR_POOL: u32 = 24;

type Model = BTreeMap<Selector, Principal>;

fn pick(rng: &mut ChaCha8Rng, n: usize) -> usize {
    (rng.next_u32() as usize) % n
}

fn random_cut(rng: &mut ChaCha8Rng, facets: &[Principal]) -> FacetCut {
    let action = match pick(rng, 3) {
        0 => FacetCutAction::Add,
        1 => FacetCutAction::Replace,
        _ => FacetCutAction::Remove,
    };
    let len = 1 + pick(rng, 4);
    let selectors = (0..len)
        .map(|_| Fake::selector(rng.next_u32() % SELECTOR_POOL))
        .collect();
    let facet_address = match action {
        FacetCutAction::Remove => ZERO_ADDRESS,
        _ => facets[pick(rng, facets.len())],
    };

    FacetCut {
        facet_address,
        action,
        selectors,
    }
}

// Applies one cut to the model; `None` when the diamond must reject it.
fn model_apply(model: &Model, cut: &FacetCut) -> Option<Model> {
    let mut next = model.clone();

    for sel in &cut.selectors {
        match cut.action {
            FacetCutAction::Add => {
                if next.insert(*sel, cut.facet_address).is_some() {
                    return None;
                }
            }
            FacetCutAction::Replace => match next.get(sel) {
                Some(old) if *old != cut.facet_address => {
                    next.insert(*sel, cut.facet_address);
                }
                _ => return None,
            },
            FacetCutAction::Remove => {
                next.remove(sel)?;
            }
        }
    }

    Some(next)
}

fn assert_matches_model(d: &Diamond, model: &Model) {
    let snap = d.snapshot();
    let registry = snap.registry();

    registry.validate_invariants().unwrap();
    assert_eq!(registry.selector_count(), model.len());

    for (sel, facet) in model {
        assert_eq!(d.facet_address(*sel).unwrap(), *facet);
    }

    let expected: BTreeSet<Principal> = model.values().copied().collect();
    let listed: BTreeSet<Principal> = d.facet_addresses().into_iter().collect();
    assert_eq!(listed, expected);
    assert_eq!(d.facet_addresses().len(), expected.len());

    for view in d.facets() {
        let owned = model.values().filter(|f| **f == view.facet_address).count();
        assert_eq!(view.selectors.len(), owned);
        assert!(!view.selectors.is_empty());
    }
}

fn run(seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let h = Harness::new();
    let facets: Vec<Principal> = (10..14).map(|s| h.deploy(s, facet::noop())).collect();
    let d = h.diamond().unwrap();
    let mut model = Model::new();
    let mut committed = 0;

    for _ in 0..STEPS {
        let cuts: Vec<FacetCut> = (0..1 + pick(&mut rng, 2))
            .map(|_| random_cut(&mut rng, &facets))
            .collect();
        let expected = cuts
            .iter()
            .try_fold(model.clone(), |m, cut| model_apply(&m, cut));
        let before = d.snapshot();

        let result = d.diamond_cut(h.owner, DiamondCutArgs::new(cuts));

        match expected {
            Some(next) => {
                assert!(result.is_ok(), "seed {seed}: expected success, got {result:?}");
                model = next;
                committed += 1;
            }
            None => {
                assert!(result.is_err(), "seed {seed}: expected rejection");
                assert_eq!(*d.snapshot(), *before);
            }
        }

        assert_matches_model(&d, &model);
    }

    assert_eq!(d.audit_log().len(), committed.min(d.config().audit.max_entries));
}

#[test]
fn random_cut_sequences_preserve_registry_invariants() {
    for seed in [1, 7, 42, 1337] {
        run(seed);
    }
}
