use diamond_core::{
    Error,
    config::{AccessMode, DiamondConfig},
    dto::{cut::DiamondCutArgs, cut::FacetCut, error::ErrorCode},
    ids::InterfaceId,
    storage::RegistryError,
};
use diamond_testkit::{Fake, Harness, facet};

#[test]
fn exported_state_restores_registry_flags_and_slots() {
    let h = Harness::new();
    let [a, b] = [10, 11].map(|seed| h.deploy(seed, facet::counter()));
    let d = h.diamond().unwrap();
    d.diamond_cut(
        h.owner,
        DiamondCutArgs::new(vec![
            FacetCut::add(a, Fake::selectors(1..=3)),
            FacetCut::add(b, Fake::selectors(4..=5)),
        ]),
    )
    .unwrap();
    d.diamond_cut(h.owner, DiamondCutArgs::new(vec![FacetCut::remove(Fake::selectors(1..=1))]))
        .unwrap();
    d.set_supports_interface(h.owner, InterfaceId::new(0x5555_5555), true)
        .unwrap();
    d.dispatch(h.owner, &Fake::selector(4).to_bytes()).unwrap();

    let bytes = d.export_state().unwrap();
    let restored = h.builder().restore(bytes).build().unwrap();

    assert_eq!(*restored.snapshot(), *d.snapshot());
    assert_eq!(restored.facets(), d.facets());
    assert!(restored.supports_interface(InterfaceId::new(0x5555_5555)));
    assert!(restored.audit_log().is_empty());
}

#[test]
fn snapshot_of_another_diamond_is_refused() {
    let h = Harness::new();
    let d = h.diamond().unwrap();
    let bytes = d.export_state().unwrap();

    let other = Harness {
        id: Fake::principal(5),
        ..Harness::new()
    };
    let err = other.builder().restore(bytes).build().unwrap_err();

    assert!(matches!(err, Error::Registry(RegistryError::InvariantViolation(_))));
}

#[test]
fn garbage_snapshot_is_a_serialize_error() {
    let h = Harness::new();

    let err = h.builder().restore(vec![0xff, 0x00]).build().unwrap_err();

    assert!(matches!(err, Error::Serialize(_)));
    assert_eq!(err.code(), ErrorCode::Internal);
}

#[test]
fn access_section_selects_the_authority() {
    let h = Harness::new();
    let a = h.deploy(10, facet::noop());
    let toml = format!(
        "[access]\nmode = \"owner\"\nprincipals = [\"{}\"]\n",
        h.owner.to_text()
    );
    let config = DiamondConfig::from_toml(&toml).unwrap();
    assert_eq!(config.access.mode, AccessMode::Owner);

    let host: std::sync::Arc<dyn diamond_core::exec::CodeHost> = h.host.clone();
    let d = diamond_core::Diamond::builder(h.id, host)
        .config(config)
        .build()
        .unwrap();
    let args = || DiamondCutArgs::new(vec![FacetCut::add(a, Fake::selectors(1..=1))]);

    assert!(d.diamond_cut(h.id, args()).is_err());
    d.diamond_cut(h.owner, args()).unwrap();
}

#[test]
fn invalid_config_is_rejected_at_build() {
    let h = Harness::new();
    let mut config = DiamondConfig::default();
    config.audit.max_entries = 0;

    let err = h.builder().config(config).build().unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[test]
fn audit_retention_follows_config() {
    let h = Harness::new();
    let mut config = DiamondConfig::default();
    config.audit.max_entries = 2;
    let d = h.builder().config(config).build().unwrap();

    for _ in 0..3 {
        d.diamond_cut(h.owner, DiamondCutArgs::default()).unwrap();
    }

    let seqs: Vec<u64> = d.audit_log().iter().map(|r| r.sequence).collect();
    assert_eq!(seqs, vec![1, 2]);
}
