use diamond_core::{
    Error,
    api::BuiltinLoupe,
    config::DiamondConfig,
    dto::{
        cut::{DiamondCutArgs, FacetCut},
        error::ErrorCode,
        loupe::FacetView,
    },
    error::DispatchError,
    exec::calldata,
    ids::{InterfaceId, Selector},
    storage::RegistryError,
};
use diamond_testkit::{Fake, Harness, facet};

#[test]
fn routed_call_sees_full_calldata_and_caller() {
    let h = Harness::new();
    let rec = h.deploy(10, facet::recorder());
    let d = h.diamond().unwrap();
    let sel = Fake::selector(1);
    d.diamond_cut(h.owner, DiamondCutArgs::new(vec![FacetCut::add(rec, vec![sel])]))
        .unwrap();
    let user = Fake::principal(77);
    let input = calldata::encode(sel, b"args");

    d.dispatch(user, &input).unwrap();

    let snap = d.snapshot();
    assert_eq!(snap.slot(facet::RECORD_SLOT), Some(input.as_slice()));
    assert_eq!(
        snap.slot(&format!("{}.caller", facet::RECORD_SLOT)),
        Some(user.as_slice())
    );
}

#[test]
fn successful_calls_commit_state() {
    let h = Harness::new();
    let ctr = h.deploy(10, facet::counter());
    let d = h.diamond().unwrap();
    let sel = Fake::selector(1);
    d.diamond_cut(h.owner, DiamondCutArgs::new(vec![FacetCut::add(ctr, vec![sel])]))
        .unwrap();

    d.dispatch(h.owner, &calldata::encode(sel, &[])).unwrap();
    let out = d.dispatch(h.owner, &calldata::encode(sel, &[])).unwrap();

    assert_eq!(candid::decode_one::<u64>(&out).unwrap(), 2);
}

#[test]
fn reverted_call_leaves_no_trace() {
    let h = Harness::new();
    let bad = h.deploy(10, facet::reverting(b"nope".to_vec()));
    let d = h.diamond().unwrap();
    let sel = Fake::selector(1);
    d.diamond_cut(h.owner, DiamondCutArgs::new(vec![FacetCut::add(bad, vec![sel])]))
        .unwrap();
    let before = d.snapshot();

    let err = d.dispatch(h.owner, &calldata::encode(sel, &[])).unwrap_err();

    assert_eq!(err.revert_payload(), Some(&b"nope"[..]));
    assert_eq!(*d.snapshot(), *before);
}

#[test]
fn unknown_selector_and_short_calldata() {
    let h = Harness::new();
    let d = h.diamond().unwrap();

    let err = d.dispatch(h.owner, &Fake::selector(9).to_bytes()).unwrap_err();
    assert!(matches!(err, Error::Dispatch(DispatchError::FunctionDoesNotExist(_))));
    assert_eq!(err.code(), ErrorCode::NotFound);

    let err = d.dispatch(h.owner, &[0xab]).unwrap_err();
    assert!(matches!(err, Error::Dispatch(DispatchError::MalformedCalldata { len: 1 })));
}

#[test]
fn undeployed_facet_code_is_reported() {
    let h = Harness::new();
    let a = h.deploy(10, facet::echo());
    let d = h.diamond().unwrap();
    let sel = Fake::selector(1);
    d.diamond_cut(h.owner, DiamondCutArgs::new(vec![FacetCut::add(a, vec![sel])]))
        .unwrap();
    assert!(h.host.undeploy(&a));

    let err = d.dispatch(h.owner, &calldata::encode(sel, &[])).unwrap_err();

    assert!(matches!(err, Error::Dispatch(DispatchError::MissingCode(p)) if p == a));
}

#[test]
fn self_hosted_loupe_is_registered_and_served() {
    let h = Harness::new();
    let a = h.deploy(10, facet::echo());
    let config = DiamondConfig::from_toml("[loupe]\nself_hosted = true\n").unwrap();
    let d = h.builder().config(config).build().unwrap();
    let loupe = BuiltinLoupe::selectors();

    assert_eq!(d.facet_function_selectors(&h.id), loupe);
    assert!(d.supports_interface(BuiltinLoupe::interface_id()));
    let records = d.audit_log();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].cuts, vec![FacetCut::add(h.id, loupe.clone())]);

    let sel = Fake::selector(1);
    d.diamond_cut(h.owner, DiamondCutArgs::new(vec![FacetCut::add(a, vec![sel])]))
        .unwrap();

    let facets_sel = Selector::from_signature(BuiltinLoupe::FACETS);
    let out = d
        .dispatch(h.owner, &calldata::encode_args(facets_sel, ()).unwrap())
        .unwrap();
    let views: Vec<FacetView> = candid::decode_one(&out).unwrap();
    assert_eq!(views, d.facets());

    let addr_sel = Selector::from_signature(BuiltinLoupe::FACET_ADDRESS);
    let out = d
        .dispatch(h.owner, &calldata::encode_args(addr_sel, (sel,)).unwrap())
        .unwrap();
    assert_eq!(candid::decode_one::<candid::Principal>(&out).unwrap(), a);

    let iface_sel = Selector::from_signature(BuiltinLoupe::SUPPORTS_INTERFACE);
    let out = d
        .dispatch(
            h.owner,
            &calldata::encode_args(iface_sel, (BuiltinLoupe::interface_id().as_u32(),)).unwrap(),
        )
        .unwrap();
    assert!(candid::decode_one::<bool>(&out).unwrap());
}

#[test]
fn self_hosted_selectors_are_immutable() {
    let h = Harness::new();
    let other = h.deploy(10, facet::noop());
    let config = DiamondConfig::from_toml("[loupe]\nself_hosted = true\n").unwrap();
    let d = h.builder().config(config).build().unwrap();
    let facets_sel = Selector::from_signature(BuiltinLoupe::FACETS);

    let err = d
        .diamond_cut(h.owner, DiamondCutArgs::new(vec![FacetCut::remove(vec![facets_sel])]))
        .unwrap_err();
    assert!(matches!(err, Error::Registry(RegistryError::ImmutableSelector(_))));

    let err = d
        .diamond_cut(
            h.owner,
            DiamondCutArgs::new(vec![FacetCut::replace(other, vec![facets_sel])]),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Registry(RegistryError::ImmutableSelector(_))));
}

#[test]
fn diamond_owned_selector_without_handler_is_unserved() {
    let h = Harness::new();
    let d = h.diamond().unwrap();
    let sel = Fake::selector(5);
    d.diamond_cut(h.owner, DiamondCutArgs::new(vec![FacetCut::add(h.id, vec![sel])]))
        .unwrap();

    let err = d.dispatch(h.owner, &sel.to_bytes()).unwrap_err();

    assert!(matches!(err, Error::Dispatch(DispatchError::UnservedSelector(s)) if s == sel));
    assert!(!d.supports_interface(InterfaceId::new(0)));
}
