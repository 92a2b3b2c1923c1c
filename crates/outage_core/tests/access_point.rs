use outage_core::{FixedActor, Outage, OutageAccessPoint};

// The access point is process-wide, so every scenario lives in one test.
#[test]
fn access_point_is_single_lazy_instance() {
    assert!(OutageAccessPoint::get().is_none());
    assert!(OutageAccessPoint::init("").is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outages.db");
    let first = OutageAccessPoint::init(&path).unwrap();
    let second = OutageAccessPoint::init(&path).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, OutageAccessPoint::get().unwrap()));
    assert_eq!(first.db_path(), path.as_path());

    let err = OutageAccessPoint::init(dir.path().join("other.db")).unwrap_err();
    assert!(err.contains("refusing to switch"));

    let actor = FixedActor(2);
    let id = first
        .with_service(&actor, |service| {
            service.save_outage(&Outage::new(100, 200, "via access point"))
        })
        .unwrap();

    let titles = first
        .with_service(&actor, |service| {
            Ok(service
                .list_outages()?
                .into_iter()
                .map(|outage| outage.title)
                .collect::<Vec<_>>())
        })
        .unwrap();
    assert_eq!(titles, vec!["via access point".to_string()]);

    let loaded = second
        .with_service(&actor, |service| service.get_outage(id))
        .unwrap();
    assert_eq!(loaded.and_then(|outage| outage.created_by), Some(2));
}
