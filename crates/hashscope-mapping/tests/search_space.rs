use hashscope_mapping::{Mapping, MappingError, MappingSet};

fn space() -> MappingSet {
    MappingSet::new()
        .with("learning_rate", Mapping::log_limit(1e-4, 1.0).unwrap())
        .with("momentum", Mapping::soft_limit_with_scale(0.0, 1.0, 2.0))
        .with("l2", Mapping::exponential_with_scale(0.5))
        .with("bias", Mapping::identity())
}

#[test]
fn every_raw_candidate_lands_in_range() {
    let space = space();

    // Deterministic walk over a wide band of the real line.
    let mut raw = [0.0_f64; 4];
    for step in 0..500 {
        let t = step as f64;
        raw[0] = (t * 0.37).sin() * 25.0;
        raw[1] = (t * 0.11).cos() * 15.0;
        raw[2] = (t * 0.05).sin() * 40.0;
        raw[3] = t - 250.0;

        let params = space.map(&raw).unwrap();
        assert!(params[0] > 1e-4 && params[0] < 1.0, "lr {}", params[0]);
        assert!(params[1] > 0.0 && params[1] < 1.0, "momentum {}", params[1]);
        assert!(params[2] > 0.0, "l2 {}", params[2]);
        assert_eq!(params[3], raw[3]);
    }
}

#[test]
fn origin_maps_to_centres() {
    let params = space().map(&[0.0; 4]).unwrap();
    assert!((params[0] - 1e-2).abs() < 1e-12);
    assert_eq!(params[1], 0.5);
    assert_eq!(params[2], 1.0);
    assert_eq!(params[3], 0.0);
}

#[test]
fn invalid_bounds_fail_at_construction() {
    assert!(matches!(
        Mapping::log_limit(0.0, 5.0),
        Err(MappingError::InvalidLowerBound { .. })
    ));
    assert!(matches!(
        Mapping::log_limit(-1.0, 5.0),
        Err(MappingError::InvalidLowerBound { .. })
    ));
    assert!(matches!(
        Mapping::log_limit(1.0, 0.0),
        Err(MappingError::InvalidUpperBound { .. })
    ));
}

#[test]
fn mappings_are_shared_across_threads() {
    let mapping = Mapping::soft_limit(-1.0, 1.0);

    let results: Vec<f64> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| s.spawn(move || mapping.apply(i as f64)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results[0], 0.0);
    assert!(results.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn space_roundtrips_through_json() {
    let space = space();
    let json = serde_json::to_string(&space).unwrap();
    let back: MappingSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, space);
}
