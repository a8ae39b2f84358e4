use billiards::{
    Billiard, BilliardError, BoxSizes, EdgeId, MultiplicityMap, edge_report, edges_on_axis, generate,
    get_multiplicities, is_bouncing, is_corner, is_double,
};

#[test]
fn test_path_length_and_closure() {
    let path = generate::<3>(3, &[2, 3, 4], &[0, 0, 0]).expect("valid input");

    // 2 * lcm(2, 3, 4) + 1 = 25
    assert_eq!(path.len(), 25);
    assert_eq!(path.points()[0], [0, 0, 0]);
    assert_eq!(path.points()[24], [0, 0, 0]);
}

#[test]
fn test_path_stays_inside_box() {
    for (sizes, start) in [([2, 3, 4], [0, 0, 0]), ([15, 9, 7], [2, 0, 0]), ([3, 5, 2], [3, 5, 2]), ([4, 4, 6], [1, 4, 3])] {
        let path = generate::<3>(3, &sizes, &start).expect("valid input");
        let bounds = path.sizes();
        for p in path.iter() {
            assert!(bounds.contains(p), "{:?} escaped box {:?} from {:?}", p, sizes, start);
        }
        assert_eq!(path.points()[0], path.points()[path.period()]);
    }
}

#[test]
fn test_generate_is_pure() {
    let first = generate::<3>(3, &[5, 3, 7], &[1, 2, 3]).expect("valid input");
    let second = generate::<3>(3, &[5, 3, 7], &[1, 2, 3]).expect("valid input");
    assert_eq!(first, second);
}

#[test]
fn test_invalid_inputs() {
    assert!(matches!(generate::<3>(3, &[2, 3], &[0, 0, 0]), Err(BilliardError::LengthMismatch { .. })));
    assert!(matches!(generate::<3>(3, &[2, 3, 4], &[0, 0]), Err(BilliardError::LengthMismatch { .. })));
    assert_eq!(generate::<2>(1, &[2], &[0]), Err(BilliardError::InvalidDimension(1)));
    assert_eq!(generate::<3>(3, &[2, 3, 0], &[0, 0, 0]), Err(BilliardError::ZeroSize { axis: 2 }));
    assert_eq!(
        generate::<3>(3, &[2, 3, 4], &[0, -1, 0]),
        Err(BilliardError::StartOutOfRange { axis: 1, value: -1, size: 3 })
    );
}

#[test]
fn test_unit_cube_doubling() {
    let path = generate::<3>(3, &[1, 1, 1], &[0, 0, 0]).expect("valid input");
    assert!(is_double(path.points()));
    assert!(path.iter().all(|p| is_corner(p, path.sizes())));

    let map = MultiplicityMap::from_path(&path);
    assert!(map.is_double());
    // Raw tally over one period is 1 per point, 2 once corner visits count both ways.
    assert_eq!(map.iter().map(|(_, m)| m).collect::<Vec<_>>(), vec![1, 1]);
}

#[test]
fn test_multiplicity_round_trip() {
    let cases: [([i64; 3], [i64; 3]); 5] = [
        ([2, 3, 4], [0, 0, 0]),
        ([2, 3, 4], [1, 2, 3]),
        ([2, 2, 2], [1, 0, 0]),
        ([3, 4, 5], [0, 1, 2]),
        ([6, 4, 3], [2, 4, 1]),
    ];
    for (sizes, start) in cases {
        let path = generate::<3>(3, &sizes, &start).expect("valid input");
        let map = MultiplicityMap::from_path(&path);
        let factor = if path.is_double() { 2 } else { 1 };
        let corner_visits = if path.is_double() {
            path.one_period().iter().filter(|p| is_corner(p, path.sizes())).count() as u64
        } else {
            0
        };
        assert_eq!(
            map.total_visits() * factor,
            path.period() as u64 + corner_visits,
            "round trip failed for {:?} from {:?}",
            sizes,
            start
        );
        assert!(map.iter().all(|(_, m)| m >= 1));
    }
}

#[test]
fn test_corner_implies_bouncing_on_path() {
    let path = generate::<3>(3, &[4, 6, 3], &[0, 2, 1]).expect("valid input");
    for p in path.iter() {
        if is_corner(p, path.sizes()) {
            assert!(is_bouncing(p, path.sizes()));
        }
    }
    assert_eq!(path.bounce_points().count(), path.iter().filter(|p| is_bouncing(p, path.sizes())).count());
}

#[test]
fn test_two_dimensional_billiard() {
    let billiard = Billiard::new(BoxSizes::new([3, 5]).expect("sizes"), [1, 0]).expect("start");
    let path = billiard.path();
    assert_eq!(path.len(), 31);
    let map = get_multiplicities::<2>(2, &[3, 5], &[1, 0]).expect("valid input");
    assert_eq!(map, MultiplicityMap::from_path(&path));
}

#[test]
fn test_edge_buckets() {
    let path = generate::<3>(3, &[2, 3, 4], &[0, 0, 0]).expect("valid input");
    let report = edges_on_axis(&path, 0).expect("valid axis");

    for edge in EdgeId::ALL {
        let trace = report.get(0, edge).expect("all four edges present");
        let [(j, vj), (k, vk)] = trace.fixed;
        assert_eq!((j, k), (1, 2));
        assert!(vj == 0 || vj == 3);
        assert!(vk == 0 || vk == 4);
        let values: Vec<i64> = trace.values.iter().copied().collect();
        let mut sorted = values.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(values, sorted);
    }

    let full = edge_report(&path);
    assert_eq!(full.len(), 12);
    assert_eq!(full.get(0, EdgeId::NearNear), report.get(0, EdgeId::NearNear));
}
