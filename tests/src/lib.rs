#[cfg(test)]
mod tests {
    use click_snap::{SnapConf, SnapError, Snapper, snap};
    use geo_types::{Coord, Line, LineString, Point, coord, line_string, point};
    use rand::rngs::StdRng;
    use rand::*;
    use road_links::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn random_coord(rng: &mut StdRng) -> Coord<f64> {
        Coord {
            x: rng.random_range(-100.0..100.0),
            y: rng.random_range(-100.0..100.0),
        }
    }

    // Small integer grid so equal distances, shared vertices and zero-length segments are common
    fn grid_coord(rng: &mut StdRng) -> Coord<f64> {
        Coord {
            x: rng.random_range(-10..=10i32) as f64,
            y: rng.random_range(-10..=10i32) as f64,
        }
    }

    // 0.1 m grid around a projected (ETRS-TM35FIN-like) origin
    fn map_coord(rng: &mut StdRng) -> Coord<f64> {
        Coord {
            x: 385_000.0 + rng.random_range(-100..=100i32) as f64 * 0.1,
            y: 6_672_000.0 + rng.random_range(-100..=100i32) as f64 * 0.1,
        }
    }

    fn random_map_feature(rng: &mut StdRng, id: Id) -> Feature<LinkAttributes> {
        let len = rng.random_range(0..6);
        Feature::new(
            id,
            LineString::from_iter((0..len).map(|_| map_coord(rng))),
            LinkAttributes::default(),
        )
    }

    fn random_feature(rng: &mut StdRng, id: Id) -> Feature<LinkAttributes> {
        let len = rng.random_range(0..6);
        Feature::new(
            id,
            LineString::from_iter((0..len).map(|_| grid_coord(rng))),
            LinkAttributes {
                road_link_id: Some(id + 1000),
                direction: Direction::from(rng.random_range(0..=2u8)),
                speed_limit: rng.random_bool(0.5).then(|| rng.random_range(20..=120)),
            },
        )
    }

    fn link(id: Id, geom: LineString<f64>) -> Feature<LinkAttributes> {
        Feature::new(id, geom, LinkAttributes::default())
    }

    #[test]
    fn nearest_point_lies_on_segment() {
        let mut rng = rng();
        for _ in 0..1000 {
            let s = Line::new(random_coord(&mut rng), random_coord(&mut rng));
            let q = Point::from(random_coord(&mut rng));
            let t = projection_parameter(&s, q).expect("random segment has length");
            assert!((0.0..=1.0).contains(&t));
            let expected = s.start + s.delta() * t;
            assert_eq!(nearest_point_on_segment(&s, q).0, expected);
            assert!(distance_to_segment(&s, q) >= 0.);
        }
    }

    #[test]
    fn zero_length_segment_always_returns_start() {
        let mut rng = rng();
        for _ in 0..200 {
            let c = random_coord(&mut rng);
            let s = Line::new(c, c);
            let q = Point::from(random_coord(&mut rng));
            assert_eq!(nearest_point_on_segment(&s, q), Point::from(c));
            assert!(distance_to_segment(&s, q) >= 0.);
        }
    }

    #[test]
    fn distance_is_zero_only_on_segment() {
        let mut rng = rng();
        for _ in 0..200 {
            let s = Line::new(random_coord(&mut rng), grid_coord(&mut rng));
            assert_eq!(distance_to_segment(&s, Point::from(s.start)), 0.);
        }
        let s = Line::new(coord! {x: 0., y: 0.}, coord! {x: 8., y: 0.});
        assert_eq!(distance_to_segment(&s, point! {x: 2., y: 0.}), 0.);
        assert!(distance_to_segment(&s, point! {x: 2., y: 1e-9}) > 0.);
        assert!(distance_to_segment(&s, point! {x: -1e-9, y: 0.}) > 0.);
    }

    #[test]
    fn moving_away_perpendicular_never_gets_closer() {
        let mut rng = rng();
        for _ in 0..200 {
            let s = Line::new(random_coord(&mut rng), random_coord(&mut rng));
            let d = s.delta();
            let normal = Coord { x: -d.y, y: d.x };
            let mid = s.start + d * 0.5;
            let distances: Vec<f64> = (0..20)
                .map(|k| distance_to_segment(&s, Point::from(mid + normal * (k as f64 * 0.1))))
                .collect();
            assert!(distances.windows(2).all(|w| w[1] >= w[0] - 1e-9));
        }
    }

    #[test]
    fn segment_scenarios() {
        let s = Line::new(coord! {x: 0., y: 0.}, coord! {x: 10., y: 0.});
        assert_eq!(nearest_point_on_segment(&s, point! {x: 5., y: 5.}), point! {x: 5., y: 0.});
        assert_eq!(distance_to_segment(&s, point! {x: 5., y: 5.}), 5.);
        assert_eq!(nearest_point_on_segment(&s, point! {x: 15., y: 0.}), point! {x: 10., y: 0.});
        assert_eq!(distance_to_segment(&s, point! {x: 15., y: 0.}), 5.);

        let zero = Line::new(coord! {x: 2., y: 2.}, coord! {x: 2., y: 2.});
        assert_eq!(nearest_point_on_segment(&zero, point! {x: 5., y: 6.}), point! {x: 2., y: 2.});
        assert_eq!(distance_to_segment(&zero, point! {x: 5., y: 6.}), 5.);
    }

    #[test]
    fn multi_feature_scenario() {
        let features = [
            link(0xA, line_string![(x: 0., y: 0.), (x: 10., y: 0.)]),
            link(0xB, line_string![(x: 0., y: 5.), (x: 10., y: 5.)]),
        ];
        let nearest = find_nearest_line(&features, point! {x: 5., y: 1.}).expect("segments present");
        assert_eq!(nearest.id, 0xA);
        assert_eq!(nearest.segment, Line::new(coord! {x: 0., y: 0.}, coord! {x: 10., y: 0.}));
    }

    #[test]
    fn single_point_feature_is_never_selected() {
        let features = [
            link(1, line_string![(x: 0., y: 5.), (x: 10., y: 5.)]),
            link(2, line_string![(x: 5., y: 0.)]),
        ];
        let q = point! {x: 5., y: 0.};
        assert_eq!(find_nearest_line(&features, q).map(|n| n.id), Some(1));

        let table: Features<LinkAttributes> = features.into_iter().collect();
        let snapped = snap(&table, q, &SnapConf::default()).expect("one link has a segment");
        assert_eq!(snapped.id, 1);
        assert_eq!(snapped.distance, 5.);
    }

    #[test]
    fn no_segments_is_explicit() {
        let table: Features<LinkAttributes> =
            [link(1, line_string![(x: 1., y: 1.)])].into_iter().collect();
        assert!(table.nearest_line(point! {x: 1., y: 1.}).is_none());
        assert_eq!(
            snap(&table, point! {x: 1., y: 1.}, &SnapConf::default()),
            Err(SnapError::NoCandidates)
        );
    }

    #[test]
    fn index_agrees_with_scan() {
        let mut rng = rng();
        for round in 0..50 {
            let table: Features<LinkAttributes> =
                (0..rng.random_range(0..30)).map(|id| random_feature(&mut rng, id)).collect();
            let index = LinkIndex::from_features(&table);
            for _ in 0..40 {
                let q = Point::from(grid_coord(&mut rng));
                let scanned = table.nearest_segment(q);
                let indexed = index.nearest_segment(q);
                assert_eq!(scanned, indexed, "round {round}, query {q:?}");
            }
        }
    }

    #[test]
    fn snapper_agrees_with_scan() {
        let mut rng = rng();
        let table: Features<LinkAttributes> =
            (0..40).map(|id| random_feature(&mut rng, id)).collect();
        let conf = SnapConf::with_tolerance(3.).expect("valid tolerance");
        let points: Vec<Point<f64>> = (0..300).map(|_| Point::from(grid_coord(&mut rng))).collect();

        let snapper = Snapper::new(table.clone(), conf);
        let batch = snapper.snap_many(&points);
        assert_eq!(batch.len(), points.len());
        for (q, indexed) in points.iter().zip(batch) {
            assert_eq!(indexed, snap(&table, *q, &conf));
        }
    }

    #[test]
    fn within_radius_matches_brute_force() {
        let mut rng = rng();
        let table: Features<LinkAttributes> =
            (0..25).map(|id| random_feature(&mut rng, id)).collect();
        let index = LinkIndex::from_features(&table);
        for _ in 0..50 {
            let q = Point::from(grid_coord(&mut rng));
            let radius = rng.random_range(0..6i32) as f64;
            let expected: Vec<SegmentRef> = table
                .geom
                .iter()
                .enumerate()
                .flat_map(|(feature, geom)| {
                    geom.lines()
                        .enumerate()
                        .filter(move |(_, s)| distance_to_segment(s, q) <= radius)
                        .map(move |(segment, _)| SegmentRef { feature, segment })
                })
                .collect();
            let found: Vec<SegmentRef> = index
                .segments_within(q, radius)
                .iter()
                .map(|h| h.reference)
                .collect();
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn index_agrees_with_scan_at_map_coordinates() {
        let mut rng = rng();
        for round in 0..10 {
            let table: Features<LinkAttributes> =
                (0..30).map(|id| random_map_feature(&mut rng, id)).collect();
            let index = LinkIndex::from_features(&table);
            for _ in 0..1000 {
                let q = Point::from(map_coord(&mut rng));
                let scanned = table.nearest_segment(q);
                let indexed = index.nearest_segment(q);
                assert_eq!(scanned, indexed, "round {round}, query {q:?}");
            }
        }
    }

    #[test]
    fn within_radius_keeps_boundary_at_map_coordinates() {
        let mut rng = rng();
        let table: Features<LinkAttributes> =
            (0..30).map(|id| random_map_feature(&mut rng, id)).collect();
        let index = LinkIndex::from_features(&table);
        let segments: Vec<(SegmentRef, Segment)> = table
            .geom
            .iter()
            .enumerate()
            .flat_map(|(feature, geom)| {
                geom.lines()
                    .enumerate()
                    .map(move |(segment, s)| (SegmentRef { feature, segment }, s))
            })
            .collect();
        assert!(!segments.is_empty());

        for i in 0..5000 {
            let q = Point::from(map_coord(&mut rng));
            let (reference, segment) = segments[i % segments.len()];
            let radius = distance_to_segment(&segment, q);
            let found = index.segments_within(q, radius);
            assert!(
                found.iter().any(|h| h.reference == reference),
                "query {q:?}, radius {radius}"
            );
        }
    }
}
