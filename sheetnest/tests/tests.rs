#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use sheetnest::entities::scaling::{scale_pieces, scale_to_fit, scale_to_fit_factor};
    use sheetnest::entities::{Instance, Piece};
    use sheetnest::geometry::geo_traits::{
        CollidesWith, DistanceTo, Shape, Transformable, TransformableFrom,
    };
    use sheetnest::geometry::primitives::{Point, Rect, Region, SPolygon};
    use sheetnest::geometry::shape_modification::{ShapeModifyMode, offset_region, repair};
    use sheetnest::geometry::union::union_area;
    use sheetnest::geometry::{DTransformation, Transformation};
    use sheetnest::io::ext_repr::{ExtInstance, ExtPiece, ExtSPolygon};
    use sheetnest::io::import::import;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn region(points: &[(f64, f64)]) -> Region {
        let points = points.iter().map(|&(x, y)| Point(x, y)).collect();
        Region::Single(SPolygon::new(points).unwrap())
    }

    fn square(x: f64, y: f64, size: f64) -> Region {
        region(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    const SQUARE: &[(f64, f64)] = &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
    const TRIANGLE: &[(f64, f64)] = &[(0.0, 0.0), (8.0, 0.0), (3.0, 5.0)];
    const L_SHAPE: &[(f64, f64)] = &[
        (0.0, 0.0),
        (6.0, 0.0),
        (6.0, 2.0),
        (2.0, 2.0),
        (2.0, 8.0),
        (0.0, 8.0),
    ];
    const CLOSED_SQUARE: &[(f64, f64)] = &[
        (0.0, 0.0),
        (0.0, 4.0),
        (4.0, 4.0),
        (4.0, 0.0),
        (0.0, 0.0),
    ];
    const BOWTIE: &[(f64, f64)] = &[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)];
    const HOURGLASS: &[(f64, f64)] = &[(0.0, 0.0), (10.0, 0.0), (0.0, 5.0), (10.0, 5.0)];

    #[test_case(SQUARE, 100.0; "square")]
    #[test_case(TRIANGLE, 20.0; "triangle")]
    #[test_case(L_SHAPE, 24.0; "l_shape")]
    #[test_case(CLOSED_SQUARE, 16.0; "closed_square")]
    fn valid_shapes_survive_repair(points: &[(f64, f64)], expected_area: f64) {
        let shape = region(points);
        assert!(shape.is_valid());

        let repaired = repair(&shape).unwrap();
        assert!(repaired.is_valid());
        assert!(approx_eq!(f64, repaired.area(), expected_area, epsilon = 1e-9));
        assert_eq!(repaired.n_vertices(), shape.n_vertices());
    }

    #[test_case(BOWTIE, 50.0; "bowtie")]
    #[test_case(HOURGLASS, 25.0; "hourglass")]
    fn self_crossing_shapes_are_repaired(points: &[(f64, f64)], expected_area: f64) {
        init_logger();
        let shape = region(points);
        assert!(!shape.is_valid());

        let repaired = repair(&shape).unwrap();
        assert!(repaired.is_valid());
        assert!(repaired.area() > 0.0);
        assert!(approx_eq!(f64, repaired.area(), expected_area, epsilon = 1e-6));

        //repairing is idempotent
        let again = repair(&repaired).unwrap();
        assert_eq!(again.parts().len(), repaired.parts().len());
        assert_eq!(again.n_vertices(), repaired.n_vertices());
        assert!(approx_eq!(f64, again.area(), repaired.area(), epsilon = 1e-9));
    }

    #[test]
    fn collinear_outline_has_no_area() {
        let shape = region(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
        assert!(!shape.is_valid());
        assert!(repair(&shape).is_none());
    }

    #[test_case(&[(0.0, 0.0), (1.0, 1.0)]; "two_points")]
    #[test_case(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]; "two_distinct_points_closed")]
    #[test_case(&[(2.0, 2.0), (2.0, 2.0), (2.0, 2.0), (2.0, 2.0)]; "repeated_point")]
    fn too_few_vertices_is_rejected(points: &[(f64, f64)]) {
        let points = points.iter().map(|&(x, y)| Point(x, y)).collect();
        assert!(SPolygon::new(points).is_err());
    }

    #[test]
    fn deflate_shrinks_every_side() {
        let shape = square(0.0, 0.0, 10.0);
        let shrunk = offset_region(&shape, ShapeModifyMode::Deflate, 0.25).unwrap();

        assert!(shrunk.is_valid());
        assert!(approx_eq!(f64, shrunk.area(), 9.5 * 9.5, epsilon = 1e-6));
        let bbox = shrunk.bbox();
        assert!(approx_eq!(f64, bbox.x_min, 0.25, epsilon = 1e-6));
        assert!(approx_eq!(f64, bbox.y_max, 9.75, epsilon = 1e-6));
    }

    #[test]
    fn deflate_can_eliminate_a_shape() {
        let shape = square(0.0, 0.0, 1.0);
        assert!(offset_region(&shape, ShapeModifyMode::Deflate, 2.0).is_err());
    }

    #[test_case(square(20.0, 0.0, 10.0), 10.0; "side_by_side")]
    #[test_case(square(10.0, 0.0, 10.0), 0.0; "touching")]
    #[test_case(square(5.0, 5.0, 10.0), 0.0; "overlapping")]
    #[test_case(square(13.0, 14.0, 2.0), 5.0; "diagonal")]
    fn distance_between_squares(other: Region, expected: f64) {
        let shape = square(0.0, 0.0, 10.0);
        assert!(approx_eq!(f64, shape.distance_to(&other), expected, epsilon = 1e-9));
        assert!(approx_eq!(f64, other.distance_to(&shape), expected, epsilon = 1e-9));
        assert_eq!(shape.collides_with(&other), expected == 0.0);
    }

    #[test]
    fn within_is_boundary_inclusive() {
        let sheet = Rect::try_new(0.0, 0.0, 25.0, 25.0).unwrap();
        assert!(square(0.0, 0.0, 25.0).within(&sheet));
        assert!(square(15.0, 15.0, 10.0).within(&sheet));
        assert!(!square(15.5, 0.0, 10.0).within(&sheet));
        assert!(!square(-0.1, 0.0, 10.0).within(&sheet));
    }

    #[test]
    fn union_area_counts_overlap_once() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 0.0, 10.0);
        let c = square(30.0, 30.0, 2.0);

        assert!(approx_eq!(f64, union_area([&a, &b]), 150.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, union_area([&a, &b, &c]), 154.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, union_area(std::iter::empty()), 0.0));
    }

    #[test]
    fn rotation_around_centroid_keeps_centroid() {
        let shape = region(L_SHAPE);
        let centroid = shape.centroid();

        for angle in [45.0_f64, 90.0, 180.0, 270.0] {
            let t = Transformation::from_rotation_around(angle.to_radians(), centroid);
            let rotated = shape.transform_clone(&t);
            assert!(approx_eq!(f64, rotated.centroid().0, centroid.0, epsilon = 1e-9));
            assert!(approx_eq!(f64, rotated.centroid().1, centroid.1, epsilon = 1e-9));
            assert!(approx_eq!(f64, rotated.area(), shape.area(), epsilon = 1e-9));
        }
    }

    #[test]
    fn decomposed_transformation_reproduces_composite() {
        let shape = region(TRIANGLE);
        let pivot = shape.centroid();
        let t = Transformation::from_rotation_around(90.0_f64.to_radians(), pivot)
            .translate((3.0, 7.0));

        let d_transf = DTransformation::from(&t);
        assert!(approx_eq!(f64, d_transf.rotation(), 90.0, epsilon = 1e-9));

        let expected = shape.transform_clone(&t);
        let from_dt = shape.transform_clone(&d_transf.compose());
        for (a, b) in expected.exterior_points().iter().zip(from_dt.exterior_points()) {
            assert!(approx_eq!(f64, a.0, b.0, epsilon = 1e-9));
            assert!(approx_eq!(f64, a.1, b.1, epsilon = 1e-9));
        }
    }

    #[test]
    fn transform_from_matches_transform_clone() {
        let shape = region(L_SHAPE);
        let mut buffer = shape.clone();
        let t = Transformation::from_rotation(1.0).translate((4.0, -2.0));

        buffer.transform_from(&shape, &t);
        let expected = shape.transform_clone(&t);
        assert_eq!(buffer.exterior_points(), expected.exterior_points());
        assert!(approx_eq!(f64, buffer.bbox().x_min, expected.bbox().x_min));
        assert!(approx_eq!(f64, buffer.area(), expected.area()));
    }

    #[test_case(2.0; "double")]
    #[test_case(0.37; "shrink")]
    fn scaling_back_restores_bbox(k: f64) {
        let pieces = vec![
            Piece::new(0, 10, region(L_SHAPE)),
            Piece::new(1, 11, square(3.0, 4.0, 5.0)),
        ];
        let scaled = scale_pieces(&pieces, k).unwrap();
        let restored = scale_pieces(&scaled, 1.0 / k).unwrap();

        for (p, r) in pieces.iter().zip(restored.iter()) {
            let (a, b) = (p.shape.bbox(), r.shape.bbox());
            assert!(approx_eq!(f64, a.x_min, b.x_min, epsilon = 1e-9));
            assert!(approx_eq!(f64, a.y_min, b.y_min, epsilon = 1e-9));
            assert!(approx_eq!(f64, a.x_max, b.x_max, epsilon = 1e-9));
            assert!(approx_eq!(f64, a.y_max, b.y_max, epsilon = 1e-9));
        }
        assert!(approx_eq!(
            f64,
            scaled[0].shape.area(),
            pieces[0].shape.area() * k * k,
            epsilon = 1e-9
        ));
    }

    #[test]
    fn scale_to_fit_uses_the_tightest_dimension() {
        let pieces = vec![
            Piece::new(0, 0, region(&[(0.0, 0.0), (40.0, 0.0), (40.0, 10.0), (0.0, 10.0)])),
            Piece::new(1, 1, region(&[(0.0, 0.0), (10.0, 0.0), (10.0, 30.0), (0.0, 30.0)])),
        ];
        // usable area 90x60: min(90 / 40, 60 / 30)
        let factor = scale_to_fit_factor(&pieces, 100.0, 70.0, 10.0).unwrap();
        assert!(approx_eq!(f64, factor, 2.0));

        assert!(scale_to_fit_factor(&pieces, 100.0, 70.0, 70.0).is_err());
        assert!(scale_to_fit_factor(&[], 100.0, 70.0, 10.0).is_err());

        let instance = Instance::new("scaled".to_string(), pieces);
        let (scaled, factor) = scale_to_fit(&instance, 100.0, 70.0, 10.0).unwrap();
        assert!(approx_eq!(f64, factor, 2.0));
        for piece in scaled.pieces.iter() {
            let bbox = piece.shape.bbox();
            assert!(bbox.width() <= 90.0 + 1e-9);
            assert!(bbox.height() <= 60.0 + 1e-9);
        }
    }

    #[test]
    fn empty_instance_is_not_scaled() {
        let instance = Instance::new("empty".to_string(), vec![]);
        let (scaled, factor) = scale_to_fit(&instance, 100.0, 70.0, 10.0).unwrap();
        assert_eq!(factor, 1.0);
        assert_eq!(scaled.n_pieces(), 0);
    }

    fn ext_piece(id: u64, points: &[(f64, f64)]) -> ExtPiece {
        ExtPiece {
            id,
            shape: ExtSPolygon(points.to_vec()),
        }
    }

    #[test]
    fn import_skips_degenerate_pieces() {
        init_logger();
        let ext_instance = ExtInstance {
            name: "mixed".to_string(),
            pieces: vec![
                ext_piece(7, SQUARE),
                ext_piece(8, &[(0.0, 0.0), (1.0, 1.0)]),
                ext_piece(9, &[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]),
                ext_piece(12, BOWTIE),
                ext_piece(3, CLOSED_SQUARE),
            ],
        };
        let instance = import(&ext_instance).unwrap();

        assert_eq!(instance.n_pieces(), 3);
        let ext_ids = instance.pieces.iter().map(|p| p.ext_id).collect::<Vec<_>>();
        assert_eq!(ext_ids, vec![7, 12, 3]);
        for (i, piece) in instance.pieces.iter().enumerate() {
            assert_eq!(piece.id, i);
        }
        //the closing point is not stored twice
        assert_eq!(instance.pieces[2].shape.n_vertices(), 4);
    }

    #[test]
    fn import_rejects_duplicate_ids() {
        let ext_instance = ExtInstance {
            name: "duplicates".to_string(),
            pieces: vec![ext_piece(1, SQUARE), ext_piece(1, TRIANGLE)],
        };
        assert!(import(&ext_instance).is_err());
    }

    #[test]
    fn import_rejects_non_finite_coordinates() {
        let ext_instance = ExtInstance {
            name: "nan".to_string(),
            pieces: vec![ext_piece(1, &[(0.0, 0.0), (f64::NAN, 1.0), (1.0, 0.0)])],
        };
        assert!(import(&ext_instance).is_err());
    }
}
