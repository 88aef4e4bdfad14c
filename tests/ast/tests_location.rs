//! Location utilities

#![allow(clippy::unwrap_used)]

use astkit::Location;
use astkit::ast::{
    Node, Value, copy_location, fix_missing_locations, get_source_segment, increment_lineno, walk,
};
use rstest::rstest;

use crate::helpers::nodes::{Expr, Num, located_num, num, program};
use crate::helpers::source_fixtures::SEGMENT_SOURCE;

fn located(location: Location) -> Num {
    let mut node = Num::new(1);
    *node.location_mut() = location;
    node
}

fn locations(root: &dyn Node) -> Vec<Location> {
    walk(root).map(|node| *node.location()).collect()
}

// ============================================================================
// get_source_segment
// ============================================================================

#[rstest]
#[case::single_char(Location::new(1, 1, 1, 1), false, Some("b"))]
#[case::whole_line(Location::new(2, 0, 2, 2), false, Some("def"))]
#[case::end_column_past_line(Location::new(1, 1, 1, 40), false, Some("bc"))]
#[case::two_lines(Location::new(1, 1, 2, 1), false, Some("bc\nde"))]
#[case::two_lines_inclusive_end(Location::new(1, 1, 2, 2), false, Some("bc\ndef"))]
#[case::padded(Location::new(1, 1, 2, 1), true, Some("abc\nde"))]
#[case::past_last_line(Location::new(3, 0, 3, 0), false, None)]
#[case::trailing_line_does_not_count(Location::new(2, 0, 3, 0), false, None)]
fn test_get_source_segment(
    #[case] location: Location,
    #[case] padded: bool,
    #[case] expected: Option<&str>,
) {
    let node = located(location);
    assert_eq!(
        get_source_segment(SEGMENT_SOURCE, &node, padded).as_deref(),
        expected
    );
}

#[rstest]
#[case::lineno(Location { lineno: None, ..Location::new(1, 0, 1, 1) })]
#[case::col_offset(Location { col_offset: None, ..Location::new(1, 0, 1, 1) })]
#[case::end_lineno(Location { end_lineno: None, ..Location::new(1, 0, 1, 1) })]
#[case::end_col_offset(Location { end_col_offset: None, ..Location::new(1, 0, 1, 1) })]
fn test_get_source_segment_requires_every_coordinate(#[case] location: Location) {
    assert_eq!(get_source_segment(SEGMENT_SOURCE, &located(location), false), None);
}

#[test]
fn test_get_source_segment_counts_characters() {
    let source = "λx → y\n";
    let node = located(Location::new(1, 1, 1, 3));
    assert_eq!(get_source_segment(source, &node, false).as_deref(), Some("x →"));
}

// ============================================================================
// copy_location
// ============================================================================

#[test]
fn test_copy_location_copies_all_coordinates() {
    let source = located(Location::new(3, 4, 5, 6));
    let mut target = Num::new(2);

    copy_location(&source, &mut target);
    assert_eq!(*target.location(), Location::new(3, 4, 5, 6));
}

#[test]
fn test_copy_location_propagates_unset_coordinates() {
    let source = located(Location {
        end_col_offset: None,
        ..Location::new(3, 4, 5, 6)
    });
    let mut target = located(Location::new(1, 1, 1, 1));

    let copied = *copy_location(&source, &mut target).location();
    assert_eq!(copied.end_col_offset, None);
    assert_eq!(copied.lineno, Some(3));
}

// ============================================================================
// fix_missing_locations
// ============================================================================

#[test]
fn test_fix_missing_locations_starts_at_defaults() {
    let mut root = program::new(vec![Value::node(Expr::new(1, num(1)))]);
    fix_missing_locations(&mut root);

    assert!(
        locations(&root)
            .iter()
            .all(|location| *location == Location::new(1, 0, 1, 0))
    );
}

#[test]
fn test_fix_missing_locations_inherits_from_parent() {
    let mut parent = Expr::new(1, num(1));
    *parent.location_mut() = Location {
        lineno: Some(5),
        end_lineno: Some(7),
        ..Location::unset()
    };
    let mut root = program::new(vec![Value::node(parent)]);
    fix_missing_locations(&mut root);

    assert_eq!(
        locations(&root),
        vec![
            Location::new(1, 0, 1, 0),
            Location::new(5, 0, 7, 0),
            Location::new(5, 0, 7, 0),
        ]
    );
}

#[test]
fn test_fix_missing_locations_keeps_set_coordinates() {
    let child = located_num(1, Location::new(2, 3, 2, 8));
    let mut root = Expr::new(1, child);
    *root.location_mut() = Location::new(1, 0, 4, 0);
    fix_missing_locations(&mut root);

    assert_eq!(
        locations(&root),
        vec![Location::new(1, 0, 4, 0), Location::new(2, 3, 2, 8)]
    );
}

// ============================================================================
// increment_lineno
// ============================================================================

fn located_tree() -> program {
    let mut stmt = Expr::new(1, located_num(1, Location::new(2, 4, 3, 1)));
    *stmt.location_mut() = Location::new(2, 0, 3, 5);
    let mut root = program::new(vec![Value::node(stmt)]);
    *root.location_mut() = Location {
        lineno: Some(1),
        ..Location::unset()
    };
    root
}

#[test]
fn test_increment_lineno_shifts_lines_only() {
    let mut root = located_tree();
    increment_lineno(&mut root, 3);

    assert_eq!(
        locations(&root),
        vec![
            Location {
                lineno: Some(4),
                ..Location::unset()
            },
            Location::new(5, 0, 6, 5),
            Location::new(5, 4, 6, 1),
        ]
    );
}

#[test]
fn test_increment_lineno_by_zero_is_identity() {
    let mut root = located_tree();
    let before = locations(&root);
    increment_lineno(&mut root, 0);
    assert_eq!(locations(&root), before);
}

#[test]
fn test_increment_lineno_negative_delta() {
    let mut root = located_tree();
    increment_lineno(&mut root, 3);
    increment_lineno(&mut root, -3);
    assert_eq!(locations(&root), locations(&located_tree()));
}
