//! Read a node table, sort it, and write it back out in every format.

#![allow(clippy::unwrap_used)]

use std::fmt::Write;

use spiralsort_format::{Format, SvgMetadata, to_svg};

/// A 9x9 planar grid with a little jitter in z, as CSV with a leading
/// index column and the coordinate columns out of order.
fn grid_csv() -> String {
    let mut csv = String::from(",node_id,z,y,x\n");
    let mut row = 0;
    for i in -4i32..=4 {
        for j in -4i32..=4 {
            let x = f64::from(i) + 0.25;
            let y = f64::from(j) + 0.5;
            let z = f64::from((i * 7 + j * 3).rem_euclid(5)) / 100.0;
            writeln!(csv, "{row},G_{row:02},{z},{y},{x}").unwrap();
            row += 1;
        }
    }
    csv
}

#[test]
fn csv_in_json_out_keeps_every_node() {
    let cloud = Format::Csv.parse(&grid_csv()).unwrap();
    assert_eq!(cloud.len(), 81);

    let start = cloud[40].id.clone();
    let sorted = spiralsort::sort(&cloud, &start).unwrap();

    let json = Format::Json.serialize(&sorted).unwrap();
    let reread = Format::Json.parse(&json).unwrap();
    assert_eq!(reread, sorted);
    assert_eq!(reread[0].id, start);
    for node in &cloud {
        assert!(reread.contains(node));
    }
}

#[test]
fn csv_round_trip_preserves_sorted_order() {
    let cloud = Format::Csv.parse(&grid_csv()).unwrap();
    let sorted = spiralsort::sort(&cloud, "G_00").unwrap();

    let csv = Format::Csv.serialize(&sorted).unwrap();
    assert!(csv.starts_with("node_id,x,y,z\nG_00,"));
    assert_eq!(Format::Csv.parse(&csv).unwrap(), sorted);
}

#[test]
fn svg_preview_of_sorted_cloud() {
    let cloud = Format::Csv.parse(&grid_csv()).unwrap();
    let sorted = spiralsort::sort(&cloud, "G_40").unwrap();
    let svg = to_svg(
        &sorted,
        &SvgMetadata {
            title: Some("grid"),
            description: Some("start node G_40"),
        },
    );
    assert_eq!(svg.matches("<path").count(), 1);
    assert!(svg.contains(r#"id="start""#));
    // G_40 is the centre of the grid.
    assert!(svg.contains(r#"cx="400""#), "{svg}");
}
