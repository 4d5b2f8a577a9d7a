#![cfg(feature = "cli")]

use std::fs::File;
use std::io::Write;

use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::tempdir;

use temporal_tree::input::{parse_timestamp, read_rows, InputFormat};
use temporal_tree::{TemporalTreeBuilder, TreeNode};

fn write_gz(path: &std::path::Path, data: &str) {
    let file = File::create(path).expect("create gz");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(data.as_bytes()).expect("write data");
    encoder.finish().expect("finish gz");
}

#[test]
fn gzipped_csv_feeds_temporal_tree() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("events.csv.gz");

    // out of order on purpose; mixed epoch ms and RFC 3339
    let csv_data = concat!(
        "id,ts,kind\n",
        "late,2024-05-31T08:00:00Z,b\n",
        "first,1717027200000,a\n",
        "second,2024-05-30T00:00:01+00:00,a\n",
    );
    write_gz(&input_path, csv_data);

    let rows = read_rows(&input_path, InputFormat::Csv, Some("id"), Some("ts")).expect("read csv");
    assert_eq!(rows.len(), 3);

    let mut stamped: Vec<(DateTime<Utc>, String)> = rows
        .into_iter()
        .map(|row| {
            let ts = parse_timestamp(row.ts.as_ref().expect("timestamp")).expect("parse");
            (ts, row.key)
        })
        .collect();
    stamped.sort_by_key(|(ts, _)| *ts);

    let nodes = TemporalTreeBuilder::for_zone("Z")
        .expect("zone")
        .build(
            &stamped,
            |(ts, _)| *ts,
            |(_, key)| Some(TreeNode::leaf(key.as_str(), key.as_str())),
        )
        .expect("build tree");

    let days: Vec<_> = nodes.iter().filter_map(TreeNode::key).collect();
    assert_eq!(days, vec!["2024-05-30", "2024-05-31"]);
    let first_day: Vec<_> = nodes[0].children().iter().filter_map(TreeNode::key).collect();
    assert_eq!(first_day, vec!["first", "second"]);
}

#[test]
fn plain_and_gzipped_ndjson_read_alike() {
    let dir = tempdir().expect("tempdir");
    let plain = dir.path().join("events.ndjson");
    let gzipped = dir.path().join("events.ndjson.gz");

    let data = "{\"name\": \"x\", \"ts\": 1}\n{\"name\": \"y\", \"ts\": 2}\n";
    std::fs::write(&plain, data).expect("write ndjson");
    write_gz(&gzipped, data);

    let from_plain =
        read_rows(&plain, InputFormat::Ndjson, Some("name"), Some("ts")).expect("read plain");
    let from_gz =
        read_rows(&gzipped, InputFormat::Ndjson, Some("name"), Some("ts")).expect("read gz");
    assert_eq!(from_plain, from_gz);
    assert_eq!(from_plain[1].key, "y");
}

#[test]
fn missing_input_file_reports_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent.csv");
    let err = read_rows(&path, InputFormat::Csv, None, None).expect_err("missing file");
    assert!(err.to_string().contains("absent.csv"), "{err}");
}
