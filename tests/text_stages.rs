//! Integration tests for the in-process text stages:
//! filter -> sort -> repair, the part of the pipeline that runs between
//! the external tool invocations.

use std::io::Write;

use tempfile::NamedTempFile;

use bwlift::bedgraph::{parse_records, BedGraphReader};
use bwlift::commands::{FilterCommand, RepairCommand, SortCommand};
use bwlift::genome::ChromSizes;

/// Helper to create a temporary bedGraph file.
fn create_bedgraph_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// Helper to create a temporary chrom.sizes file.
fn create_sizes_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// Assert the repair output invariant: per chromosome, strictly
/// increasing, non-overlapping, positive-length intervals.
fn assert_repaired_invariant(output: &str) {
    let records = parse_records(output).unwrap();
    let mut prev_chrom: Option<&str> = None;
    let mut prev_end = 0u64;

    for rec in &records {
        if prev_chrom != Some(rec.chrom.as_str()) {
            prev_chrom = Some(rec.chrom.as_str());
            prev_end = 0;
        }
        assert!(
            rec.start >= prev_end,
            "interval {}:{}-{} overlaps previous end {}",
            rec.chrom,
            rec.start,
            rec.end,
            prev_end
        );
        assert!(rec.start < rec.end, "degenerate interval emitted");
        prev_end = rec.end;
    }
}

#[test]
fn test_repair_from_file() {
    let input = create_bedgraph_file(
        "chr1\t100\t200\t5.0\nchr1\t150\t250\t3.0\nchr1\t260\t300\t1.0\n",
    );

    let mut output = Vec::new();
    let stats = RepairCommand::new()
        .run(input.path(), &mut output)
        .unwrap();

    let result = String::from_utf8(output).unwrap();
    assert_eq!(
        result,
        "chr1\t100\t200\t5.0\nchr1\t200\t250\t3.0\nchr1\t260\t300\t1.0\n"
    );
    assert_eq!(stats.records_read, 3);
    assert_eq!(stats.records_clipped, 1);
}

#[test]
fn test_repair_invariant_on_messy_input() {
    let input = create_bedgraph_file(
        "chr1\t0\t1000\t1\n\
         chr1\t10\t20\t2\n\
         chr1\t500\t1500\t3\n\
         chr1\t1500\t1600\t4\n\
         chr1\t1550\t1560\t5\n\
         chr2\t5\t15\t6\n\
         chr2\t10\t12\t7\n\
         chr2\t14\t30\t8\n",
    );

    let mut output = Vec::new();
    RepairCommand::new().run(input.path(), &mut output).unwrap();

    assert_repaired_invariant(&String::from_utf8(output).unwrap());
}

#[test]
fn test_repair_is_idempotent() {
    let input = create_bedgraph_file(
        "chr1\t100\t200\t5.0\n\
         chr1\t150\t250\t3.0\n\
         chr1\t240\t260\t4.0\n\
         chr2\t0\t10\t1.0\n",
    );

    let mut first = Vec::new();
    RepairCommand::new().run(input.path(), &mut first).unwrap();
    let first = String::from_utf8(first).unwrap();

    let mut second = Vec::new();
    let stats = RepairCommand::new()
        .run_streaming(BedGraphReader::new(first.as_bytes()), &mut second)
        .unwrap();

    assert_eq!(first, String::from_utf8(second).unwrap());
    assert_eq!(stats.records_clipped, 0);
    assert_eq!(stats.records_dropped, 0);
}

#[test]
fn test_repair_check_sorted_rejects_unsorted_file() {
    let input = create_bedgraph_file("chr1\t500\t600\t1\nchr1\t100\t200\t1\n");

    let mut output = Vec::new();
    let result = RepairCommand::new()
        .with_check_sorted(true)
        .run(input.path(), &mut output);

    assert!(result.is_err());
}

#[test]
fn test_filter_drops_unplaced_contigs() {
    let sizes_file = create_sizes_file("chr1\t248956422\nchr2\t242193529\nchrM\t16569\n");
    let sizes = ChromSizes::from_file(sizes_file.path()).unwrap();

    let input = create_bedgraph_file(
        "chr1\t0\t10\t1.0\n\
         chrUn_gl000220\t0\t10\t2.0\n\
         chrM\t0\t10\t3.0\n\
         chr6_apd_hap1\t0\t10\t4.0\n",
    );

    let mut output = Vec::new();
    let stats = FilterCommand::new()
        .run(input.path(), &sizes, &mut output)
        .unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "chr1\t0\t10\t1.0\nchrM\t0\t10\t3.0\n"
    );
    assert_eq!(stats.lines_kept, 2);
    assert_eq!(stats.lines_dropped, 2);
}

#[test]
fn test_sort_restores_lift_scrambled_order() {
    let input = create_bedgraph_file(
        "chr2\t100\t200\t1.0\n\
         chr1\t500\t600\t2.0\n\
         chr1\t100\t200\t3.0\n\
         chr2\t0\t50\t4.0\n",
    );

    let mut output = Vec::new();
    SortCommand::new().run(input.path(), &mut output).unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "chr1\t100\t200\t3.0\nchr1\t500\t600\t2.0\nchr2\t0\t50\t4.0\nchr2\t100\t200\t1.0\n"
    );
}

#[test]
fn test_filter_sort_repair_chain() {
    // The text stages exactly as convert runs them, minus the external
    // tools on either side.
    let sizes_file = create_sizes_file("chr1\t248956422\nchr2\t242193529\n");
    let sizes = ChromSizes::from_file(sizes_file.path()).unwrap();

    // Lift output: scrambled order, a stray contig, and overlaps
    let lifted = "chr2\t10\t60\t2.5\n\
                  chr1\t150\t250\t3.0\n\
                  chrUn_gl000220\t0\t10\t9.9\n\
                  chr1\t100\t200\t5.0\n\
                  chr2\t40\t80\t1.5\n";

    let mut filtered = Vec::new();
    FilterCommand::new()
        .run_streaming(lifted.as_bytes(), &sizes, &mut filtered)
        .unwrap();

    let mut sorted = Vec::new();
    SortCommand::new()
        .run_streaming(BedGraphReader::new(&filtered[..]), &mut sorted)
        .unwrap();

    let mut repaired = Vec::new();
    let stats = RepairCommand::new()
        .with_check_sorted(true)
        .run_streaming(BedGraphReader::new(&sorted[..]), &mut repaired)
        .unwrap();

    let result = String::from_utf8(repaired).unwrap();
    assert_eq!(
        result,
        "chr1\t100\t200\t5.0\nchr1\t200\t250\t3.0\nchr2\t10\t60\t2.5\nchr2\t60\t80\t1.5\n"
    );
    assert_eq!(stats.records_clipped, 2);
    assert_repaired_invariant(&result);
}

#[test]
fn test_values_round_trip_through_all_stages() {
    let sizes_file = create_sizes_file("chr1\t1000000\n");
    let sizes = ChromSizes::from_file(sizes_file.path()).unwrap();

    let input = "chr1\t10\t20\t0.123456789\nchr1\t0\t10\t1e-12\n";

    let mut filtered = Vec::new();
    FilterCommand::new()
        .run_streaming(input.as_bytes(), &sizes, &mut filtered)
        .unwrap();

    let mut sorted = Vec::new();
    SortCommand::new()
        .run_streaming(BedGraphReader::new(&filtered[..]), &mut sorted)
        .unwrap();

    let mut repaired = Vec::new();
    RepairCommand::new()
        .run_streaming(BedGraphReader::new(&sorted[..]), &mut repaired)
        .unwrap();

    assert_eq!(
        String::from_utf8(repaired).unwrap(),
        "chr1\t0\t10\t1e-12\nchr1\t10\t20\t0.123456789\n"
    );
}
