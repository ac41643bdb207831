// crates/gbtx-core/tests/compare_stats.rs

use gbtx_core::{compare, Frame, GbtxError, LengthMismatch, MatchStats};

fn one_channel(name: &str, values: &[u8]) -> Vec<Frame> {
    values.iter().map(|&v| Frame::from_pairs([(name, v)])).collect()
}

fn lcg_next(x: &mut u64) -> u64 {
    *x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    *x
}

#[test]
fn two_of_three_match() {
    let reference = one_channel("c", &[5, 5, 5]);
    let parsed = one_channel("c", &[5, 6, 5]);
    let report = compare(&reference, &parsed).expect("compare");

    let s = report.channels["c"];
    assert_eq!(s.num_match, 2);
    assert_eq!(s.num_mismatch, 1);
    assert!((s.percent_match - 66.666_666_666).abs() < 1e-6);
    assert!((s.percent_mismatch - 33.333_333_333).abs() < 1e-6);
    assert_eq!(report.compared, 3);
    assert!(report.length_mismatch.is_none());
    assert!(!report.is_clean());
}

#[test]
fn counts_and_percentages_hold_for_random_data() {
    let mut seed = 42u64;
    for round in 0..64 {
        let n_ref = (lcg_next(&mut seed) % 40) as usize + 1;
        let n_par = (lcg_next(&mut seed) % 40) as usize + 1;

        let mk = |seed: &mut u64, n: usize| -> Vec<Frame> {
            (0..n)
                .map(|_| {
                    // small alphabet so matches actually happen
                    let a = (lcg_next(seed) >> 62) as u8;
                    let b = (lcg_next(seed) >> 62) as u8;
                    Frame::from_pairs([("a", a), ("b", b)])
                })
                .collect()
        };
        let reference = mk(&mut seed, n_ref);
        let parsed = mk(&mut seed, n_par);

        let report = compare(&reference, &parsed).expect("compare");
        let n = n_ref.min(n_par);
        assert_eq!(report.compared, n, "round={round}");
        assert_eq!(report.channels.len(), 2);
        for s in report.channels.values() {
            assert_eq!(s.num_match + s.num_mismatch, n);
            assert!((s.percent_match + s.percent_mismatch - 100.0).abs() < 1e-9);
        }
        assert_eq!(report.length_mismatch.is_some(), n_ref != n_par);
    }
}

#[test]
fn length_mismatch_truncates_and_is_reported() {
    let reference = one_channel("c", &[1, 2, 3, 4]);
    let parsed = one_channel("c", &[1, 2]);
    let report = compare(&reference, &parsed).expect("compare");

    assert_eq!(report.compared, 2);
    assert_eq!(report.length_mismatch, Some(LengthMismatch { reference: 4, parsed: 2 }));
    assert_eq!(report.channels["c"].num_match, 2);
    assert!(!report.is_clean());
}

#[test]
fn identical_sequences_are_clean() {
    let reference = one_channel("c", &[9, 8, 7]);
    let report = compare(&reference, &reference).expect("compare");
    assert!(report.is_clean());
    assert_eq!(report.overall(), MatchStats::from_counts(3, 0));
}

#[test]
fn overall_folds_channels() {
    let reference = vec![
        Frame::from_pairs([("a", 1u8), ("b", 1)]),
        Frame::from_pairs([("a", 1u8), ("b", 1)]),
    ];
    let parsed = vec![
        Frame::from_pairs([("a", 1u8), ("b", 0)]),
        Frame::from_pairs([("a", 0u8), ("b", 0)]),
    ];
    let all = compare(&reference, &parsed).expect("compare").overall();
    assert_eq!(all.num_match, 1);
    assert_eq!(all.num_mismatch, 3);
    assert!((all.percent_match - 25.0).abs() < 1e-9);
}

#[test]
fn empty_overlap_has_zero_percentages() {
    let reference = one_channel("c", &[1, 2]);
    let report = compare(&reference, &[]).expect("compare");
    assert_eq!(report.compared, 0);
    assert_eq!(report.channels["c"], MatchStats::from_counts(0, 0));
    assert_eq!(report.channels["c"].percent_match, 0.0);

    let none = compare(&[], &[]).expect("compare");
    assert!(none.channels.is_empty());
    assert!(none.is_clean());
}

#[test]
fn differing_channel_sets_are_rejected() {
    let reference = one_channel("a", &[1, 1]);
    let parsed = vec![Frame::from_pairs([("a", 1u8)]), Frame::from_pairs([("b", 1u8)])];
    match compare(&reference, &parsed) {
        Err(GbtxError::ChannelMismatch { position, detail }) => {
            assert_eq!(position, 1);
            assert!(detail.contains("parsed"));
        }
        other => panic!("expected ChannelMismatch, got {other:?}"),
    }
}

#[test]
fn project_aligns_parsed_to_pattern_channels() {
    let reference = one_channel("a", &[3, 3]);
    let parsed: Vec<Frame> = vec![
        Frame::from_pairs([("a", 3u8), ("b", 9)]),
        Frame::from_pairs([("a", 4u8), ("b", 9)]),
    ]
    .iter()
    .map(|f| f.project(["a"]))
    .collect();

    let s = compare(&reference, &parsed).expect("compare").channels["a"];
    assert_eq!((s.num_match, s.num_mismatch), (1, 1));
}
