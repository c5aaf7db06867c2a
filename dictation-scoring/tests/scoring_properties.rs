use approx::assert_relative_eq;
use dictation_scoring::{
    align, render_diff, score, tokenize, Comparison, SegmentKind,
};

const PAIRS: &[(&str, &str)] = &[
    ("", ""),
    ("Hello, World!", "hello world"),
    ("the cat sat", "the dog sat"),
    (
        "the quick brown fox jumps over the lazy dog",
        "the quick brown fox jumped over a lazy dog",
    ),
    (
        "Good morning. This is the six o'clock news.",
        "good morning this is six oclock news today",
    ),
    ("one two three", ""),
    ("", "nothing to compare against"),
    ("a a a b b b", "b b b a a a"),
];

#[test]
fn test_tokenize_examples() {
    assert!(tokenize("").is_empty());
    assert_eq!(tokenize("Hello, World!"), vec!["hello", "world"]);
}

#[test]
fn test_end_to_end_sentence() {
    let cmp = Comparison::new(
        "the quick brown fox jumps over the lazy dog",
        "the quick brown fox jumped over a lazy dog",
    );

    let changed: Vec<(SegmentKind, String)> = cmp
        .alignment()
        .segments()
        .iter()
        .filter(|s| s.kind != SegmentKind::Unchanged)
        .map(|s| (s.kind, s.text()))
        .collect();

    assert_eq!(
        changed,
        vec![
            (SegmentKind::Removed, "jumps".to_string()),
            (SegmentKind::Inserted, "jumped".to_string()),
            (SegmentKind::Removed, "the".to_string()),
            (SegmentKind::Inserted, "a".to_string()),
        ]
    );

    // "the" -> "a" sits right before "lazy"
    let segments = cmp.alignment().segments();
    let lazy = segments
        .iter()
        .position(|s| s.kind == SegmentKind::Unchanged && s.text() == "lazy dog")
        .expect("lazy dog stays unchanged");
    assert_eq!(segments[lazy - 1].text(), "a");
    assert_eq!(segments[lazy - 2].text(), "the");

    assert!(cmp.score() > 70.0 && cmp.score() < 90.0);
    assert_relative_eq!(cmp.score(), 700.0 / 9.0, epsilon = 1e-9);
}

#[test]
fn test_identical_texts_score_100() {
    for (origin, _) in PAIRS {
        let tokens = tokenize(origin);
        assert_eq!(score(&tokens, &tokens), 100.0, "origin: {origin:?}");
    }
}

#[test]
fn test_scores_stay_in_range() {
    for (origin, candidate) in PAIRS {
        let value = Comparison::new(origin, candidate).score();
        assert!((0.0..=100.0).contains(&value), "{origin:?} / {candidate:?} = {value}");
    }
}

#[test]
fn test_comparison_is_deterministic() {
    for (origin, candidate) in PAIRS {
        let first = Comparison::new(origin, candidate);
        let second = Comparison::new(origin, candidate);

        assert_eq!(first.score().to_bits(), second.score().to_bits());
        assert_eq!(first.alignment(), second.alignment());
        assert_eq!(render_diff(origin, candidate), render_diff(origin, candidate));
    }
}

#[test]
fn test_edit_cost_is_symmetric() {
    for (origin, candidate) in PAIRS {
        let a = tokenize(origin);
        let b = tokenize(candidate);
        assert_eq!(align(&a, &b).distance(), align(&b, &a).distance());
    }
}

#[test]
fn test_segments_reconstruct_inputs() {
    for (origin, candidate) in PAIRS {
        let a = tokenize(origin);
        let b = tokenize(candidate);
        let alignment = align(&a, &b);

        assert_eq!(alignment.origin_tokens(), a);
        assert_eq!(alignment.candidate_tokens(), b);
    }
}

#[test]
fn test_plain_tokens_match_scored_tokens() {
    for (origin, candidate) in PAIRS {
        let cmp = Comparison::new(origin, candidate);
        let rendered = render_diff(origin, candidate);

        assert_eq!(rendered.plain_count(), cmp.alignment().unchanged_count());
        assert_eq!(&rendered, cmp.view());
    }
}

#[test]
fn test_free_score_agrees_with_comparison() {
    for (origin, candidate) in PAIRS {
        let a = tokenize(origin);
        let b = tokenize(candidate);
        assert_eq!(score(&a, &b), Comparison::new(origin, candidate).score());
    }
}

#[test]
fn test_reordered_words_keep_their_matches() {
    assert_relative_eq!(Comparison::new("a b", "b a").score(), 50.0);

    let cmp = Comparison::new("the big red ball", "the red big ball");
    assert_relative_eq!(cmp.score(), 75.0);
    let markup = cmp.view().markup();
    assert_eq!(markup.origin, "the [-big-] red ball");
    assert_eq!(markup.candidate, "the red {+big+} ball");

    let cmp = Comparison::new("a a a b b b", "b b b a a a");
    assert_relative_eq!(cmp.score(), 50.0);
    let unchanged: Vec<String> = cmp
        .alignment()
        .segments()
        .iter()
        .filter(|s| s.kind == SegmentKind::Unchanged)
        .map(|s| s.text())
        .collect();
    assert_eq!(unchanged, vec!["b b b".to_string()]);
}
