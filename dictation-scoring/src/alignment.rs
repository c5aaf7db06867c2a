//! Word-level edit-distance alignment
//!
//! Classic Levenshtein dynamic programming over tokens instead of characters:
//! substitution costs 0 for equal tokens and 1 otherwise, insertion and
//! deletion cost 1. The table is a flat `(n + 1) * (m + 1)` arena.
//!
//! Among alignments of minimal cost the one keeping the most tokens unchanged
//! wins: each cell carries `(cost, matches)` and the backtrace only follows
//! moves that reproduce both. Remaining ties prefer match > substitution >
//! insertion > deletion.
//!
//! Consecutive tokens of the same kind collapse into one segment, and each
//! changed region between two unchanged runs is emitted as one `Removed`
//! segment followed by one `Inserted` segment.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

/// Which side(s) of the comparison a segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Present in both origin and candidate
    Unchanged,
    /// Present only in the origin
    Removed,
    /// Present only in the candidate
    Inserted,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentKind::Unchanged => write!(f, "unchanged"),
            SegmentKind::Removed => write!(f, "removed"),
            SegmentKind::Inserted => write!(f, "inserted"),
        }
    }
}

/// A maximal run of tokens sharing one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub tokens: Vec<String>,
}

impl Segment {
    /// Tokens joined by single spaces
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Result of aligning an origin token sequence with a candidate sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    segments: Vec<Segment>,
    distance: usize,
    origin_len: usize,
    candidate_len: usize,
}

impl Alignment {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Minimal edit cost between the two sequences
    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn origin_len(&self) -> usize {
        self.origin_len
    }

    pub fn candidate_len(&self) -> usize {
        self.candidate_len
    }

    /// Number of tokens carried by `Unchanged` segments
    pub fn unchanged_count(&self) -> usize {
        self.count(SegmentKind::Unchanged)
    }

    pub fn removed_count(&self) -> usize {
        self.count(SegmentKind::Removed)
    }

    pub fn inserted_count(&self) -> usize {
        self.count(SegmentKind::Inserted)
    }

    /// Rebuild the origin sequence from `Unchanged` and `Removed` segments
    pub fn origin_tokens(&self) -> Vec<&str> {
        self.side_tokens(SegmentKind::Removed)
    }

    /// Rebuild the candidate sequence from `Unchanged` and `Inserted` segments
    pub fn candidate_tokens(&self) -> Vec<&str> {
        self.side_tokens(SegmentKind::Inserted)
    }

    fn count(&self, kind: SegmentKind) -> usize {
        self.segments
            .iter()
            .filter(|s| s.kind == kind)
            .map(Segment::len)
            .sum()
    }

    fn side_tokens(&self, own: SegmentKind) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Unchanged || s.kind == own)
            .flat_map(|s| s.tokens.iter().map(String::as_str))
            .collect()
    }
}

/// Single backtrace step, indices into origin (`Keep`/`Remove`) or candidate (`Insert`)
#[derive(Debug, Clone, Copy)]
enum Step {
    Keep(usize),
    Remove(usize),
    Insert(usize),
}

/// DP cell: minimal cost, and the most matched tokens reachable at that cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    cost: usize,
    matches: usize,
}

impl Cell {
    fn edge(len: usize) -> Self {
        Self { cost: len, matches: 0 }
    }

    fn keep(self) -> Self {
        Self {
            matches: self.matches + 1,
            ..self
        }
    }

    fn edit(self) -> Self {
        Self {
            cost: self.cost + 1,
            ..self
        }
    }

    /// Lower cost wins; equal cost goes to more matches
    fn beats(self, other: Self) -> bool {
        (self.cost, Reverse(self.matches)) < (other.cost, Reverse(other.matches))
    }
}

/// Align two token sequences with minimal edit cost
pub fn align<S: AsRef<str>>(origin: &[S], candidate: &[S]) -> Alignment {
    let n = origin.len();
    let m = candidate.len();
    let width = m + 1;

    let same = |i: usize, j: usize| origin[i].as_ref() == candidate[j].as_ref();

    // dp[i * width + j] = best cell for origin[..i] against candidate[..j]
    let mut dp = vec![Cell::edge(0); (n + 1) * width];
    for i in 0..=n {
        dp[i * width] = Cell::edge(i);
    }
    for j in 0..=m {
        dp[j] = Cell::edge(j);
    }

    for i in 1..=n {
        for j in 1..=m {
            let diag = dp[(i - 1) * width + j - 1];
            let mut best = if same(i - 1, j - 1) {
                diag.keep()
            } else {
                diag.edit() // Substitution
            };
            for other in [
                dp[i * width + j - 1].edit(),   // Insertion
                dp[(i - 1) * width + j].edit(), // Deletion
            ] {
                if other.beats(best) {
                    best = other;
                }
            }
            dp[i * width + j] = best;
        }
    }

    let distance = dp[n * width + m].cost;

    // Backtrace from the bottom-right corner, only along moves that
    // reproduce both the cost and the match count of the current cell
    let mut steps = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let here = dp[i * width + j];
        let diag = (i > 0 && j > 0).then(|| dp[(i - 1) * width + j - 1]);

        if diag.is_some_and(|d| same(i - 1, j - 1) && here == d.keep()) {
            steps.push(Step::Keep(i - 1));
            i -= 1;
            j -= 1;
        } else if diag.is_some_and(|d| !same(i - 1, j - 1) && here == d.edit()) {
            steps.push(Step::Insert(j - 1));
            steps.push(Step::Remove(i - 1));
            i -= 1;
            j -= 1;
        } else if j > 0 && here == dp[i * width + j - 1].edit() {
            steps.push(Step::Insert(j - 1));
            j -= 1;
        } else {
            steps.push(Step::Remove(i - 1));
            i -= 1;
        }
    }
    steps.reverse();

    let mut builder = SegmentBuilder::default();
    for step in steps {
        match step {
            Step::Keep(i) => builder.keep(origin[i].as_ref()),
            Step::Remove(i) => builder.remove(origin[i].as_ref()),
            Step::Insert(j) => builder.insert(candidate[j].as_ref()),
        }
    }

    Alignment {
        segments: builder.finish(),
        distance,
        origin_len: n,
        candidate_len: m,
    }
}

/// Collapses forward steps into segments
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<Segment>,
    unchanged: Vec<String>,
    removed: Vec<String>,
    inserted: Vec<String>,
}

impl SegmentBuilder {
    fn keep(&mut self, token: &str) {
        self.flush_changes();
        self.unchanged.push(token.to_owned());
    }

    fn remove(&mut self, token: &str) {
        self.flush_unchanged();
        self.removed.push(token.to_owned());
    }

    fn insert(&mut self, token: &str) {
        self.flush_unchanged();
        self.inserted.push(token.to_owned());
    }

    fn flush_unchanged(&mut self) {
        Self::emit(&mut self.segments, SegmentKind::Unchanged, &mut self.unchanged);
    }

    fn flush_changes(&mut self) {
        Self::emit(&mut self.segments, SegmentKind::Removed, &mut self.removed);
        Self::emit(&mut self.segments, SegmentKind::Inserted, &mut self.inserted);
    }

    fn emit(segments: &mut Vec<Segment>, kind: SegmentKind, tokens: &mut Vec<String>) {
        if !tokens.is_empty() {
            segments.push(Segment {
                kind,
                tokens: std::mem::take(tokens),
            });
        }
    }

    fn finish(mut self) -> Vec<Segment> {
        self.flush_unchanged();
        self.flush_changes();
        self.segments
    }
}
