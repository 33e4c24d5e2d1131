//! Conjunctions: `expect(x, "to be a string", "and", "to be non-empty")`
//! chains independent assertions against one subject.
//!
//! Some phrases contain the conjunction keyword themselves (`to be between
//! <number> and <number>`), so a naive split can be wrong. The rejoin
//! permutations undo the split one adjacent pair at a time.

use crate::value::Value;

fn is_keyword(value: &Value, keyword: &str) -> bool {
    matches!(value, Value::String(s) if s == keyword)
}

/// Split on every bare `keyword` element after the first position.
///
/// Every segment after the first re-prepends the subject (`args[0]`). Without
/// any keyword the result is the single, unchanged argument list.
pub fn split_conjunctions(args: &[Value], keyword: &str) -> Vec<Vec<Value>> {
    let positions: Vec<usize> = args
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, value)| is_keyword(value, keyword))
        .map(|(i, _)| i)
        .collect();

    if positions.is_empty() {
        return vec![args.to_vec()];
    }

    let subject = &args[0];
    let mut segments = Vec::with_capacity(positions.len() + 1);
    segments.push(args[..positions[0]].to_vec());

    let ends = positions.iter().skip(1).copied().chain(Some(args.len()));
    for (start, end) in positions.iter().map(|p| p + 1).zip(ends) {
        let mut segment = Vec::with_capacity(end - start + 1);
        segment.push(subject.clone());
        segment.extend_from_slice(&args[start..end]);
        segments.push(segment);
    }

    segments
}

/// Alternative segmentations to try when the naive split does not resolve.
///
/// For every adjacent pair `(i, i + 1)` one permutation rejoins exactly that
/// pair (`segment_i + [keyword] + segment_{i+1}[1..]`) and keeps the other
/// segments as they are. The final permutation is the unsplit call.
pub fn rejoin_permutations(
    segments: &[Vec<Value>],
    original: &[Value],
    keyword: &str,
) -> Vec<Vec<Vec<Value>>> {
    let mut permutations = Vec::with_capacity(segments.len());

    for i in 0..segments.len().saturating_sub(1) {
        let mut joined = segments[i].clone();
        joined.push(Value::String(keyword.to_string()));
        joined.extend_from_slice(segments[i + 1].get(1..).unwrap_or(&[]));

        let mut permutation = Vec::with_capacity(segments.len() - 1);
        permutation.extend_from_slice(&segments[..i]);
        permutation.push(joined);
        permutation.extend_from_slice(&segments[i + 2..]);
        permutations.push(permutation);
    }

    permutations.push(vec![original.to_vec()]);
    permutations
}
