//! Invalid-run collapse and expansion.
//!
//! Scans commonly contain long stretches of samples without a return. With
//! the `REMOVE_INVALID` flag set, a maximal run of all-zero invalid records
//! is replaced by one placeholder: `x == 0`, `y == 0`, `type == INVALID`,
//! with the run length in `z`.

use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::Stage;
use scanpack_core::point::PointRecord;

/// Longest run one placeholder stands for. Keeps `z` inside 16 bits so the
/// truncating layouts carry it unchanged.
pub const MAX_RUN: usize = i16::MAX as usize;

/// Replace runs of all-zero invalid records with placeholders.
///
/// Returns `None` when `points` holds a record that has the placeholder
/// shape without being the all-zero invalid record. Such a record would be
/// expanded on decode, so the collapse cannot be applied.
pub fn collapse(points: &[PointRecord]) -> Option<Vec<PointRecord>> {
    let invalid = PointRecord::invalid();
    if points.iter().any(|p| p.is_placeholder() && *p != invalid) {
        return None;
    }

    let mut stream = Vec::with_capacity(points.len());
    let mut run = 0usize;
    for point in points {
        if *point == invalid {
            run += 1;
            if run == MAX_RUN {
                stream.push(PointRecord::invalid_run(run as i32));
                run = 0;
            }
            continue;
        }
        if run > 0 {
            stream.push(PointRecord::invalid_run(run as i32));
            run = 0;
        }
        stream.push(*point);
    }
    if run > 0 {
        stream.push(PointRecord::invalid_run(run as i32));
    }

    Some(stream)
}

/// Expand placeholders into `total` records.
///
/// The run lengths are checked against `total` before anything is
/// allocated. The stream is then walked from its last record to its first,
/// filling a separate buffer from the back.
pub fn expand(stream: &[PointRecord], total: usize) -> Result<Vec<PointRecord>> {
    let mut produced = 0usize;
    for (index, record) in stream.iter().enumerate() {
        let run = if record.is_placeholder() {
            if record.z < 1 {
                return Err(ScanPackError::malformed(
                    Stage::Points,
                    format!("invalid-run placeholder {index} has length {}", record.z),
                ));
            }
            record.z as usize
        } else {
            1
        };
        produced = produced.saturating_add(run);
        if produced > total {
            return Err(overflow(index, total));
        }
    }

    if produced != total {
        return Err(ScanPackError::malformed(
            Stage::Points,
            format!("invalid-run expansion produced {produced} of {total} records"),
        ));
    }

    let mut points = vec![PointRecord::default(); total];
    let mut end = total;
    for record in stream.iter().rev() {
        if record.is_placeholder() {
            let run = record.z as usize;
            points[end - run..end].fill(PointRecord::invalid());
            end -= run;
        } else {
            end -= 1;
            points[end] = *record;
        }
    }

    Ok(points)
}

fn overflow(index: usize, total: usize) -> ScanPackError {
    ScanPackError::malformed(
        Stage::Points,
        format!("invalid-run expansion at record {index} exceeds {total} records"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(i: i32) -> PointRecord {
        PointRecord::new(i, i + 1, i + 2, 0x01, 0, 40)
    }

    #[test]
    fn test_expand_placeholder() {
        let stream = [valid(1), PointRecord::invalid_run(5), valid(9)];
        let points = expand(&stream, 7).unwrap();
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], valid(1));
        assert!(points[1..6].iter().all(|p| *p == PointRecord::invalid()));
        assert_eq!(points[6], valid(9));
    }

    #[test]
    fn test_collapse_runs() {
        let invalid = PointRecord::invalid();
        let points = [invalid, invalid, valid(1), invalid, valid(2), invalid, invalid, invalid];
        let stream = collapse(&points).unwrap();
        assert_eq!(
            stream,
            vec![
                PointRecord::invalid_run(2),
                valid(1),
                PointRecord::invalid_run(1),
                valid(2),
                PointRecord::invalid_run(3),
            ]
        );
        assert_eq!(expand(&stream, points.len()).unwrap(), points);
    }

    #[test]
    fn test_collapse_splits_long_runs() {
        let points = vec![PointRecord::invalid(); MAX_RUN * 2 + 10];
        let stream = collapse(&points).unwrap();
        assert_eq!(
            stream,
            vec![
                PointRecord::invalid_run(MAX_RUN as i32),
                PointRecord::invalid_run(MAX_RUN as i32),
                PointRecord::invalid_run(10),
            ]
        );
        assert_eq!(expand(&stream, points.len()).unwrap(), points);
    }

    #[test]
    fn test_collapse_skips_lookalikes() {
        let lookalike = PointRecord::new(0, 0, 12, 0x10, 0, 0);
        assert!(collapse(&[PointRecord::invalid(), lookalike]).is_none());

        // Invalid records with a measurement are not placeholders.
        let flagged = PointRecord::new(5, 0, 0, 0x10, 0, 0);
        let stream = collapse(&[flagged, PointRecord::invalid()]).unwrap();
        assert_eq!(stream, vec![flagged, PointRecord::invalid_run(1)]);
    }

    #[test]
    fn test_expand_rejects_bad_runs() {
        let zero = [valid(1), PointRecord::invalid_run(0)];
        assert!(matches!(
            expand(&zero, 2),
            Err(ScanPackError::MalformedFrame { .. })
        ));

        let negative = [PointRecord::invalid_run(-4)];
        assert!(expand(&negative, 4).is_err());
    }

    #[test]
    fn test_expand_checks_total_before_allocating() {
        // One stored record cannot stand for a huge declared count.
        let stream = [valid(1)];
        assert!(matches!(
            expand(&stream, usize::MAX / 64),
            Err(ScanPackError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn test_expand_count_mismatch() {
        let stream = [valid(1), PointRecord::invalid_run(5), valid(9)];
        assert!(matches!(
            expand(&stream, 6),
            Err(ScanPackError::MalformedFrame { .. })
        ));
        assert!(matches!(
            expand(&stream, 8),
            Err(ScanPackError::MalformedFrame { .. })
        ));
    }
}
