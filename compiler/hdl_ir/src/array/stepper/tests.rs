use super::*;
use crate::Expr;
use pretty_assertions::assert_eq;

fn dense(ranges: &[(i64, i64)]) -> RangeSet {
    RangeSet::concrete(
        ranges.iter().map(|&(lo, hi)| ConcreteRange::new(lo, hi)).collect(),
        false,
    )
}

fn drain(array: &RangeSet, mode: StepMode) -> Vec<Vec<i64>> {
    array
        .stepper(mode)
        .unwrap()
        .map(|c| c.to_vec())
        .collect()
}

#[test]
fn test_two_dimensions_row_major() {
    let a = dense(&[(0, 3), (0, 1)]);
    let coords = drain(&a, StepMode::Subrange);
    assert_eq!(
        coords,
        vec![
            vec![0, 0],
            vec![0, 1],
            vec![1, 0],
            vec![1, 1],
            vec![2, 0],
            vec![2, 1],
            vec![3, 0],
            vec![3, 1],
        ]
    );
    for (k, c) in coords.iter().enumerate() {
        assert_eq!(a.offset(&RangeSet::deref_at(c)), Ok(Some(k)));
    }
}

#[test]
fn test_both_modes_agree() {
    let a = dense(&[(1, 2), (5, 7)]);
    assert_eq!(drain(&a, StepMode::Subrange), drain(&a, StepMode::Primed));
}

#[test]
fn test_subrange_reads_before_stepping() {
    let a = dense(&[(2, 3)]);
    let mut it = a.stepper(StepMode::Subrange).unwrap();
    assert_eq!(it.current(), Some(&[2][..]));
    assert_eq!(it.ordinal(), Some(0));
    it.step();
    assert_eq!(it.current(), Some(&[3][..]));
    assert_eq!(it.ordinal(), Some(1));
    it.step();
    assert!(it.is_end());
    assert_eq!(it.current(), None);
    assert_eq!(it.ordinal(), None);
}

#[test]
fn test_primed_steps_before_reading() {
    let a = dense(&[(2, 3)]);
    let mut it = a.stepper(StepMode::Primed).unwrap();
    assert!(!it.is_end());
    assert_eq!(it.current(), None);
    it.step();
    assert_eq!(it.current(), Some(&[2][..]));
    assert_eq!(it.ordinal(), Some(0));
}

#[test]
fn test_crosses_into_next_block() {
    let s = dense(&[(0, 1)]).with_block(dense(&[(7, 8)])).unwrap();
    let mut it = s.stepper(StepMode::Subrange).unwrap();
    it.step();
    it.step();
    assert_eq!(it.current(), Some(&[7][..]));
    assert_eq!(it.ordinal(), Some(2));
    assert_eq!(it.current_deref(), Some(RangeSet::deref_at(&[7])));
}

#[test]
fn test_empty_blocks_are_skipped() {
    let s = dense(&[(3, 2)])
        .with_block(dense(&[(0, 1)]))
        .unwrap()
        .with_block(dense(&[(1, 0)]))
        .unwrap();
    assert_eq!(drain(&s, StepMode::Subrange), vec![vec![0], vec![1]]);
    assert_eq!(s.size(), Ok(2));

    let empty = dense(&[(0, -1)]);
    let it = empty.stepper(StepMode::Subrange).unwrap();
    assert!(it.is_end());
    assert_eq!(drain(&empty, StepMode::Primed), Vec::<Vec<i64>>::new());
}

#[test]
fn test_stepper_requires_expansion() {
    let a = RangeSet::index(Expr::Int(3));
    assert!(a.stepper(StepMode::Subrange).is_err());
}

#[test]
fn test_step_after_end_is_noop() {
    let a = dense(&[(0, 0)]);
    let mut it = a.stepper(StepMode::Subrange).unwrap();
    it.step();
    it.step();
    assert!(it.is_end());
}
