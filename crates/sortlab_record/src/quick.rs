//! Quick sort, Lomuto partition with the last element as pivot.
//!
//! The left sub-range is always recorded before the right one; the trace
//! order depends on it.

use crate::recorder::StepRecorder;

pub(crate) fn sort(rec: &mut StepRecorder) {
    let n = rec.arr.len();
    if n > 1 {
        sort_range(rec, 0, n - 1);
    }
}

fn sort_range(rec: &mut StepRecorder, start: usize, end: usize) {
    if start >= end {
        return;
    }

    let pivot = rec.arr[end];
    rec.mark([end]);

    let mut store = start;
    for i in start..end {
        rec.mark([i, end]);

        if rec.arr[i] <= pivot {
            rec.mark([i, store]);
            rec.arr.swap(i, store);
            rec.mark([i, store]);
            store += 1;
        }
    }

    rec.mark([store, end]);
    rec.arr.swap(store, end);
    rec.mark([store, end]);

    if store > start {
        sort_range(rec, start, store - 1);
    }
    sort_range(rec, store + 1, end);
}
