//! LSD radix sort, base 10, one stable counting pass per digit.
//!
//! The copy-back of each pass is recorded as a series of swaps that move
//! the value destined for index `i` into place, so every snapshot stays a
//! permutation of the input.

use crate::recorder::StepRecorder;
use sortlab_core::Value;

const RADIX: usize = 10;

fn digit(value: Value, exp: u64) -> usize {
    ((u64::from(value) / exp) % RADIX as u64) as usize
}

pub(crate) fn sort(rec: &mut StepRecorder) {
    let n = rec.arr.len();
    let max = rec.arr.iter().copied().max().unwrap_or(0);

    let mut exp: u64 = 1;
    while u64::from(max) / exp > 0 {
        // digit pass begins
        rec.mark(0..n);

        let mut count = [0usize; RADIX];
        for i in 0..n {
            rec.mark([i]);
            count[digit(rec.arr[i], exp)] += 1;
        }

        for d in 1..RADIX {
            count[d] += count[d - 1];
        }

        // source[dest] = index the value placed at `dest` came from
        let mut source = vec![0usize; n];
        for i in (0..n).rev() {
            let d = digit(rec.arr[i], exp);
            count[d] -= 1;
            source[count[d]] = i;
            rec.mark([i, count[d]]);
        }

        copy_back(rec, &source);
        exp *= RADIX as u64;
    }
}

fn copy_back(rec: &mut StepRecorder, source: &[usize]) {
    let n = source.len();
    // at[pos]: original index now at `pos`; loc[orig]: where it sits now
    let mut at: Vec<usize> = (0..n).collect();
    let mut loc: Vec<usize> = (0..n).collect();

    for i in 0..n {
        let k = loc[source[i]];
        if k != i {
            rec.arr.swap(i, k);
            let (moved_in, moved_out) = (at[k], at[i]);
            at.swap(i, k);
            loc[moved_in] = i;
            loc[moved_out] = k;
        }
        rec.mark([i]);
    }
}
