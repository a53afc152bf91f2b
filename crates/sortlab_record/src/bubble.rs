//! Bubble sort.

use crate::recorder::StepRecorder;

pub(crate) fn sort(rec: &mut StepRecorder) {
    let n = rec.arr.len();

    for pass in 0..n.saturating_sub(1) {
        for j in 0..n - pass - 1 {
            rec.mark([j, j + 1]);

            if rec.arr[j] > rec.arr[j + 1] {
                rec.arr.swap(j, j + 1);
                rec.mark([j, j + 1]);
            }
        }
    }
}
