//! Shell sort with the halving gap sequence `n/2, n/4, ..., 1`.

use crate::recorder::StepRecorder;

pub(crate) fn sort(rec: &mut StepRecorder) {
    let n = rec.arr.len();
    let mut gap = n / 2;

    while gap > 0 {
        for i in gap..n {
            let temp = rec.arr[i];
            rec.mark([i, i - gap]);

            // gapped insertion; temp travels down with each swap
            let mut j = i;
            while j >= gap && rec.arr[j - gap] > temp {
                rec.mark([j, j - gap]);
                rec.arr.swap(j, j - gap);
                rec.mark([j, j - gap]);
                j -= gap;
            }

            rec.mark([j]);
        }
        gap /= 2;
    }
}

#[cfg(test)]
mod tests {
    use crate::record;
    use sortlab_core::Algorithm;

    #[test]
    fn test_shell_trace_shape() {
        let trace = record(Algorithm::Shell, &[3, 1, 2]);
        let highlights: Vec<Vec<usize>> = trace
            .steps()
            .iter()
            .map(|s| s.highlights.iter().copied().collect())
            .collect();

        assert_eq!(
            highlights,
            vec![
                vec![],
                vec![0, 1],
                vec![0, 1],
                vec![0, 1],
                vec![0],
                vec![1, 2],
                vec![1, 2],
                vec![1, 2],
                vec![1],
                vec![],
            ]
        );
        assert_eq!(trace.step(3).unwrap().snapshot, vec![1, 3, 2]);
        assert_eq!(trace.step(7).unwrap().snapshot, vec![1, 2, 3]);
    }

    #[test]
    fn test_first_gap_is_half_length() {
        let trace = record(Algorithm::Shell, &[9, 8, 7, 6, 5, 4]);
        // n = 6 -> gap 3, first visit pairs i = 3 with 0
        let first = trace.step(1).unwrap();
        assert!(first.is_highlighted(3));
        assert!(first.is_highlighted(0));
        assert_eq!(trace.last().snapshot, vec![4, 5, 6, 7, 8, 9]);
    }
}
