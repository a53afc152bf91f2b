//! Selection sort.

use crate::recorder::StepRecorder;

pub(crate) fn sort(rec: &mut StepRecorder) {
    let n = rec.arr.len();

    for i in 0..n.saturating_sub(1) {
        let mut min = i;

        for j in i + 1..n {
            rec.mark([min, j]);
            if rec.arr[j] < rec.arr[min] {
                min = j;
            }
        }

        rec.mark([i, min]);
        if min != i {
            rec.arr.swap(i, min);
            rec.mark([i, min]);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::record;
    use sortlab_core::Algorithm;

    #[test]
    fn test_selection_two_elements() {
        let trace = record(Algorithm::Selection, &[2, 1]);
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.step(2).unwrap().snapshot, vec![2, 1]);
        assert_eq!(trace.step(3).unwrap().snapshot, vec![1, 2]);
        assert!(trace.step(3).unwrap().is_highlighted(0));
        assert!(trace.step(3).unwrap().is_highlighted(1));
    }

    #[test]
    fn test_no_swap_step_when_min_in_place() {
        // i = 0: one comparison + pre-swap marker, no swap
        let trace = record(Algorithm::Selection, &[1, 2]);
        assert_eq!(trace.len(), 4);
        // pre-swap marker highlights {i, min} = {0}
        let marker = trace.step(2).unwrap();
        assert_eq!(marker.highlights.len(), 1);
        assert!(marker.is_highlighted(0));
    }
}
