//! Insertion sort.
//!
//! Shifting a larger element right is recorded as a swap with the key, so
//! the key stays visible while it travels to its slot.

use crate::recorder::StepRecorder;

pub(crate) fn sort(rec: &mut StepRecorder) {
    let n = rec.arr.len();

    for i in 1..n {
        let key = rec.arr[i];
        // `slot` is where the key currently sits
        let mut slot = i;

        rec.mark([i]);

        while slot > 0 && rec.arr[slot - 1] > key {
            rec.mark([slot - 1, slot]);
            rec.arr.swap(slot - 1, slot);
            rec.mark([slot - 1, slot]);
            slot -= 1;
        }

        rec.mark([slot]);
    }
}

#[cfg(test)]
mod tests {
    use crate::record;
    use sortlab_core::Algorithm;

    #[test]
    fn test_insertion_two_elements() {
        let trace = record(Algorithm::Insertion, &[2, 1]);
        let highlights: Vec<Vec<usize>> = trace
            .steps()
            .iter()
            .map(|s| s.highlights.iter().copied().collect())
            .collect();

        assert_eq!(
            highlights,
            vec![vec![], vec![1], vec![0, 1], vec![0, 1], vec![0], vec![]]
        );
        assert_eq!(trace.step(3).unwrap().snapshot, vec![1, 2]);
    }

    #[test]
    fn test_key_lands_after_equal_elements() {
        let trace = record(Algorithm::Insertion, &[4, 4, 1]);
        assert_eq!(trace.last().snapshot, vec![1, 4, 4]);
        // i = 1 placement: equal predecessor does not shift
        let placed = trace.step(2).unwrap();
        assert!(placed.is_highlighted(1));
        assert_eq!(placed.highlights.len(), 1);
    }
}
