//! Selections over slices, emitted in lexicographic position order.

/// Every ordered selection of `k` distinct positions.
pub(crate) fn permutations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn extend<T: Clone>(items: &[T], k: usize, used: &mut Vec<bool>, current: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for index in 0..items.len() {
            if used[index] {
                continue;
            }
            used[index] = true;
            current.push(items[index].clone());
            extend(items, k, used, current, out);
            current.pop();
            used[index] = false;
        }
    }

    let mut out = Vec::new();
    if k > items.len() {
        return out;
    }
    extend(items, k, &mut vec![false; items.len()], &mut Vec::with_capacity(k), &mut out);
    out
}

/// Every unordered selection of `k` distinct positions.
pub(crate) fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn extend<T: Clone>(items: &[T], start: usize, k: usize, current: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for index in start..items.len() {
            current.push(items[index].clone());
            extend(items, index + 1, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if k > items.len() {
        return out;
    }
    extend(items, 0, k, &mut Vec::with_capacity(k), &mut out);
    out
}

/// Every unordered selection of `k` positions, each usable any number of times.
pub(crate) fn combinations_with_replacement<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn extend<T: Clone>(items: &[T], start: usize, k: usize, current: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for index in start..items.len() {
            current.push(items[index].clone());
            extend(items, index, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if items.is_empty() && k > 0 {
        return out;
    }
    extend(items, 0, k, &mut Vec::with_capacity(k), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_counts() {
        let items = [1, 2, 3];
        assert_eq!(permutations(&items, 3).len(), 6);
        assert_eq!(permutations(&items, 2).len(), 6);
        assert_eq!(permutations(&items, 0), vec![Vec::<i32>::new()]);
        assert!(permutations(&items, 4).is_empty());
    }

    #[test]
    fn combinations_keep_position_order() {
        assert_eq!(combinations(&[1, 2, 3], 2), vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
        assert_eq!(combinations(&[1, 2], 0), vec![Vec::<i32>::new()]);
    }

    #[test]
    fn combinations_with_replacement_repeat_items() {
        assert_eq!(
            combinations_with_replacement(&[7, 8], 2),
            vec![vec![7, 7], vec![7, 8], vec![8, 8]]
        );
        assert!(combinations_with_replacement::<i32>(&[], 1).is_empty());
        assert_eq!(combinations_with_replacement::<i32>(&[], 0), vec![Vec::<i32>::new()]);
    }
}
