/// Rearranges `items` into the next permutation in lexicographic order.
///
/// Returns `false`, leaving `items` untouched, when `items` is already the
/// last (descending) permutation.
pub fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }

    // Longest non-increasing suffix starts at `i`
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    // Rightmost element greater than the pivot
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }

    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// Every ordering of cities `1..cities`, lexicographic, starting from the
/// ascending one.
///
/// [`LexicographicPermutations::advance`] hands out a borrowed view so a
/// full enumeration reuses one buffer; the `Iterator` impl clones it.
#[derive(Clone, Debug)]
pub struct LexicographicPermutations {
    current: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl LexicographicPermutations {
    pub fn new(cities: usize) -> Self {
        Self {
            current: (1..cities.max(1)).collect(),
            started: false,
            exhausted: false,
        }
    }

    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }

        if self.started {
            if !next_permutation(&mut self.current) {
                self.exhausted = true;
                return None;
            }
        } else {
            self.started = true;
        }

        Some(&self.current)
    }

    /// Starts the sequence over from the ascending permutation.
    pub fn reset(&mut self) {
        self.current.sort_unstable();
        self.started = false;
        self.exhausted = false;
    }
}

impl Iterator for LexicographicPermutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }
}
