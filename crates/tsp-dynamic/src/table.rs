use std::mem::size_of;

use tsp_core::TspError;

pub(crate) const NO_PREDECESSOR: u8 = u8::MAX;

const BYTES_PER_STATE: usize = size_of::<f64>() + size_of::<u8>();

/// Bit for city `city` in a visited mask. City 0 is the fixed start and has
/// no bit.
#[inline(always)]
pub(crate) fn city_bit(city: usize) -> usize {
    1 << (city - 1)
}

/// Bytes needed by the cost and predecessor tables for `cities` cities, or
/// `None` when that does not fit in a `usize`.
pub fn table_bytes(cities: usize) -> Option<usize> {
    let shift = u32::try_from(cities.checked_sub(1)?).ok()?;
    let masks = 1usize.checked_shl(shift)?;
    masks.checked_mul(cities)?.checked_mul(BYTES_PER_STATE)
}

/// Flat arena holding one cost and one predecessor per `(mask, last city)`
/// state, indexed by `mask * n + city`.
///
/// `mask` ranges over subsets of cities `1..n`. A cost of `f64::INFINITY`
/// marks an unreachable state.
pub(crate) struct HeldKarpTable {
    cost: Vec<f64>,
    parent: Vec<u8>,
    n: usize,
    full_mask: usize,
}

impl HeldKarpTable {
    pub fn allocate(n: usize, max_bytes: Option<usize>) -> Result<Self, TspError> {
        let exhausted = |bytes| TspError::ResourceExhausted { cities: n, bytes };

        let bytes = table_bytes(n).ok_or_else(|| exhausted(usize::MAX))?;
        if max_bytes.is_some_and(|limit| bytes > limit) {
            return Err(exhausted(bytes));
        }

        let masks = 1usize << (n - 1);
        let states = masks * n;

        let mut cost = Vec::new();
        cost.try_reserve_exact(states).map_err(|_| exhausted(bytes))?;
        cost.resize(states, f64::INFINITY);

        let mut parent = Vec::new();
        parent.try_reserve_exact(states).map_err(|_| exhausted(bytes))?;
        parent.resize(states, NO_PREDECESSOR);

        Ok(Self {
            cost,
            parent,
            n,
            full_mask: masks - 1,
        })
    }

    #[inline(always)]
    pub fn full_mask(&self) -> usize {
        self.full_mask
    }

    #[inline(always)]
    fn idx(&self, mask: usize, city: usize) -> usize {
        mask * self.n + city
    }

    #[inline(always)]
    pub fn cost(&self, mask: usize, city: usize) -> f64 {
        self.cost[self.idx(mask, city)]
    }

    #[inline(always)]
    pub fn parent(&self, mask: usize, city: usize) -> u8 {
        self.parent[self.idx(mask, city)]
    }

    #[inline(always)]
    pub fn set(&mut self, mask: usize, city: usize, cost: f64, parent: u8) {
        let idx = self.idx(mask, city);
        self.cost[idx] = cost;
        self.parent[idx] = parent;
    }
}
