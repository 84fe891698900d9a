//! Literal constant pool
//!
//! Four ordered frequency maps. Ordering keeps seeded draws reproducible
//! across runs; the pool is read-only once analysis finishes.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use rand::seq::SliceRandom;
use rand::Rng;

use super::literal::LiteralValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantPool {
    numeric: BTreeMap<String, usize>,
    integer: BTreeMap<BigInt, usize>,
    string: BTreeMap<String, usize>,
    address: BTreeMap<String, usize>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_numeric(&mut self, value: impl Into<String>) {
        *self.numeric.entry(value.into()).or_insert(0) += 1;
    }

    pub fn add_integer(&mut self, value: BigInt) {
        *self.integer.entry(value).or_insert(0) += 1;
    }

    pub fn add_string(&mut self, value: impl Into<String>) {
        *self.string.entry(value.into()).or_insert(0) += 1;
    }

    pub fn add_address(&mut self, value: impl Into<String>) {
        *self.address.entry(value.into()).or_insert(0) += 1;
    }

    /// Record an interpreted number literal
    ///
    /// Integers also feed the numeric map so fixed-point types can draw them.
    pub fn add_literal(&mut self, literal: LiteralValue) {
        match literal {
            LiteralValue::Integer(value) => {
                self.add_numeric(value.to_string());
                self.add_integer(value);
            }
            LiteralValue::Fixed(text) => self.add_numeric(text),
            LiteralValue::Address(text) => self.add_address(text),
        }
    }

    pub fn numeric_count(&self, value: &str) -> usize {
        self.numeric.get(value).copied().unwrap_or(0)
    }

    pub fn integer_count(&self, value: &BigInt) -> usize {
        self.integer.get(value).copied().unwrap_or(0)
    }

    pub fn string_count(&self, value: &str) -> usize {
        self.string.get(value).copied().unwrap_or(0)
    }

    pub fn address_count(&self, value: &str) -> usize {
        self.address.get(value).copied().unwrap_or(0)
    }

    pub fn numerics(&self) -> impl Iterator<Item = (&String, usize)> {
        self.numeric.iter().map(|(k, v)| (k, *v))
    }

    pub fn integers(&self) -> impl Iterator<Item = (&BigInt, usize)> {
        self.integer.iter().map(|(k, v)| (k, *v))
    }

    pub fn strings(&self) -> impl Iterator<Item = (&String, usize)> {
        self.string.iter().map(|(k, v)| (k, *v))
    }

    pub fn addresses(&self) -> impl Iterator<Item = (&String, usize)> {
        self.address.iter().map(|(k, v)| (k, *v))
    }

    /// Distinct values over all four maps
    pub fn len(&self) -> usize {
        self.numeric.len() + self.integer.len() + self.string.len() + self.address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn random_numeric<R: Rng + ?Sized>(&self, rng: &mut R, weighted: bool) -> Option<String> {
        draw(self.numeric.iter(), rng, weighted).cloned()
    }

    pub fn random_integer<R: Rng + ?Sized>(&self, rng: &mut R, weighted: bool) -> Option<BigInt> {
        draw(self.integer.iter(), rng, weighted).cloned()
    }

    /// Draw among integers inside `[min, max]`
    pub fn random_integer_within<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        weighted: bool,
        min: &BigInt,
        max: &BigInt,
    ) -> Option<BigInt> {
        let candidates = self
            .integer
            .iter()
            .filter(|(value, _)| *value >= min && *value <= max);
        draw(candidates, rng, weighted).cloned()
    }

    pub fn random_string<R: Rng + ?Sized>(&self, rng: &mut R, weighted: bool) -> Option<String> {
        draw(self.string.iter(), rng, weighted).cloned()
    }

    pub fn random_address<R: Rng + ?Sized>(&self, rng: &mut R, weighted: bool) -> Option<String> {
        draw(self.address.iter(), rng, weighted).cloned()
    }

    /// Add counts of another pool
    pub fn merge(&mut self, other: &ConstantPool) {
        for (k, v) in &other.numeric {
            *self.numeric.entry(k.clone()).or_insert(0) += v;
        }
        for (k, v) in &other.integer {
            *self.integer.entry(k.clone()).or_insert(0) += v;
        }
        for (k, v) in &other.string {
            *self.string.entry(k.clone()).or_insert(0) += v;
        }
        for (k, v) in &other.address {
            *self.address.entry(k.clone()).or_insert(0) += v;
        }
    }
}

/// One draw: uniform over distinct values, or proportional to counts
fn draw<'a, K, I, R>(entries: I, rng: &mut R, weighted: bool) -> Option<&'a K>
where
    K: 'a,
    I: Iterator<Item = (&'a K, &'a usize)>,
    R: Rng + ?Sized,
{
    let entries: Vec<(&K, usize)> = entries.map(|(k, v)| (k, *v)).collect();
    if entries.is_empty() {
        return None;
    }
    if !weighted {
        let index = rng.gen_range(0..entries.len());
        return Some(entries[index].0);
    }

    // Counts start at 1, so the weights never sum to zero
    entries
        .choose_weighted(rng, |(_, count)| *count)
        .ok()
        .map(|(value, _)| *value)
}
