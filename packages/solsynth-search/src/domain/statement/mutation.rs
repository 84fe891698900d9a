//! Statement mutation
//!
//! Mutation never edits in place: it returns a new tree in which every
//! changed statement carries a fresh id, so decoding declares it anew.

use num_bigint::BigInt;
use rand::Rng;

use super::{BoolStatement, BytesStatement, IntegerStatement, NumericStatement, Statement, StringStatement};
use crate::domain::bounds::type_bounds;
use crate::domain::statement_pool::StatementPool;
use crate::error::SearchResult;
use crate::ports::Sampler;

impl Statement {
    /// Mutated copy of this statement at tree depth `depth`
    ///
    /// Past the configured maximum depth the statement is resampled.
    pub fn mutate(
        &self,
        sampler: &mut dyn Sampler,
        pool: &StatementPool,
        depth: usize,
    ) -> SearchResult<Statement> {
        if depth >= sampler.config().max_depth {
            return self.resample(sampler, pool, depth);
        }

        match self {
            Statement::Bool(s) => {
                let flipped = Statement::Bool(BoolStatement::new(!s.value));
                Ok(flipped.with_id(sampler.next_id()))
            }
            Statement::Integer(s) => {
                let delta_probability = sampler.config().delta_mutation_probability;
                if sampler.rng().gen_bool(delta_probability) {
                    let (min, max) = type_bounds(s.signed, s.bits);
                    let value = delta_step(sampler, &s.value, &min, &max);
                    let mutated = Statement::Integer(IntegerStatement::new(s.signed, s.bits, value));
                    Ok(mutated.with_id(sampler.next_id()))
                } else {
                    self.resample(sampler, pool, depth)
                }
            }
            Statement::Numeric(s) => {
                let delta_probability = sampler.config().delta_mutation_probability;
                if sampler.rng().gen_bool(delta_probability) {
                    let (min, max) = type_bounds(s.signed, s.bits);
                    let units = delta_step(sampler, &s.units, &min, &max);
                    let mutated = Statement::Numeric(NumericStatement::new(s.signed, s.bits, s.decimals, units));
                    Ok(mutated.with_id(sampler.next_id()))
                } else {
                    self.resample(sampler, pool, depth)
                }
            }
            Statement::String(s) => {
                let resample_probability = sampler.config().resample_probability;
                if sampler.rng().gen_bool(resample_probability) {
                    return self.resample(sampler, pool, depth);
                }
                let mutated = Statement::String(StringStatement::new(edit_string(sampler, &s.value)));
                Ok(mutated.with_id(sampler.next_id()))
            }
            Statement::Bytes(s) => {
                let resample_probability = sampler.config().resample_probability;
                if s.value.is_empty() || sampler.rng().gen_bool(resample_probability) {
                    return self.resample(sampler, pool, depth);
                }
                let mut value = s.value.clone();
                let at = sampler.rng().gen_range(0..value.len());
                value[at] = sampler.rng().gen();
                Ok(Statement::Bytes(BytesStatement::new(s.size, value)).with_id(sampler.next_id()))
            }
            Statement::Address(_) => self.resample(sampler, pool, depth),
            Statement::ConstructorCall(_) | Statement::FunctionCall(_) => {
                let resample_probability = sampler.config().resample_probability;
                if sampler.rng().gen_bool(resample_probability) {
                    return self.resample(sampler, pool, depth);
                }
                self.mutate_child(sampler, pool, depth)
            }
            Statement::Mapping(_) | Statement::Array(_) => {
                if !self.has_children() {
                    return Ok(self.copy());
                }
                self.mutate_child(sampler, pool, depth)
            }
        }
    }

    /// Copy under a fresh id with one uniformly chosen child mutated
    fn mutate_child(
        &self,
        sampler: &mut dyn Sampler,
        pool: &StatementPool,
        depth: usize,
    ) -> SearchResult<Statement> {
        let index = sampler.rng().gen_range(0..self.child_count());
        let mut mutated = self.copy().with_id(sampler.next_id());
        let child = match self.child(index) {
            Some(child) => child.mutate(sampler, pool, depth + 1)?,
            None => return Ok(mutated),
        };
        mutated.set_child(index, child)?;
        Ok(mutated)
    }

    /// New statement of the same kind and type
    fn resample(
        &self,
        sampler: &mut dyn Sampler,
        pool: &StatementPool,
        depth: usize,
    ) -> SearchResult<Statement> {
        match self {
            Statement::ConstructorCall(call) => {
                sampler.sample_constructor_call(call.contract_id(), depth, pool)
            }
            Statement::FunctionCall(call) => sampler.sample_function_call(&call.function, depth, pool),
            // Containers are never sampled; keep them as they are
            Statement::Mapping(_) | Statement::Array(_) => Ok(self.copy()),
            other => match other.type_descriptor() {
                Some(type_descriptor) => sampler.sample_argument(&type_descriptor, depth, pool),
                None => Ok(other.copy()),
            },
        }
    }
}

/// `value ± d` with `d` in `1..=max_delta`, clamped to `[min, max]`
fn delta_step(sampler: &mut dyn Sampler, value: &BigInt, min: &BigInt, max: &BigInt) -> BigInt {
    let max_delta = sampler.config().max_delta.max(1);
    let delta = BigInt::from(sampler.rng().gen_range(1..=max_delta));
    let stepped = if sampler.rng().gen_bool(0.5) {
        value + delta
    } else {
        value - delta
    };
    if &stepped < min {
        min.clone()
    } else if &stepped > max {
        max.clone()
    } else {
        stepped
    }
}

/// Insert, replace or delete one character
fn edit_string(sampler: &mut dyn Sampler, value: &str) -> String {
    let alphabet: Vec<char> = sampler.config().string_alphabet.chars().collect();
    let mut chars: Vec<char> = value.chars().collect();
    let operation = if chars.is_empty() {
        0
    } else {
        sampler.rng().gen_range(0..3)
    };
    match operation {
        0 | 1 if alphabet.is_empty() => {}
        0 => {
            let at = sampler.rng().gen_range(0..=chars.len());
            let c = alphabet[sampler.rng().gen_range(0..alphabet.len())];
            chars.insert(at, c);
        }
        1 => {
            let at = sampler.rng().gen_range(0..chars.len());
            chars[at] = alphabet[sampler.rng().gen_range(0..alphabet.len())];
        }
        _ => {
            let at = sampler.rng().gen_range(0..chars.len());
            chars.remove(at);
        }
    }
    chars.into_iter().collect()
}
