/*
 * Random Sampler
 *
 * Builds statements for catalog targets. Every sampling call takes the
 * statement pool it may reuse from; with the configured probability a
 * pooled statement of the requested type is returned before anything is
 * built fresh.
 *
 * Fresh values:
 * - integers / fixed-point: constant pool (within the type range), else
 *   uniform within the type range capped at 2^cap_bits - 1
 * - addresses: constant pool, else an account index (negative indices
 *   become literal addresses)
 * - strings: constant pool, else random length from the alphabet
 * - bytes: uniform bytes of the declared or a random length
 *
 * Contract references, user-defined types, function types, mappings and
 * arrays fail with `UnsupportedType`.
 */

use std::sync::Arc;

use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Zero};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use solsynth_ir::config::{SamplingConfig, Validatable};
use solsynth_ir::{ConstantPool, FunctionTarget, ProjectAnalysis, TargetCatalog, TypeDescriptor, ValidatedConfig};
use tracing::{debug, warn};

use crate::domain::bounds::{parse_decimal, sampling_bounds, type_bounds};
use crate::domain::{
    AddressStatement, AddressValue, BoolStatement, BytesStatement, ConstructorCall, FunctionCall,
    IntegerStatement, NumericStatement, Statement, StatementPool, StringStatement, TestCase,
};
use crate::error::{ErrorKind, SearchError, SearchResult};
use crate::ports::Sampler;

pub struct RandomSampler {
    catalog: Arc<TargetCatalog>,
    constants: Arc<ConstantPool>,
    config: SamplingConfig,
    /// Frequency-weighted constant draws
    weighted: bool,
    /// Root choices: deployable contract ids and actionable functions
    deployable: Vec<String>,
    actions: Vec<FunctionTarget>,
    rng: ChaCha8Rng,
}

impl RandomSampler {
    /// Fails when `config` has values outside their valid ranges
    pub fn new(
        catalog: Arc<TargetCatalog>,
        constants: Arc<ConstantPool>,
        config: SamplingConfig,
    ) -> SearchResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let deployable = catalog
            .deployable_contracts()
            .into_iter()
            .map(|c| c.id.clone())
            .collect();
        let actions = catalog.actionable_functions().into_iter().cloned().collect();
        Ok(Self {
            catalog,
            constants,
            config,
            weighted: false,
            deployable,
            actions,
            rng,
        })
    }

    /// Sampler over a project analysis, configured from the validated config
    pub fn from_analysis(analysis: &ProjectAnalysis, config: &ValidatedConfig) -> SearchResult<Self> {
        let sampler = Self::new(
            Arc::new(analysis.catalog.clone()),
            Arc::new(analysis.constants.clone()),
            config.sampling(),
        )?;
        Ok(sampler.frequency_weighted(config.constant_pool().frequency_weighted))
    }

    pub fn frequency_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    pub fn catalog(&self) -> &TargetCatalog {
        &self.catalog
    }

    fn sample_integer(&mut self, signed: bool, bits: u16) -> BigInt {
        let (type_min, type_max) = type_bounds(signed, bits);
        if self.rng.gen_bool(self.config.constant_pool_probability) {
            if let Some(value) =
                self.constants
                    .random_integer_within(&mut self.rng, self.weighted, &type_min, &type_max)
            {
                return value;
            }
        }
        let (low, high) = sampling_bounds(signed, bits, self.config.magnitude_cap_bits);
        self.rng.gen_bigint_range(&low, &(high + 1))
    }

    /// Scaled units of a fixed-point value
    fn sample_fixed(&mut self, signed: bool, bits: u16, decimals: u8) -> BigInt {
        let (type_min, type_max) = type_bounds(signed, bits);
        if self.rng.gen_bool(self.config.constant_pool_probability) {
            if let Some(text) = self.constants.random_numeric(&mut self.rng, self.weighted) {
                match parse_decimal(&text, decimals) {
                    Some(units) if units >= type_min && units <= type_max => return units,
                    _ => warn!(constant = %text, bits, decimals, "numeric constant does not fit fixed-point type"),
                }
            }
        }
        let scale = BigInt::from(10u32).pow(u32::from(decimals));
        let cap = ((BigInt::one() << self.config.magnitude_cap_bits as usize) - 1) * scale;
        let max = if type_max < cap { type_max } else { cap };
        let low = if signed { -max.clone() } else { BigInt::zero() };
        self.rng.gen_bigint_range(&low, &(max + 1))
    }

    fn sample_address(&mut self, payable: bool) -> AddressStatement {
        if self.rng.gen_bool(self.config.constant_pool_probability) {
            if let Some(literal) = self.constants.random_address(&mut self.rng, self.weighted) {
                return AddressStatement::new(payable, AddressValue::Literal(literal));
            }
        }
        let (min, max) = (
            self.config.min_account_index.min(self.config.max_account_index),
            self.config.min_account_index.max(self.config.max_account_index),
        );
        let index = self.rng.gen_range(min..=max);
        AddressStatement::new(payable, AddressValue::from_index(index))
    }

    fn sample_string(&mut self) -> String {
        if self.rng.gen_bool(self.config.constant_pool_probability) {
            if let Some(value) = self.constants.random_string(&mut self.rng, self.weighted) {
                return value;
            }
        }
        let length = self.rng.gen_range(0..=self.config.string_max_length);
        let alphabet: Vec<char> = self.config.string_alphabet.chars().collect();
        if alphabet.is_empty() {
            return String::new();
        }
        (0..length)
            .map(|_| alphabet[self.rng.gen_range(0..alphabet.len())])
            .collect()
    }

    fn sample_bytes(&mut self, size: Option<u8>) -> BytesStatement {
        let length = match size {
            Some(size) => usize::from(size),
            None => self.rng.gen_range(0..=self.config.bytes_max_length),
        };
        let value = (0..length).map(|_| self.rng.gen::<u8>()).collect();
        BytesStatement::new(size, value)
    }

    fn sample_arguments(
        &mut self,
        function: &FunctionTarget,
        depth: usize,
        pool: &StatementPool,
    ) -> SearchResult<Vec<Statement>> {
        function
            .parameters
            .iter()
            .map(|p| self.sample_argument(&p.type_descriptor, depth + 1, pool))
            .collect()
    }
}

fn is_samplable(type_descriptor: &TypeDescriptor) -> bool {
    !matches!(
        type_descriptor,
        TypeDescriptor::Contract { .. }
            | TypeDescriptor::UserDefined { .. }
            | TypeDescriptor::Function
            | TypeDescriptor::Mapping { .. }
            | TypeDescriptor::Array { .. }
    )
}

impl Sampler for RandomSampler {
    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }

    fn config(&self) -> &SamplingConfig {
        &self.config
    }

    fn sample_test_case(&mut self) -> SearchResult<TestCase> {
        let count = self.rng.gen_range(1..=self.config.max_action_statements.max(1));
        let mut roots = Vec::with_capacity(count);
        let mut pool = StatementPool::new();
        for _ in 0..count {
            let root = self.sample_root(&pool)?;
            pool.add_tree(&root);
            roots.push(root);
        }
        debug!(roots = roots.len(), pooled = pool.len(), "sampled test case");
        let id = self.next_id();
        TestCase::with_id(id, roots)
    }

    fn sample_root(&mut self, pool: &StatementPool) -> SearchResult<Statement> {
        let total = self.deployable.len() + self.actions.len();
        if total == 0 {
            return Err(SearchError::new(
                ErrorKind::NoTargets,
                "catalog has no deployable contract and no callable function",
            ));
        }
        let pick = self.rng.gen_range(0..total);
        if pick < self.deployable.len() {
            let contract_id = self.deployable[pick].clone();
            self.sample_constructor_call(&contract_id, 0, pool)
        } else {
            let function = self.actions[pick - self.deployable.len()].clone();
            self.sample_function_call(&function, 0, pool)
        }
    }

    fn sample_constructor_call(
        &mut self,
        contract_id: &str,
        depth: usize,
        pool: &StatementPool,
    ) -> SearchResult<Statement> {
        let catalog = Arc::clone(&self.catalog);
        let contract = catalog
            .contract(contract_id)
            .ok_or_else(|| SearchError::unknown_target(contract_id))?;
        if !contract.is_deployable() {
            return Err(SearchError::new(
                ErrorKind::UnknownTarget,
                format!("contract '{}' cannot be deployed", contract.name),
            ));
        }
        let constructor = catalog
            .constructor_of(contract_id)
            .ok_or_else(|| SearchError::unknown_target(contract_id))?;

        let arguments = self.sample_arguments(&constructor, depth, pool)?;
        let sender = self.sample_sender(pool)?;
        let deployment = Statement::ConstructorCall(ConstructorCall::new(
            contract.name.clone(),
            constructor,
            arguments,
            sender,
        ));
        Ok(deployment.with_id(self.next_id()))
    }

    fn sample_function_call(
        &mut self,
        function: &FunctionTarget,
        depth: usize,
        pool: &StatementPool,
    ) -> SearchResult<Statement> {
        let catalog = Arc::clone(&self.catalog);
        let contract = catalog
            .contract(&function.contract_id)
            .ok_or_else(|| SearchError::unknown_target(&function.contract_id))?;

        let arguments = self.sample_arguments(function, depth, pool)?;
        let sender = self.sample_sender(pool)?;

        let reused = if !pool.candidates(&contract.name).is_empty()
            && self.rng.gen_bool(self.config.statement_pool_probability)
        {
            pool.random_where(&mut self.rng, &contract.name, |s| {
                matches!(s, Statement::ConstructorCall(c) if c.contract_id() == function.contract_id)
            })
        } else {
            None
        };
        let owner = match reused {
            Some(owner) => owner,
            None => self.sample_constructor_call(&function.contract_id, depth + 1, pool)?,
        };

        let call = Statement::FunctionCall(FunctionCall::new(function.clone(), arguments, sender, owner));
        Ok(call.with_id(self.next_id()))
    }

    fn sample_argument(
        &mut self,
        type_descriptor: &TypeDescriptor,
        _depth: usize,
        pool: &StatementPool,
    ) -> SearchResult<Statement> {
        let type_string = type_descriptor.type_string();
        if !is_samplable(type_descriptor) {
            return Err(SearchError::unsupported_type(type_descriptor.category(), &type_string));
        }
        if !pool.candidates(&type_string).is_empty()
            && self.rng.gen_bool(self.config.statement_pool_probability)
        {
            if let Some(statement) = pool.random(&mut self.rng, &type_string) {
                return Ok(statement);
            }
        }

        let statement = match type_descriptor {
            TypeDescriptor::Bool => Statement::Bool(BoolStatement::new(self.rng.gen_bool(0.5))),
            TypeDescriptor::Address { payable } => Statement::Address(self.sample_address(*payable)),
            TypeDescriptor::Int { signed, bits } => {
                let value = self.sample_integer(*signed, *bits);
                Statement::Integer(IntegerStatement::new(*signed, *bits, value))
            }
            TypeDescriptor::Fixed {
                signed,
                bits,
                decimals,
            } => {
                let units = self.sample_fixed(*signed, *bits, *decimals);
                Statement::Numeric(NumericStatement::new(*signed, *bits, *decimals, units))
            }
            TypeDescriptor::FixedBytes { size } => Statement::Bytes(self.sample_bytes(Some(*size))),
            TypeDescriptor::Bytes => Statement::Bytes(self.sample_bytes(None)),
            TypeDescriptor::String => {
                let value = self.sample_string();
                Statement::String(StringStatement::new(value))
            }
            other => {
                return Err(SearchError::unsupported_type(other.category(), &type_string));
            }
        };
        Ok(statement.with_id(self.next_id()))
    }

    fn sample_sender(&mut self, pool: &StatementPool) -> SearchResult<Statement> {
        self.sample_argument(&TypeDescriptor::Address { payable: false }, 0, pool)
    }
}
