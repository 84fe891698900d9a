mod objective_function;

pub use objective_function::ObjectiveFunction;
