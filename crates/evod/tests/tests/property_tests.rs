#[path = "property/champion_monotonicity.rs"]
mod champion_monotonicity;

#[path = "property/operator_idempotency.rs"]
mod operator_idempotency;

#[path = "property/zero_fitness_exclusion.rs"]
mod zero_fitness_exclusion;
