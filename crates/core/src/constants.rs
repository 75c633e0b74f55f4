/// Tolerance when checking that sleeve weights add up to 100%
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Tolerance when comparing a member's declared weight with its sleeve weight
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Currency the built-in catalog is quoted in
pub const BASE_CURRENCY: &str = "KRW";
