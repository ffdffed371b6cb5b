//! Mathematical constants and accelerator defaults

/// The square root of π
pub const SQRT_PI: f64 = 1.772_453_850_905_515_9;
/// π²/6, the sum of the Basel series
pub const BASEL: f64 = 1.644_934_066_848_226_4;

/// Default upper bound on the raw terms an accelerator pulls
pub const DEFAULT_MAX_TERMS: usize = 64;
/// Default convergence threshold on successive estimates
pub const DEFAULT_TOLERANCE: f64 = 1E-12;
