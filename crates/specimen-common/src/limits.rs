//! Centralized limits and thresholds for the specimen pipeline.
//!
//! # Categories
//!
//! - **Recursion Depths**: guards against runaway recursion in type lowering
//!   and (opt-in) description generation
//! - **Generation Defaults**: counts and ranges used by the specimen factory

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for generic alias expansion during lowering.
///
/// Generic aliases whose body is not an object literal are expanded by
/// substitution. A self-referential alias keeps expanding; past this depth the
/// expansion degrades to an unknown type.
///
/// # TypeScript example
///
/// ```typescript
/// type Nest<T> = Nest<T[]>;
/// type Boom = Nest<string>;
/// //   ~~~~ TS2589 in tsc; lowers to `unknown` here
/// ```
pub const MAX_INSTANTIATION_DEPTH: u32 = 50;

/// Suggested bound for [`DescribeOptions::max_depth`] when callers opt in to
/// the description recursion guard.
///
/// Description generation is unbounded by default: a cyclic generic shape such
/// as `interface Node<T> { next: Node<T> }` recurses until the stack is
/// exhausted. Callers that describe untrusted declarations should set a depth.
///
/// [`DescribeOptions::max_depth`]: ../../specimen_solver/describe/struct.DescribeOptions.html
pub const DEFAULT_DESCRIBE_DEPTH: u32 = 64;

// =============================================================================
// Generation Defaults
// =============================================================================

/// Number of elements generated for an `Array`-flagged description under the
/// default (fixed) array-length policy.
pub const ARRAY_VALUE_COUNT: usize = 5;

/// Inclusive upper bound for generated numbers. Numbers are integral values in
/// `[0, NUMBER_UPPER_BOUND]`.
pub const NUMBER_UPPER_BOUND: u64 = 10_000_000_000;
