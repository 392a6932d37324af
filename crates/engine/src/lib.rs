//! # Lazyprov Engine
//!
//! A lazy value-provider algebra for build configuration. Providers are deferred computations
//! that may or may not yield a value; they compose into immutable graphs that can be queried for
//! presence, forced for a value, asked which build actions produce them, and folded into a
//! simpler execution-time form for caching.
//!
//! ## Usage
//!
//! ```rust
//! use lazyprov_engine::{ExecutionTimeValue, ProviderRef};
//!
//! let configured = ProviderRef::<String>::missing_named("property 'greeting'");
//! let greeting = configured.or_else_value("hello".to_string()).map(|text| text.to_uppercase());
//!
//! assert_eq!(greeting.get()?, "HELLO");
//! assert_eq!(greeting.fold_execution_time()?, ExecutionTimeValue::fixed("HELLO".to_string()));
//! assert_eq!(greeting.to_string(), "map(or(property 'greeting', fixed(String, \"hello\")))");
//! # Ok::<(), lazyprov_engine::ProviderError>(())
//! ```
//!
//! ## Architecture
//!
//! - **`value`**: materialized results and missing-value diagnostics
//! - **`producer`** / **`task`**: structural dependency information
//! - **`execution_time`**: folded snapshots of provider chains
//! - **`provider`**: the provider contract, leaves and combinators
//! - **`evaluator`**: settings-aware facade for collaborators
//! - **`error`**: failures surfaced by queries

pub mod error;
pub mod evaluator;
pub mod execution_time;
mod guard;
pub mod producer;
pub mod provider;
pub mod task;
pub mod value;

pub use error::{MissingValueError, ProviderError};
pub use evaluator::{ProducerSummary, ProviderEvaluator};
pub use execution_time::ExecutionTimeValue;
pub use guard::CIRCULAR_REFERENCE;
pub use lazyprov_types::{TaskPath, TypeDescriptor, ValueConsumer};
pub use producer::ValueProducer;
pub use provider::{
    ChangingProvider, ConvertedProvider, FixedProvider, FlatMapProvider, MapProvider, MissingProvider, OrElseProvider,
    Provider, ProviderRef, ProviderValue, TaskOutputProvider, WeakProviderRef, ZipProvider,
};
pub use task::TaskHandle;
pub use value::{MissingDiagnostic, Value};
