// [crates/aibom-ml/src/lib.rs]
//! Training execution and model introspection, kept opaque: no concrete
//! ML framework is a dependency of this crate. `TrainingExecutor` and
//! `ModelIntrospector` are the boundary; the only implementation shipped
//! here is a mock that exercises the rest of the pipeline.

pub mod device;
pub mod error;
pub mod executor;
pub mod introspector;
pub mod shape;

pub use device::{select_device, Device, DeviceAvailability};
pub use error::MlError;
pub use executor::{MockTrainingExecutor, TrainingExecutor, TrainingOutcome, TrainingRequest};
pub use introspector::{DeclaredShapeIntrospector, ModelIntrospector};
pub use shape::{validate_shape, ShapeKind};
