pub mod conditions;
pub mod error;
pub mod id;
pub mod model;

pub use conditions::ConditionError;
pub use error::{CoreError, Result};
pub use id::{IdError, generate_id, validate_id};
pub use model::{Ambulance, Condition};
