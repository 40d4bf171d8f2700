//! Record types for the student registry and the field rules every stored
//! record must satisfy.

pub mod errors;
pub mod student;

pub use errors::{FieldError, ModelError};
pub use student::{NewStudent, Student, StudentPatch};
