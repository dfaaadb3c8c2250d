//! Shared types for linda
//!
//! This crate provides the tuple/template contract used by the tuple
//! space engine: bound [`Tuple`]s, [`Template`]s whose fields may be
//! type wildcards, structural matching, and the textual tuple format.
//!
//! ```
//! use linda_types::{FieldType, Field, Template, Tuple, Value};
//!
//! let tuple = Tuple::new(vec![Value::from("job"), Value::from(7)]);
//! let template = Template::new(vec![
//!     Field::bound("job"),
//!     Field::wildcard(FieldType::Integer),
//! ]);
//! assert!(tuple.matches(&template));
//!
//! let parsed: Template = "[ \"job\" ?Integer ]".parse().unwrap();
//! assert_eq!(parsed, template);
//! ```

mod error;
mod text;
mod tuple;
mod value;

pub use error::{Result, TupleError};
pub use text::{parse_template, parse_tuple};
pub use tuple::{Field, Template, Tuple};
pub use value::{FieldType, Value};
