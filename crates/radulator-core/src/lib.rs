//! radulator-core
//!
//! The calculator definition vocabulary: input values, field descriptors,
//! visibility predicates, and computed outcomes. Pure data, no I/O. The
//! front end consumes the exported TypeScript bindings of these types.

pub mod error;
pub mod field;
pub mod outcome;
pub mod reference;
pub mod values;

pub use error::{CoreError, InputError};
pub use field::{Field, FieldKind, FieldOption, ScoreRange, ShowIf};
pub use outcome::{Outcome, Report, ResultRow, Severity};
pub use reference::{Info, Link, Reference};
pub use values::{Value, Values};
