//! Small shared types: Terraform values, wire tri-state fields and the
//! closed enums the converters validate against.
//!
//! Naming:
//! - Terraform state uses lowercase identity and filter kinds (`group`, `tag`).
//! - The wire uses uppercase identity kinds (`GROUP`) and encodes filter kinds
//!   in tag names (`__id`, `__name`).

mod filter_kind;
mod http_method;
mod identity_type;
mod nullable;
mod schedule;
mod value;

pub use filter_kind::{FilterKind, ID_TAG, NAME_TAG};
pub use http_method::HttpMethod;
pub use identity_type::IdentityType;
pub use nullable::Nullable;
pub use schedule::{DayOfWeek, format_time_of_day, parse_time_of_day};
pub use value::Value;
