//! GPS coordinate normalization.
//!
//! EXIF stores a GPS position as two degree/minute/second triples of
//! unsigned rationals plus a hemisphere reference character per axis.
//! This module turns them into:
//! - Signed decimal degrees for tables and map plotting
//! - A compact `"deg;min;sec"` string for storage, with a parser back to decimal
//!
//! # Examples
//!
//! ```ignore
//! use roadscan_core::coordinate::{to_decimal, Hemisphere, RawGpsValue};
//!
//! let raw = RawGpsValue::from_tuples((40, 1), (26, 1), (46, 1));
//! let lat = to_decimal(&raw, Some(Hemisphere::South))?;
//! assert!((lat.degrees + 40.446).abs() < 1e-3);
//! ```

mod decimal;
mod sexagesimal;
mod types;

pub use decimal::{resolve_axis, to_decimal};
pub use sexagesimal::{from_sexagesimal_string, to_sexagesimal_string};
pub use types::{
    Axis, ConversionError, DmsComponent, GeoCoordinate, Hemisphere, Rational, RawGpsValue,
    LAT_MAX, LON_MAX,
};

pub(crate) use sexagesimal::format_magnitude;
