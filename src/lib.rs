/*!
geoform3d
=========

**geoform3d** builds 3D geotechnical structural models (buried pipes,
footings and backfill zones) inside a host modeling application, driven
by parametric shape descriptions.

The host application is an external collaborator reached through the
narrow capability trait in [`session`]; everything else is the geometric
core: vector/point/bounding-box algebra ([`math`], [`bounding_volume`]),
the cut/skew-cut partition engine ([`partition`]), the pipe/footing shape
composer ([`shape`]) and the staged-construction phase tree ([`phase`]).
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[cfg_attr(test, macro_use)]
extern crate approx;
extern crate num_traits as num;

pub extern crate either;
pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod math;
pub mod partition;
pub mod phase;
pub mod session;
pub mod shape;
