//! The seam between the compiler and whatever executes a filter.
//!
//! A backend implements [`FilterBuilder`] once and receives each comparison
//! with its field path, comparator, placeholder index and bound value, then
//! combines the results with AND/OR in the shape the compiler emitted.
//! [`crate::render::SqlRenderer`] and [`crate::source::MatcherBuilder`] are the
//! two implementations shipped with the crate.

use crate::{
    ast::{Comparator, FieldPath},
    value::Value,
};

pub trait FilterBuilder {
    /// Backend representation of a (sub-)filter.
    type Filter;
    type Error;

    /// Builds a single `field op value` filter.
    ///
    /// `placeholder` is the value's index in the bound values; backends with
    /// numbered parameters use it, others may ignore it.
    fn comparison(
        &mut self,
        field: &FieldPath,
        op: Comparator,
        placeholder: usize,
        value: &Value,
    ) -> Result<Self::Filter, Self::Error>;

    fn and(&mut self, left: Self::Filter, right: Self::Filter) -> Result<Self::Filter, Self::Error>;

    fn or(&mut self, left: Self::Filter, right: Self::Filter) -> Result<Self::Filter, Self::Error>;
}
