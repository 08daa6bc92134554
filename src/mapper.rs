//! Conversions between storage records and transport objects.
//!
//! The concrete field mappings live in `From` impls next to each VO; these
//! helpers lift them over optional values and sequences.

/// Maps a single value, passing `None` through.
pub fn parse_object<O, D>(origin: Option<O>) -> Option<D>
where
    D: From<O>,
{
    origin.map(D::from)
}

/// Maps every element, keeping order.
pub fn parse_list_objects<O, D, I>(origin: I) -> Vec<D>
where
    I: IntoIterator<Item = O>,
    D: From<O>,
{
    origin.into_iter().map(D::from).collect()
}
