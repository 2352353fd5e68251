//! Resource filters on the wire.
//!
//! The API has no notion of filter kinds; it takes a flat list of tags.
//! `id` and `name` filters travel as the reserved tags `__id` and `__name`,
//! `tag` filters as a tag named after their key.

use crate::api::models::Tag;
use crate::error::ProviderError;
use crate::models::ResourceFilter;
use crate::types::FilterKind;

/// Encode configured filters as wire tags, preserving order.
pub fn filters_to_tags(filters: &[ResourceFilter]) -> Result<Vec<Tag>, ProviderError> {
    filters.iter().map(filter_to_tag).collect()
}

/// Decode wire tags back into filters, preserving order.
pub fn tags_to_filters(tags: &[Tag]) -> Vec<ResourceFilter> {
    tags.iter().map(tag_to_filter).collect()
}

fn filter_to_tag(filter: &ResourceFilter) -> Result<Tag, ProviderError> {
    let kind = FilterKind::parse(&filter.kind)?;
    match kind.reserved_tag() {
        Some(reserved) => Ok(Tag::new(reserved, filter.value.as_str())),
        None => match filter.key.as_deref() {
            Some(key) if !key.is_empty() => Ok(Tag::new(key, filter.value.as_str())),
            _ => Err(ProviderError::MissingFilterKey {
                value: filter.value.clone(),
            }),
        },
    }
}

fn tag_to_filter(tag: &Tag) -> ResourceFilter {
    match FilterKind::from_tag_name(&tag.name) {
        FilterKind::Id => ResourceFilter::id(tag.value.as_str()),
        FilterKind::Name => ResourceFilter::name(tag.value.as_str()),
        FilterKind::Tag => ResourceFilter::tag(tag.name.as_str(), tag.value.as_str()),
    }
}
