//! Store constraint construction for page and count queries.
//!
//! Page queries carry `[predicates..., orderBy, anchor?, limit]` in exactly
//! that order. Count queries carry the same predicates and nothing else, so
//! the count always describes the set the page is drawn from.

use pager_core::{
    CollectionDescriptor, CollectionRef, Constraint, Direction, Filters, PageRequest, Query,
};
use tracing::debug;

/// Equality predicates for a list: the descriptor's base filters, then the
/// caller filters the descriptor recognizes, in key order.
#[must_use]
pub fn filter_predicates(descriptor: &CollectionDescriptor, filters: &Filters) -> Vec<Constraint> {
    let mut predicates: Vec<Constraint> = descriptor
        .base_filters()
        .iter()
        .map(|(field, value)| Constraint::equal(field.clone(), value.clone()))
        .collect();

    for (key, value) in filters.iter() {
        if descriptor.recognizes(key) {
            predicates.push(Constraint::equal(key, value.clone()));
        } else {
            debug!(
                collection = descriptor.name(),
                filter = key,
                "ignoring unrecognized filter"
            );
        }
    }

    predicates
}

/// Full constraint list for one page window.
///
/// The window asks for `page_size + 1` records; the extra one is the
/// sentinel that reveals whether another page exists in that direction.
#[must_use]
pub fn window_constraints(
    descriptor: &CollectionDescriptor,
    filters: &Filters,
    request: &PageRequest,
) -> Vec<Constraint> {
    let mut constraints = filter_predicates(descriptor, filters);

    constraints.push(Constraint::order_by(
        descriptor.sort_field(),
        descriptor.sort_direction(),
    ));

    if let Some(cursor) = &request.cursor {
        constraints.push(match request.direction {
            Direction::Forward => Constraint::AnchorAfter(cursor.clone()),
            Direction::Backward => Constraint::AnchorBefore(cursor.clone()),
        });
    }

    let window = request.page_size as usize + 1;
    constraints.push(match request.direction {
        Direction::Forward => Constraint::LimitFromHead(window),
        Direction::Backward => Constraint::LimitFromTail(window),
    });

    constraints
}

/// Query for one page window.
#[must_use]
pub fn page_query(
    descriptor: &CollectionDescriptor,
    filters: &Filters,
    request: &PageRequest,
) -> Query {
    Query::new(
        CollectionRef::new(descriptor.name()),
        window_constraints(descriptor, filters, request),
    )
}

/// Query counting every document the list could page over.
#[must_use]
pub fn count_query(descriptor: &CollectionDescriptor, filters: &Filters) -> Query {
    Query::new(
        CollectionRef::new(descriptor.name()),
        filter_predicates(descriptor, filters),
    )
}
