use models::{category, portfolio_item, service};

use crate::pagination::PageMeta;

/// A service together with the category it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceRecord {
    pub service: service::Model,
    pub category: category::Model,
}

/// A portfolio item with its relations resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemRecord {
    pub item: portfolio_item::Model,
    pub category: category::Model,
    pub service: Option<ServiceRecord>,
}

/// One page of items, newest first.
#[derive(Clone, Debug)]
pub struct ItemPage {
    pub items: Vec<ItemRecord>,
    pub meta: PageMeta,
}
