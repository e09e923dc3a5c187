//! Filter half of the list pipeline.
//!
//! An [`ItemQuery`] holds the optional text search and the category/service
//! name filters. It can be evaluated against an in-memory record
//! ([`ItemQuery::matches`]) or turned into a SeaORM condition
//! ([`ItemQuery::condition`]).
//!
//! Case folding follows the backend's `LOWER`. Postgres folds Unicode, the
//! same as [`ItemQuery::matches`]. SQLite folds ASCII only, so there `école`
//! does not find `ÉCOLE` while `École` still finds `École`.

use std::cmp::Ordering;

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, DbBackend};

use models::{category, portfolio_item, service};

use super::domain::ItemRecord;
use crate::errors::ServiceError;

pub const SEARCH_QUERY_REQUIRED: &str = "Search query is required";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemQuery {
    text: Option<String>,
    category: Option<String>,
    service: Option<String>,
    category_id: Option<i32>,
}

impl ItemQuery {
    /// Combined search + filters. Blank values mean "no filter".
    pub fn new(text: Option<&str>, category: Option<&str>, service: Option<&str>) -> Self {
        Self {
            text: normalize(text),
            category: normalize(category),
            service: normalize(service),
            category_id: None,
        }
    }

    /// Text search where a blank query is a caller error.
    pub fn search(text: Option<&str>) -> Result<Self, ServiceError> {
        let query = Self::new(text, None, None);
        if query.text.is_none() {
            return Err(ServiceError::Validation(SEARCH_QUERY_REQUIRED.into()));
        }
        Ok(query)
    }

    /// Equality filters only.
    pub fn filter(category: Option<&str>, service: Option<&str>) -> Self {
        Self::new(None, category, service)
    }

    /// Items of one already-resolved category.
    pub fn in_category(category_id: i32) -> Self {
        Self { category_id: Some(category_id), ..Self::default() }
    }

    pub fn text(&self) -> Option<&str> { self.text.as_deref() }

    pub fn category(&self) -> Option<&str> { self.category.as_deref() }

    pub fn service(&self) -> Option<&str> { self.service.as_deref() }

    pub fn is_unfiltered(&self) -> bool {
        self.text.is_none() && self.category.is_none() && self.service.is_none() && self.category_id.is_none()
    }

    pub fn matches(&self, record: &ItemRecord) -> bool {
        if let Some(id) = self.category_id {
            if record.category.id != id {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let hit = record.item.title.to_lowercase().contains(&needle)
                || record.item.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(name) = &self.category {
            if !eq_ignore_case(&record.category.name, name) {
                return false;
            }
        }
        if let Some(name) = &self.service {
            match &record.service {
                Some(s) if eq_ignore_case(&s.service.name, name) => {}
                _ => return false,
            }
        }
        true
    }

    /// Condition over `portfolio_item` joined with `category` (inner) and
    /// `service` (left). Needles are folded the way `backend` folds columns.
    pub fn condition(&self, backend: DbBackend) -> Condition {
        let mut cond = Condition::all();
        if let Some(id) = self.category_id {
            cond = cond.add(portfolio_item::Column::CategoryId.eq(id));
        }
        if let Some(text) = &self.text {
            let pattern = format!("%{}%", escape_like(&fold_case(backend, text)));
            cond = cond.add(
                Condition::any()
                    .add(lower_col(portfolio_item::Entity, portfolio_item::Column::Title).like(like(&pattern)))
                    .add(lower_col(portfolio_item::Entity, portfolio_item::Column::Description).like(like(&pattern))),
            );
        }
        if let Some(name) = &self.category {
            cond = cond.add(lower_col(category::Entity, category::Column::Name).eq(fold_case(backend, name)));
        }
        if let Some(name) = &self.service {
            cond = cond.add(lower_col(service::Entity, service::Column::Name).eq(fold_case(backend, name)));
        }
        cond
    }
}

/// Newest upload first; equal timestamps fall back to the higher id.
pub fn newest_first(a: &ItemRecord, b: &ItemRecord) -> Ordering {
    b.item
        .upload_date
        .cmp(&a.item.upload_date)
        .then_with(|| b.item.id.cmp(&a.item.id))
}

/// Lowercase `raw` the way `LOWER()` does on `backend`.
pub(crate) fn fold_case(backend: DbBackend, raw: &str) -> String {
    match backend {
        DbBackend::Sqlite => raw.to_ascii_lowercase(),
        _ => raw.to_lowercase(),
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// `LOWER(table.column)` as an expression.
pub(crate) fn lower_col<T, C>(table: T, column: C) -> Expr
where
    T: sea_orm::sea_query::IntoIden + 'static,
    C: sea_orm::sea_query::IntoIden + 'static,
{
    Expr::expr(SimpleExpr::from(Func::lower(Expr::col((table, column)))))
}

fn like(pattern: &str) -> LikeExpr {
    LikeExpr::new(pattern).escape('\\')
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn normalize(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
