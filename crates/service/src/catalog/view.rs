//! JSON views of catalog records.
//!
//! Categories and services are always nested objects. Image paths become
//! absolute URLs built from the request origin and the media URL prefix.

use serde::Serialize;
use url::Url;

use models::{category, service};

use super::domain::{ItemRecord, ServiceRecord};
use crate::errors::ServiceError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub display_order: i32,
}

impl From<&category::Model> for CategoryView {
    fn from(c: &category::Model) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            display_order: c.display_order,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price_range: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub category: CategoryView,
}

impl From<&ServiceRecord> for ServiceView {
    fn from(r: &ServiceRecord) -> Self {
        let s: &service::Model = &r.service;
        Self {
            id: s.id,
            name: s.name.clone(),
            description: s.description.clone(),
            price_range: s.price_range.clone(),
            is_active: s.is_active,
            display_order: s.display_order,
            category: CategoryView::from(&r.category),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PortfolioItemView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: CategoryView,
    pub service: Option<ServiceView>,
    pub image_url: Option<String>,
    pub upload_date: String,
}

impl PortfolioItemView {
    pub fn present(record: &ItemRecord, media: &MediaUrls) -> Self {
        let item = &record.item;
        Self {
            id: item.id,
            title: item.title.clone(),
            description: item.description.clone(),
            category: CategoryView::from(&record.category),
            service: record.service.as_ref().map(ServiceView::from),
            image_url: item.image.as_deref().and_then(|path| media.resolve(path)),
            upload_date: item.upload_date.to_rfc3339(),
        }
    }
}

/// Resolves stored image paths against `<origin><url_prefix>`.
#[derive(Clone, Debug)]
pub struct MediaUrls {
    base: Url,
}

impl MediaUrls {
    /// `origin` is `scheme://host[:port]`, `url_prefix` something like `/media/`.
    pub fn new(origin: &str, url_prefix: &str) -> Result<Self, ServiceError> {
        let base = Url::parse(origin)
            .and_then(|o| o.join(url_prefix))
            .map_err(|e| ServiceError::Validation(format!("Invalid host: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::Validation("Invalid host".into()));
        }
        Ok(Self { base })
    }

    /// Absolute URL for a stored path; `None` for an empty path.
    /// Each segment is percent-encoded, so `#`, `?` and `:` stay in the path.
    pub fn resolve(&self, path: &str) -> Option<String> {
        let mut segments = path.trim().split('/').filter(|s| !s.is_empty()).peekable();
        segments.peek()?;
        let mut url = self.base.clone();
        url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
        Some(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use models::portfolio_item;

    fn record(image: Option<&str>, with_service: bool) -> ItemRecord {
        let category = category::Model { id: 3, name: "Kitchens".into(), description: "Kitchen work".into(), display_order: 1 };
        let service = with_service.then(|| ServiceRecord {
            service: service::Model {
                id: 7,
                name: "Cabinets".into(),
                description: String::new(),
                price_range: Some("$$".into()),
                category_id: 3,
                is_active: false,
                display_order: 0,
            },
            category: category.clone(),
        });
        ItemRecord {
            item: portfolio_item::Model {
                id: 11,
                title: "Kitchen Redesign".into(),
                image: image.map(str::to_string),
                description: "Open plan".into(),
                category_id: 3,
                service_id: service.as_ref().map(|s| s.service.id),
                upload_date: FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap(),
            },
            category,
            service,
        }
    }

    #[test]
    fn image_url_is_absolute() {
        let media = MediaUrls::new("http://example.com:8000", "/media/").unwrap();
        let view = PortfolioItemView::present(&record(Some("portfolio/kitchen one.jpg"), false), &media);
        assert_eq!(view.image_url.as_deref(), Some("http://example.com:8000/media/portfolio/kitchen%20one.jpg"));
    }

    #[test]
    fn reserved_characters_stay_in_the_path() {
        let media = MediaUrls::new("http://testserver", "/media/").unwrap();
        assert_eq!(
            media.resolve("portfolio/kitchen #1?.jpg").as_deref(),
            Some("http://testserver/media/portfolio/kitchen%20%231%3F.jpg")
        );
        assert_eq!(media.resolve("c:plan.jpg").as_deref(), Some("http://testserver/media/c:plan.jpg"));
        assert_eq!(media.resolve("/portfolio//a.jpg").as_deref(), Some("http://testserver/media/portfolio/a.jpg"));
    }

    #[test]
    fn missing_image_is_null() {
        let media = MediaUrls::new("https://example.com", "/media/").unwrap();
        assert_eq!(PortfolioItemView::present(&record(None, false), &media).image_url, None);
        assert_eq!(PortfolioItemView::present(&record(Some(""), false), &media).image_url, None);
    }

    #[test]
    fn nested_shape() {
        let media = MediaUrls::new("http://localhost", "/media/").unwrap();
        let view = PortfolioItemView::present(&record(Some("portfolio/k.jpg"), true), &media);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 11);
        assert_eq!(json["category"], serde_json::json!({"id": 3, "name": "Kitchens", "description": "Kitchen work", "display_order": 1}));
        assert_eq!(json["service"]["name"], "Cabinets");
        assert_eq!(json["service"]["is_active"], false);
        assert_eq!(json["service"]["category"]["id"], 3);
        assert_eq!(json["upload_date"], "2024-05-01T10:30:00+00:00");

        let bare = serde_json::to_value(PortfolioItemView::present(&record(None, false), &media)).unwrap();
        assert!(bare["service"].is_null());
    }

    #[test]
    fn bad_origin_is_rejected() {
        assert!(MediaUrls::new("not a url", "/media/").is_err());
        assert!(MediaUrls::new("http://bad host", "/media/").is_err());
    }
}
