//! Cart count badges in the page.

use storefront::observers::BadgeSlot;

/// Badge in the site header.
pub(crate) const HEADER_BADGE_ID: &str = "cartCount";

/// Badge on product pages.
pub(crate) const PRODUCT_BADGE_ID: &str = "pcartCount";

/// Badge element located by id. Pages without the element are skipped.
#[derive(Debug, Clone)]
pub(crate) struct DomBadgeSlot {
    element_id: &'static str,
}

impl DomBadgeSlot {
    pub(crate) fn new(element_id: &'static str) -> Self {
        Self { element_id }
    }
}

impl BadgeSlot for DomBadgeSlot {
    fn show_count(&self, count: u64) -> bool {
        let Some(element) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(self.element_id))
        else {
            return false;
        };

        element.set_text_content(Some(&count.to_string()));

        true
    }
}

/// Every badge the storefront keeps in sync.
pub(crate) fn dom_badges() -> Vec<DomBadgeSlot> {
    vec![
        DomBadgeSlot::new(HEADER_BADGE_ID),
        DomBadgeSlot::new(PRODUCT_BADGE_ID),
    ]
}
