#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub short: &'static str,
    pub href: &'static str,
}

/// Static chrome settings generated from `site.toml` at build time.
#[derive(Clone, Copy, Debug)]
pub struct SiteConfig {
    pub name: &'static str,
    pub title: &'static str,
    pub brand_href: &'static str,
    pub theme_storage_key: &'static str,
    pub theme_explicit_key: &'static str,
    pub nav_items: &'static [NavItem],
    pub social_links: &'static [SocialLink],
}

include!(concat!(env!("OUT_DIR"), "/site_config.rs"));

pub fn nav_item_by_href(href: &str) -> Option<&'static NavItem> {
    let trimmed = href.trim();
    NAV_ITEMS.iter().find(|item| item.href == trimmed)
}
