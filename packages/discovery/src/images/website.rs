//! Photo extraction from a restaurant's own website.
//!
//! Tried in order: Open Graph image meta tag, Twitter-card image meta
//! tag, then the highest-scoring `<img>` element. Scoring favors hero
//! and food imagery and excludes chrome (icons, logos, sprites)
//! outright. All candidate URLs are resolved against the page URL and
//! must survive the reject-list check.

use scraper::{Html, Selector};
use url::Url;

use super::is_rejected_image_url;

/// URL substrings that disqualify an `<img>` outright.
const EXCLUDED_IMG_FRAGMENTS: &[&str] = &["icon", "logo", "avatar", "badge", "favicon", "sprite"];

/// Keywords suggesting hero or food imagery.
const KEYWORDS: &[&str] = &["hero", "banner", "food", "restaurant"];

/// Find the best photo URL in a page, if any.
pub fn best_image(html: &str, page_url: &str, restaurant_name: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    if let Some(url) = meta_content(&document, "meta[property=\"og:image\"]", base.as_ref()) {
        return Some(url);
    }
    if let Some(url) = meta_content(&document, "meta[name=\"twitter:image\"]", base.as_ref()) {
        return Some(url);
    }
    scored_img(&document, base.as_ref(), restaurant_name)
}

fn meta_content(document: &Html, selector: &str, base: Option<&Url>) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .filter_map(|content| absolutize(content, base))
        .find(|url| !is_rejected_image_url(url))
}

/// Score every `<img>` and keep the best one.
fn scored_img(document: &Html, base: Option<&Url>, restaurant_name: &str) -> Option<String> {
    let selector = Selector::parse("img").ok()?;
    let name_lower = restaurant_name.to_lowercase();

    let mut best: Option<(i32, String)> = None;
    for img in document.select(&selector) {
        let src = match img.value().attr("src") {
            Some(s) if !s.trim().is_empty() => s,
            _ => continue,
        };
        let src_lower = src.to_lowercase();
        if EXCLUDED_IMG_FRAGMENTS.iter().any(|f| src_lower.contains(f)) {
            continue;
        }

        let url = match absolutize(src, base) {
            Some(u) if !is_rejected_image_url(&u) => u,
            _ => continue,
        };

        let mut score = 0;
        if KEYWORDS.iter().any(|k| src_lower.contains(k)) {
            score += 10;
        }
        if let Some(alt) = img.value().attr("alt") {
            let alt_lower = alt.to_lowercase();
            if alt_lower.contains(&name_lower) || KEYWORDS.iter().any(|k| alt_lower.contains(k)) {
                score += 5;
            }
        }
        if let Some(class) = img.value().attr("class") {
            let class_lower = class.to_lowercase();
            if KEYWORDS.iter().any(|k| class_lower.contains(k)) {
                score += 5;
            }
        }
        if dimension(img.value().attr("width")) > 300 && dimension(img.value().attr("height")) > 200
        {
            score += 3;
        }

        match &best {
            Some((best_score, _)) if *best_score >= score => {}
            _ => best = Some((score, url)),
        }
    }

    best.map(|(_, url)| url)
}

fn dimension(attr: Option<&str>) -> u32 {
    attr.and_then(|v| v.trim().trim_end_matches("px").parse().ok())
        .unwrap_or(0)
}

fn absolutize(src: &str, base: Option<&Url>) -> Option<String> {
    if src.starts_with("http://") || src.starts_with("https://") {
        return Some(src.to_string());
    }
    base?.join(src).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://trattoria.example-restaurant.com/";

    #[test]
    fn test_og_image_wins() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://cdn.site.com/og-photo.jpg">
            <meta name="twitter:image" content="https://cdn.site.com/tw-photo.jpg">
        </head><body><img src="https://cdn.site.com/food-hero.jpg"></body></html>"#;
        assert_eq!(
            best_image(html, PAGE, "Trattoria"),
            Some("https://cdn.site.com/og-photo.jpg".to_string())
        );
    }

    #[test]
    fn test_twitter_card_fallback() {
        let html = r#"<html><head>
            <meta name="twitter:image" content="https://cdn.site.com/tw-photo.jpg">
        </head><body></body></html>"#;
        assert_eq!(
            best_image(html, PAGE, "Trattoria"),
            Some("https://cdn.site.com/tw-photo.jpg".to_string())
        );
    }

    #[test]
    fn test_rejected_og_image_falls_through() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://via.placeholder.com/400">
        </head><body><img src="https://cdn.site.com/dining-room-hero.jpg"></body></html>"#;
        assert_eq!(
            best_image(html, PAGE, "Trattoria"),
            Some("https://cdn.site.com/dining-room-hero.jpg".to_string())
        );
    }

    #[test]
    fn test_img_scoring_prefers_hero_over_plain() {
        let html = r#"<html><body>
            <img src="https://cdn.site.com/misc.jpg">
            <img src="https://cdn.site.com/banner-food.jpg" alt="Trattoria dining room">
        </body></html>"#;
        assert_eq!(
            best_image(html, PAGE, "Trattoria"),
            Some("https://cdn.site.com/banner-food.jpg".to_string())
        );
    }

    #[test]
    fn test_logo_and_icon_excluded() {
        let html = r#"<html><body>
            <img src="https://cdn.site.com/logo.png" width="600" height="400">
            <img src="https://cdn.site.com/favicon.ico">
        </body></html>"#;
        assert_eq!(best_image(html, PAGE, "Trattoria"), None);
    }

    #[test]
    fn test_relative_src_resolved_against_page() {
        let html = r#"<html><body><img src="/images/food-plate.jpg"></body></html>"#;
        assert_eq!(
            best_image(html, PAGE, "Trattoria"),
            Some("https://trattoria.example-restaurant.com/images/food-plate.jpg".to_string())
        );
    }

    #[test]
    fn test_declared_dimensions_break_ties() {
        let html = r#"<html><body>
            <img src="https://cdn.site.com/a.jpg" width="100" height="80">
            <img src="https://cdn.site.com/b.jpg" width="800" height="500">
        </body></html>"#;
        assert_eq!(
            best_image(html, PAGE, "Trattoria"),
            Some("https://cdn.site.com/b.jpg".to_string())
        );
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        assert_eq!(best_image("<html><body></body></html>", PAGE, "X"), None);
    }
}
