//! Plain-text rendering of listings, banners and dashboard tables.

use crate::banners::BannerCarousel;
use crate::models::{Banner, Company, Property, Tier, WhatsAppInquiry, WhatsAppStats};
use crate::views::stats::ResponseBadge;
use std::fmt::Write;

pub const CARD_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=Property+Image";
pub const DETAIL_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/800x500?text=Property+Image";
pub const NO_DESCRIPTION: &str = "No description available for this property.";

/// `1234567.5` -> `$1,234,567.5`
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    if fraction == 0 {
        format!("{}${}", sign, grouped)
    } else {
        let fraction = format!("{:02}", fraction);
        format!("{}${}.{}", sign, grouped, fraction.trim_end_matches('0'))
    }
}

pub fn tier_badge(tier: Tier) -> String {
    format!("[{}]", tier.as_str().to_uppercase())
}

pub fn property_card(property: &Property) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", tier_badge(property.tier), property.title);
    let _ = writeln!(out, "   {}, {}", property.address, property.city);
    let _ = writeln!(out, "   {}", format_price(property.price));
    let _ = writeln!(
        out,
        "   {} bd | {} ba | {} m²",
        property.bedrooms, property.bathrooms, property.area
    );
    if let Some(company) = &property.company {
        let _ = writeln!(out, "   Company: {}", company.name);
    }
    let _ = writeln!(
        out,
        "   Image: {}",
        property.image_url.as_deref().unwrap_or(CARD_PLACEHOLDER_IMAGE)
    );
    let _ = write!(out, "   Details: /properties/{}", property.id);
    out
}

pub fn property_detail(property: &Property) -> String {
    let mut out = String::new();
    if property.tier == Tier::Premium {
        let _ = writeln!(out, "{}", tier_badge(Tier::Premium));
    }
    let _ = writeln!(out, "{}  {}", property.title, format_price(property.price));
    let _ = writeln!(
        out,
        "{}, {}, {} {}",
        property.address, property.city, property.state, property.zip_code
    );
    let _ = writeln!(
        out,
        "Image: {}",
        property.image_url.as_deref().unwrap_or(DETAIL_PLACEHOLDER_IMAGE)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Bedrooms:  {}", property.bedrooms);
    let _ = writeln!(out, "Bathrooms: {}", property.bathrooms);
    let _ = writeln!(out, "Area:      {} m²", property.area);
    let _ = writeln!(out, "Tier:      {}", property.tier);
    let _ = writeln!(out);
    let _ = write!(
        out,
        "{}",
        property
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION)
    );
    if let Some(company) = &property.company {
        let _ = write!(out, "\n\n{}", company_block(company));
    }
    out
}

pub fn company_block(company: &Company) -> String {
    let mut lines = vec![format!("Listed by {}", company.name)];
    for value in [&company.contact_email, &company.contact_phone, &company.address]
        .into_iter()
        .flatten()
    {
        lines.push(format!("  {}", value));
    }
    lines.join("\n")
}

/// Banner on screen plus indicator dots; `None` when there is no banner
pub fn banner_slot(carousel: &BannerCarousel) -> Option<String> {
    let banner = carousel.current()?;
    let mut out = banner_line(banner);
    let indicators = carousel.indicators();
    if !indicators.is_empty() {
        let dots: Vec<&str> = indicators
            .iter()
            .map(|active| if *active { "●" } else { "○" })
            .collect();
        let _ = write!(out, "\n   {}", dots.join(" "));
    }
    Some(out)
}

fn banner_line(banner: &Banner) -> String {
    match banner.target_link.as_deref().filter(|l| !l.is_empty()) {
        Some(link) => format!("📣 {} ({}) -> {}", banner.title, banner.image_url, link),
        None => format!("📣 {} ({})", banner.title, banner.image_url),
    }
}

pub fn stats_panel(stats: &WhatsAppStats) -> String {
    format!(
        "WhatsApp Response Statistics\n  Total Inquiries:       {}\n  Response Rate:         {:.1}%\n  Average Response Time: {} minutes [{}]",
        stats.total_inquiries,
        stats.response_rate,
        stats.avg_response_time,
        ResponseBadge::for_minutes(stats.avg_response_time).as_str()
    )
}

pub fn banner_table(banners: &[Banner]) -> String {
    if banners.is_empty() {
        return "No banners found.".to_string();
    }
    banners
        .iter()
        .map(|b| {
            format!(
                "{:>4}  {:<30}  {:<16}  p{:<2}  {}",
                b.id,
                b.title,
                b.display_location,
                b.priority,
                if b.is_active { "Active" } else { "Inactive" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn property_table(properties: &[Property]) -> String {
    if properties.is_empty() {
        return "No properties found.".to_string();
    }
    properties
        .iter()
        .map(|p| {
            format!(
                "{:>4}  {:<30}  {:<30}  {:>14}  {:<20}  {}",
                p.id,
                p.title,
                format!("{}, {}", p.address, p.city),
                format_price(p.price),
                p.company.as_ref().map(|c| c.name.as_str()).unwrap_or("N/A"),
                p.tier
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn company_table(companies: &[Company]) -> String {
    if companies.is_empty() {
        return "No companies found.".to_string();
    }
    companies
        .iter()
        .map(|c| {
            format!(
                "{:>4}  {:<30}  {}",
                c.id,
                c.name,
                c.contact_phone.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn inquiry_table(inquiries: &[WhatsAppInquiry]) -> String {
    if inquiries.is_empty() {
        return "No WhatsApp inquiries found.".to_string();
    }
    inquiries
        .iter()
        .map(|i| {
            let response = match (i.response_time, i.response_time_in_minutes) {
                (Some(at), Some(minutes)) => format!("{} ({} minutes)", at.format("%Y-%m-%d %H:%M"), minutes),
                (Some(at), None) => at.format("%Y-%m-%d %H:%M").to_string(),
                (None, _) => "Not responded".to_string(),
            };
            format!(
                "{} <{}>  {}  \"{}\"  {}  {}",
                i.customer_name,
                i.customer_phone,
                i.property
                    .as_ref()
                    .and_then(|p| p.title.as_deref())
                    .unwrap_or("N/A"),
                i.message,
                i.inquiry_time.format("%Y-%m-%d %H:%M"),
                response
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisplayLocation, InquiryProperty};
    use crate::views::testing::{banner, company, property};
    use chrono::{TimeZone, Utc};

    #[test]
    fn prices_get_thousands_separators() {
        assert_eq!(format_price(0.0), "$0");
        assert_eq!(format_price(999.0), "$999");
        assert_eq!(format_price(1000.0), "$1,000");
        assert_eq!(format_price(1234567.5), "$1,234,567.5");
        assert_eq!(format_price(250000.25), "$250,000.25");
    }

    #[test]
    fn card_falls_back_to_placeholder_image() {
        let mut p = property(3, 450000.0, "Austin", 1);
        p.tier = Tier::Featured;
        p.company = Some(company(1, "Acme Realty", None));
        let card = property_card(&p);
        assert!(card.starts_with("[FEATURED] Listing 3"));
        assert!(card.contains("$450,000"));
        assert!(card.contains("Company: Acme Realty"));
        assert!(card.contains(CARD_PLACEHOLDER_IMAGE));
    }

    #[test]
    fn detail_without_description() {
        let text = property_detail(&property(3, 1.0, "Austin", 1));
        assert!(text.contains(NO_DESCRIPTION));
        assert!(text.contains("3 Main St, Austin, TX 73301"));
        assert!(!text.contains("[PREMIUM]"));
    }

    #[test]
    fn banner_slot_shows_indicators_only_when_rotating() {
        let single = BannerCarousel::new(vec![banner(1, DisplayLocation::All)]);
        assert!(!banner_slot(&single).unwrap().contains('●'));

        let mut many = BannerCarousel::new(vec![
            banner(1, DisplayLocation::All),
            banner(2, DisplayLocation::All),
            banner(3, DisplayLocation::All),
        ]);
        many.select(1);
        assert!(banner_slot(&many).unwrap().ends_with("○ ● ○"));

        assert!(banner_slot(&BannerCarousel::default()).is_none());
    }

    #[test]
    fn stats_panel_rounds_rate() {
        let text = stats_panel(&WhatsAppStats {
            total_inquiries: 4,
            response_rate: 66.666,
            avg_response_time: 90.0,
        });
        assert!(text.contains("66.7%"));
        assert!(text.contains("[danger]"));
    }

    #[test]
    fn unanswered_inquiry() {
        let inquiry = WhatsAppInquiry {
            id: 1,
            customer_name: "Ana".to_string(),
            customer_phone: "+100".to_string(),
            agent_phone: None,
            property_id: None,
            property: Some(InquiryProperty::default()),
            message: "Hi".to_string(),
            inquiry_time: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            response_time: None,
            response_time_in_minutes: None,
        };
        let table = inquiry_table(&[inquiry]);
        assert!(table.contains("N/A"));
        assert!(table.contains("2024-05-01 09:30"));
        assert!(table.ends_with("Not responded"));
    }
}
