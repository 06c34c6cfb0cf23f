use crate::domain::model::{ServiceItem, UnitConfig};
use crate::utils::error::Result;
use url::Url;

const WHATSAPP_BASE: &str = "https://wa.me/";
const INSTAGRAM_BASE: &str = "https://instagram.com/";

fn whatsapp_link(number: &str, text: &str) -> Result<Url> {
    let mut url = Url::parse(WHATSAPP_BASE)?.join(number)?;
    url.query_pairs_mut().append_pair("text", text);
    Ok(url)
}

/// Catalog "book now" link, routed to the central number.
pub fn service_booking_link(main_whatsapp: &str, service: &ServiceItem) -> Result<Url> {
    let text = format!(
        "Olá! Vi o *{}* no catálogo e gostaria de saber mais detalhes e disponibilidade.",
        service.title
    );
    whatsapp_link(main_whatsapp, &text)
}

pub fn unit_booking_link(unit: &UnitConfig) -> Result<Url> {
    let text = format!(
        "Olá! Gostaria de agendar um momento especial no {}.",
        unit.name
    );
    whatsapp_link(&unit.whatsapp, &text)
}

/// The handle is pushed as a single path segment, so it can never change the host.
pub fn instagram_profile_link(handle: &str) -> Result<Url> {
    let user = handle.trim_start_matches('@');
    let mut url = Url::parse(INSTAGRAM_BASE)?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(user);
    }
    Ok(url)
}
