//! Order composition and the WhatsApp hand-off.
//!
//! [`compose_message`] renders the order text sent to the shop;
//! [`whatsapp_link`] wraps it into a `wa.me` deep link. Both are pure: the
//! timestamp and the recipient number are parameters.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use serde::Serialize;

use crate::cart::{Cart, CartLine};
use crate::customer::CustomerProfile;
use crate::types::Price;

const RULE: &str = "━━━━━━━━━━━━";

/// Host of the messaging deep link.
pub const WHATSAPP_BASE: &str = "https://wa.me";

/// Render ASCII digits in Arabic-Indic form (`٠١٢...`).
#[must_use]
pub fn arabic_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => char::from_u32(0x0660 + d).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Date as `ar-EG` renders it: `day/month/year`, Arabic-Indic digits, with a
/// right-to-left mark before each slash.
#[must_use]
pub fn format_date(stamp: &DateTime<FixedOffset>) -> String {
    let raw = format!(
        "{}\u{200f}/{}\u{200f}/{}",
        stamp.day(),
        stamp.month(),
        stamp.year()
    );
    arabic_digits(&raw)
}

/// Time as `ar-EG` renders it with two-digit hour and minute: `hh:mm ص|م`.
#[must_use]
pub fn format_time(stamp: &DateTime<FixedOffset>) -> String {
    let (is_pm, hour) = stamp.hour12();
    let meridiem = if is_pm { "م" } else { "ص" };
    arabic_digits(&format!("{hour:02}:{:02} {meridiem}", stamp.minute()))
}

fn item_line(line: &CartLine) -> String {
    let mut text = format!("- {} × {}", line.product.name(), line.quantity);
    if !line.notes.is_empty() {
        text.push_str(&format!(" ({})", line.notes));
    }
    text
}

/// Render the order summary.
///
/// Each cart line becomes `- <name> × <quantity>`, followed by ` (<notes>)`
/// when it has notes. The delivery-notes block appears only when the
/// customer left notes. The total is printed as a plain integer.
#[must_use]
pub fn compose_message(
    lines: &[CartLine],
    customer: &CustomerProfile,
    total: Price,
    stamp: &DateTime<FixedOffset>,
) -> String {
    let items = lines.iter().map(item_line).collect::<Vec<_>>().join("\n");

    let notes = if customer.delivery_notes.is_empty() {
        String::new()
    } else {
        format!("📝 ملاحظات:\n{}\n", customer.delivery_notes)
    };

    format!(
        "📌 *طلب جديد – بيتزتي* 🍕\n\
         {RULE}\n\
         \n\
         👤 الاسم: {name}\n\
         📞 الهاتف: {phone}\n\
         📍 العنوان: {area}\n\
         \n\
         {RULE}\n\
         🧾 *الطلب:*\n\
         {items}\n\
         \n\
         {notes}{RULE}\n\
         💰 *الإجمالي:* {total} جنيه\n\
         \n\
         📅 التاريخ: {date}\n\
         ⏰ الوقت: {time}",
        name = customer.name,
        phone = customer.phone,
        area = customer.area,
        date = format_date(stamp),
        time = format_time(stamp),
    )
}

/// Build the deep link that opens a chat with `recipient` prefilled with
/// `text`.
///
/// Everything but digits is dropped from `recipient`. The text is
/// percent-encoded with `urlencoding`, which also escapes `( ) ! ' *`; the
/// link decodes to the same message.
#[must_use]
pub fn whatsapp_link(recipient: &str, text: &str) -> String {
    let digits: String = recipient.chars().filter(char::is_ascii_digit).collect();
    format!("{WHATSAPP_BASE}/{digits}?text={}", urlencoding::encode(text))
}

/// A submitted order, as returned to the visitor after checkout.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub items: Vec<CartLine>,
    pub customer: CustomerProfile,
    pub total: Price,
    pub date: String,
    pub time: String,
    pub message: String,
    pub whatsapp_url: String,
}

impl Order {
    /// Compose the order for `cart` and `customer` at `stamp`, addressed to
    /// `recipient`.
    #[must_use]
    pub fn compose(
        cart: &Cart,
        customer: CustomerProfile,
        stamp: &DateTime<FixedOffset>,
        recipient: &str,
    ) -> Self {
        let total = cart.total();
        let message = compose_message(cart.lines(), &customer, total, stamp);
        let whatsapp_url = whatsapp_link(recipient, &message);
        Self {
            items: cart.lines().to_vec(),
            customer,
            total,
            date: format_date(stamp),
            time: format_time(stamp),
            message,
            whatsapp_url,
        }
    }
}
